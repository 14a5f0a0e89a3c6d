//! Pointer-reactive decoration.
//!
//! Two normalizations of the same pointer position:
//!
//! | Mode | Range | Rest value | Used by |
//! |---|---|---|---|
//! | [`PointerMode::Spotlight`] | percent of viewport, `[0, 100]` | `(50, 50)` | home searchlight + coordinate readout |
//! | [`PointerMode::Parallax`] | `[-1, 1]` | `(0, 0)` | journal category cards |
//!
//! A tracker is owned by a view. It registers one pointer-move listener on
//! attach and releases it on detach; between pointer moves it holds only the
//! last normalized value.

use crate::scheduler::{EventKind, ListenerId, Scheduler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerMode {
    Spotlight,
    Parallax,
}

impl PointerMode {
    fn rest(self) -> (f64, f64) {
        match self {
            PointerMode::Spotlight => (50.0, 50.0),
            PointerMode::Parallax => (0.0, 0.0),
        }
    }

    /// Normalize a client position against the viewport.
    pub fn normalize(self, x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
        if width <= 0.0 || height <= 0.0 {
            return self.rest();
        }
        match self {
            PointerMode::Spotlight => (x / width * 100.0, y / height * 100.0),
            PointerMode::Parallax => (x / width * 2.0 - 1.0, y / height * 2.0 - 1.0),
        }
    }
}

#[derive(Debug)]
pub struct PointerTracker {
    mode: PointerMode,
    value: (f64, f64),
    listener: Option<ListenerId>,
}

impl PointerTracker {
    pub fn attach(mode: PointerMode, scheduler: &mut Scheduler) -> Self {
        Self {
            mode,
            value: mode.rest(),
            listener: Some(scheduler.add_listener(EventKind::PointerMove)),
        }
    }

    pub fn mode(&self) -> PointerMode {
        self.mode
    }

    pub fn listener(&self) -> Option<ListenerId> {
        self.listener
    }

    pub fn value(&self) -> (f64, f64) {
        self.value
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if self.listener.is_some() {
            self.value = self.mode.normalize(x, y, width, height);
        }
    }

    pub fn detach(&mut self, scheduler: &mut Scheduler) {
        if let Some(id) = self.listener.take() {
            scheduler.remove_listener(id);
        }
    }

    /// Parallax offset in px for the card at `index`: deeper cards move more.
    pub fn parallax_offset(&self, index: usize) -> (f64, f64) {
        let depth = 10.0 * (index as f64 + 1.0);
        (self.value.0 * depth, self.value.1 * depth)
    }

    /// Inline style for a parallax card.
    pub fn parallax_style(&self, index: usize) -> String {
        let (dx, dy) = self.parallax_offset(index);
        format!("transform: translate({dx:.2}px, {dy:.2}px)")
    }

    /// Inline style for the home searchlight.
    pub fn spotlight_style(&self) -> String {
        format!(
            "background: radial-gradient(circle 500px at {:.2}% {:.2}%, rgba(255,255,255,0.04), transparent 50%)",
            self.value.0, self.value.1
        )
    }

    /// Observatory readout in the home view's corner.
    pub fn coordinate_readout(&self) -> String {
        format!("POS: {:.2}N, {:.2}E", self.value.0, self.value.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spotlight_normalizes_to_percent() {
        let (x, y) = PointerMode::Spotlight.normalize(320.0, 200.0, 1280.0, 800.0);
        assert_eq!((x, y), (25.0, 25.0));
    }

    #[test]
    fn parallax_normalizes_to_unit_range() {
        let mode = PointerMode::Parallax;
        assert_eq!(mode.normalize(0.0, 0.0, 1000.0, 500.0), (-1.0, -1.0));
        assert_eq!(mode.normalize(500.0, 250.0, 1000.0, 500.0), (0.0, 0.0));
        assert_eq!(mode.normalize(1000.0, 500.0, 1000.0, 500.0), (1.0, 1.0));
    }

    #[test]
    fn degenerate_viewport_keeps_rest_value() {
        assert_eq!(
            PointerMode::Spotlight.normalize(10.0, 10.0, 0.0, 800.0),
            (50.0, 50.0)
        );
    }

    #[test]
    fn tracker_starts_at_rest() {
        let mut scheduler = Scheduler::new(16);
        let spot = PointerTracker::attach(PointerMode::Spotlight, &mut scheduler);
        let para = PointerTracker::attach(PointerMode::Parallax, &mut scheduler);
        assert_eq!(spot.value(), (50.0, 50.0));
        assert_eq!(para.value(), (0.0, 0.0));
        assert_eq!(scheduler.listener_count(EventKind::PointerMove), 2);
    }

    #[test]
    fn parallax_offsets_scale_with_index() {
        let mut scheduler = Scheduler::new(16);
        let mut tracker = PointerTracker::attach(PointerMode::Parallax, &mut scheduler);
        tracker.on_pointer_move(1000.0, 0.0, 1000.0, 500.0);
        assert_eq!(tracker.parallax_offset(0), (10.0, -10.0));
        assert_eq!(tracker.parallax_offset(2), (30.0, -30.0));
        assert_eq!(
            tracker.parallax_style(1),
            "transform: translate(20.00px, -20.00px)"
        );
    }

    #[test]
    fn spotlight_styles_reflect_pointer() {
        let mut scheduler = Scheduler::new(16);
        let mut tracker = PointerTracker::attach(PointerMode::Spotlight, &mut scheduler);
        tracker.on_pointer_move(128.0, 600.0, 1280.0, 800.0);
        assert_eq!(tracker.coordinate_readout(), "POS: 10.00N, 75.00E");
        assert!(tracker.spotlight_style().contains("at 10.00% 75.00%"));
    }

    #[test]
    fn detached_tracker_ignores_moves_and_releases_listener() {
        let mut scheduler = Scheduler::new(16);
        let mut tracker = PointerTracker::attach(PointerMode::Parallax, &mut scheduler);
        tracker.detach(&mut scheduler);
        tracker.detach(&mut scheduler);
        tracker.on_pointer_move(0.0, 0.0, 100.0, 100.0);
        assert_eq!(tracker.value(), (0.0, 0.0));
        assert_eq!(scheduler.total_listeners(), 0);
    }
}

//! Landing view: hero, searchlight, and drifting dust.

use crate::config::SiteConfig;
use crate::particles::{ParticleAnimator, SvgSurface};
use crate::pointer::{PointerMode, PointerTracker};
use crate::scheduler::{FrameId, Scheduler};

#[derive(Debug)]
pub struct HomeView {
    spotlight: PointerTracker,
    animator: ParticleAnimator<SvgSurface>,
}

impl HomeView {
    pub fn mount(config: &SiteConfig, viewport: (f64, f64), scheduler: &mut Scheduler) -> Self {
        let spotlight = PointerTracker::attach(PointerMode::Spotlight, scheduler);
        let mut animator = ParticleAnimator::new(
            &config.particles,
            Some(SvgSurface::new()),
            viewport.0,
            viewport.1,
        );
        animator.start(scheduler);
        Self {
            spotlight,
            animator,
        }
    }

    pub fn spotlight(&self) -> &PointerTracker {
        &self.spotlight
    }

    pub fn animator(&self) -> &ParticleAnimator<SvgSurface> {
        &self.animator
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.spotlight.on_pointer_move(x, y, width, height);
    }

    pub fn on_resize(&mut self, width: f64, height: f64) {
        self.animator.on_resize(width, height);
    }

    pub fn on_frame(&mut self, frame: FrameId, scheduler: &mut Scheduler) -> bool {
        self.animator.on_frame(frame, scheduler)
    }

    pub fn teardown(&mut self, scheduler: &mut Scheduler) {
        self.animator.stop(scheduler);
        self.spotlight.detach(scheduler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::EventKind;
    use crate::test_helpers::seeded_config;

    #[test]
    fn mount_starts_dust_and_spotlight() {
        let mut scheduler = Scheduler::new(16);
        let view = HomeView::mount(&seeded_config(), (1280.0, 800.0), &mut scheduler);
        assert!(view.animator().is_running());
        assert_eq!(view.animator().field().len(), 60);
        assert_eq!(scheduler.pending_frames(), 1);
        assert_eq!(scheduler.listener_count(EventKind::PointerMove), 1);
        assert_eq!(scheduler.listener_count(EventKind::Resize), 1);
    }

    #[test]
    fn teardown_releases_everything() {
        let mut scheduler = Scheduler::new(16);
        let mut view = HomeView::mount(&seeded_config(), (1280.0, 800.0), &mut scheduler);
        view.teardown(&mut scheduler);
        assert_eq!(scheduler.pending_frames(), 0);
        assert_eq!(scheduler.total_listeners(), 0);
    }
}

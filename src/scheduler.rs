//! Simulated host scheduling: a virtual clock, one-shot timers, frame
//! callbacks, and an event-listener registry.
//!
//! The scheduler never runs callbacks itself. It hands out handles when a
//! component registers something and, when time advances, reports which
//! handles came due. The owner of a handle is responsible for reacting to it
//! and for releasing it on teardown. This keeps ownership linear: no shared
//! closures, no `Rc<RefCell<_>>` graphs.
//!
//! ## Timing model
//!
//! ```text
//! set_timeout(500) at t=120   → due at t=620
//! request_frame()  at t=120   → fires at the next frame boundary (t=128 with 16ms frames)
//! ```
//!
//! Timers win ties against frame boundaries. Frame requests registered while
//! a frame batch is being handled land on the following boundary, the same
//! way `requestAnimationFrame` behaves inside a frame callback.
//!
//! ## Resource accounting
//!
//! [`Scheduler::active_timers`], [`Scheduler::pending_frames`] and
//! [`Scheduler::listener_count`] expose live registrations so tests can check
//! that every acquire has a matching release.

use std::collections::BTreeMap;

/// Handle for a one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// Handle for a pending frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameId(u64);

/// Handle for a registered event listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

/// Host events a component can listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    FragmentChange,
    PointerMove,
    Resize,
}

/// Something that came due while the clock advanced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Due {
    Timer(TimerId),
    /// Every frame request pending at the boundary, in request order.
    Frame(Vec<FrameId>),
}

#[derive(Debug)]
pub struct Scheduler {
    now_ms: u64,
    frame_interval_ms: u64,
    next_handle: u64,
    timers: BTreeMap<TimerId, u64>,
    frames: Vec<FrameId>,
    frame_due: Option<u64>,
    listeners: BTreeMap<ListenerId, EventKind>,
}

impl Scheduler {
    pub fn new(frame_interval_ms: u64) -> Self {
        Self {
            now_ms: 0,
            frame_interval_ms: frame_interval_ms.max(1),
            next_handle: 1,
            timers: BTreeMap::new(),
            frames: Vec::new(),
            frame_due: None,
            listeners: BTreeMap::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn frame_interval_ms(&self) -> u64 {
        self.frame_interval_ms
    }

    fn next_handle(&mut self) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }

    // ------------------------------------------------------------------
    // Timers
    // ------------------------------------------------------------------

    pub fn set_timeout(&mut self, delay_ms: u64) -> TimerId {
        let id = TimerId(self.next_handle());
        self.timers.insert(id, self.now_ms.saturating_add(delay_ms));
        id
    }

    /// Cancel a timer. Returns `false` if it already fired or was cancelled.
    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    // ------------------------------------------------------------------
    // Frames
    // ------------------------------------------------------------------

    pub fn request_frame(&mut self) -> FrameId {
        let id = FrameId(self.next_handle());
        if self.frames.is_empty() {
            self.frame_due = self.next_frame_boundary();
        }
        self.frames.push(id);
        id
    }

    /// Cancel a frame request. Returns `false` if it already ran or was cancelled.
    pub fn cancel_frame(&mut self, id: FrameId) -> bool {
        let before = self.frames.len();
        self.frames.retain(|f| *f != id);
        if self.frames.is_empty() {
            self.frame_due = None;
        }
        self.frames.len() != before
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    // ------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------

    pub fn add_listener(&mut self, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.next_handle());
        self.listeners.insert(id, kind);
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub fn is_listening(&self, id: ListenerId) -> bool {
        self.listeners.contains_key(&id)
    }

    /// Registered listeners for `kind`, in registration order.
    pub fn listeners_for(&self, kind: EventKind) -> Vec<ListenerId> {
        self.listeners
            .iter()
            .filter(|(_, k)| **k == kind)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.values().filter(|k| **k == kind).count()
    }

    pub fn total_listeners(&self) -> usize {
        self.listeners.len()
    }

    // ------------------------------------------------------------------
    // Clock
    // ------------------------------------------------------------------

    /// `None` once the clock has no boundary left ahead of it.
    fn next_frame_boundary(&self) -> Option<u64> {
        (self.now_ms / self.frame_interval_ms)
            .checked_add(1)?
            .checked_mul(self.frame_interval_ms)
    }

    /// Pop the earliest registration due at or before `until`, moving the
    /// clock to its due time. Returns `None` once nothing else is due; the
    /// clock is then left where the last event fired.
    pub fn pop_due(&mut self, until: u64) -> Option<Due> {
        let next_timer = self
            .timers
            .iter()
            .min_by_key(|(id, due)| (**due, **id))
            .map(|(id, due)| (*id, *due));
        let next_frame = self.frame_due;

        match (next_timer, next_frame) {
            (Some((id, due)), frame) if due <= until && frame.is_none_or(|f| due <= f) => {
                self.timers.remove(&id);
                self.now_ms = self.now_ms.max(due);
                Some(Due::Timer(id))
            }
            (_, Some(boundary)) if boundary <= until => {
                self.now_ms = self.now_ms.max(boundary);
                self.frame_due = None;
                Some(Due::Frame(std::mem::take(&mut self.frames)))
            }
            _ => None,
        }
    }

    /// Move the clock forward to `until` once everything due has been handled.
    pub fn settle_at(&mut self, until: u64) {
        self.now_ms = self.now_ms.max(until);
    }
}

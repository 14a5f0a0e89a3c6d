//! Exit → apply → enter sequencing for sub-view changes.
//!
//! ```text
//!             request(u)                      timer fires
//! Idle ───────────────────▶ Exiting(u) ─────────────────────▶ Idle (entering)
//!   ▲                          │ request(v): queued                 │
//!   │                          ▼                                    │
//!   └──────────────── next queued request starts its own exit ◀─────┘
//! ```
//!
//! The controller is generic over the pending update `U`. It never applies
//! an update itself: [`TransitionController::on_timer`] hands the update back
//! to the owner, which applies it and resets scroll.
//!
//! Requests made while an exit is in flight are queued FIFO and each gets
//! its own full exit once the previous update has been applied.
//!
//! A timer that never fires leaves the controller in `Exiting` forever. That
//! is a degenerate host, not an error this module handles.

use crate::scheduler::{Scheduler, TimerId};
use std::collections::VecDeque;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Showing the current sub-view. `entering` is set once any transition
    /// has completed, so the view plays its enter animation.
    Idle { entering: bool },
    Exiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The exit animation started now.
    Started,
    /// Another exit is in flight; this request waits at `position` (1-based).
    Queued { position: usize },
}

#[derive(Debug)]
struct InFlight<U> {
    timer: TimerId,
    update: U,
    started_at_ms: u64,
}

#[derive(Debug)]
pub struct TransitionController<U> {
    exit_ms: u64,
    in_flight: Option<InFlight<U>>,
    queue: VecDeque<U>,
    entering: bool,
    started: usize,
    completed: usize,
}

impl<U> TransitionController<U> {
    pub fn new(exit_ms: u64) -> Self {
        Self {
            exit_ms,
            in_flight: None,
            queue: VecDeque::new(),
            entering: false,
            started: 0,
            completed: 0,
        }
    }

    pub fn exit_ms(&self) -> u64 {
        self.exit_ms
    }

    pub fn phase(&self) -> Phase {
        if self.in_flight.is_some() {
            Phase::Exiting
        } else {
            Phase::Idle {
                entering: self.entering,
            }
        }
    }

    pub fn is_exiting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// CSS animation class for the container wrapping the sub-view.
    pub fn animation_class(&self) -> &'static str {
        if self.is_exiting() {
            "animate-exit"
        } else {
            "animate-enter"
        }
    }

    /// Exit sequences started so far, including ones started from the queue.
    pub fn started(&self) -> usize {
        self.started
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Timestamp the in-flight exit began at.
    pub fn exit_started_at(&self) -> Option<u64> {
        self.in_flight.as_ref().map(|f| f.started_at_ms)
    }

    pub fn request(&mut self, update: U, scheduler: &mut Scheduler) -> RequestOutcome {
        if self.in_flight.is_some() {
            self.queue.push_back(update);
            debug!(position = self.queue.len(), "transition queued");
            return RequestOutcome::Queued {
                position: self.queue.len(),
            };
        }
        self.begin_exit(update, scheduler);
        RequestOutcome::Started
    }

    fn begin_exit(&mut self, update: U, scheduler: &mut Scheduler) {
        let timer = scheduler.set_timeout(self.exit_ms);
        self.started += 1;
        debug!(exit_ms = self.exit_ms, at = scheduler.now_ms(), "transition exit started");
        self.in_flight = Some(InFlight {
            timer,
            update,
            started_at_ms: scheduler.now_ms(),
        });
    }

    /// React to a fired timer. Returns the pending update when the timer is
    /// this controller's in-flight exit; the caller applies it.
    pub fn on_timer(&mut self, timer: TimerId, scheduler: &mut Scheduler) -> Option<U> {
        if self.in_flight.as_ref().is_none_or(|f| f.timer != timer) {
            return None;
        }
        let finished = self.in_flight.take()?;
        self.entering = true;
        self.completed += 1;
        debug!(
            elapsed_ms = scheduler.now_ms() - finished.started_at_ms,
            "transition exit finished"
        );
        if let Some(next) = self.queue.pop_front() {
            self.begin_exit(next, scheduler);
        }
        Some(finished.update)
    }

    /// Cancel the in-flight timer and drop every pending update. Returns how
    /// many updates were dropped.
    pub fn teardown(&mut self, scheduler: &mut Scheduler) -> usize {
        let mut dropped = self.queue.len();
        self.queue.clear();
        if let Some(in_flight) = self.in_flight.take() {
            scheduler.clear_timeout(in_flight.timer);
            dropped += 1;
        }
        if dropped > 0 {
            debug!(dropped, "transition torn down with pending updates");
        }
        dropped
    }
}

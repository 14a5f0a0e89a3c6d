//! Journal view: the navigation state machine behind a transition
//! controller, with parallax category cards.
//!
//! Every selection change is requested, never applied: the controller runs
//! the exit animation and hands the update back when its timer fires.

use crate::blog::{BlogNav, NavUpdate};
use crate::config::SiteConfig;
use crate::content::ContentStore;
use crate::pointer::{PointerMode, PointerTracker};
use crate::scheduler::{Scheduler, TimerId};
use crate::transition::{RequestOutcome, TransitionController};

#[derive(Debug)]
pub struct BlogView {
    nav: BlogNav,
    transition: TransitionController<NavUpdate>,
    parallax: PointerTracker,
}

impl BlogView {
    /// Mount a fresh journal at the overview.
    pub fn mount(config: &SiteConfig, scheduler: &mut Scheduler) -> Self {
        Self {
            nav: BlogNav::Overview,
            transition: TransitionController::new(config.transition.exit_ms),
            parallax: PointerTracker::attach(PointerMode::Parallax, scheduler),
        }
    }

    pub fn nav(&self) -> &BlogNav {
        &self.nav
    }

    pub fn transition(&self) -> &TransitionController<NavUpdate> {
        &self.transition
    }

    pub fn parallax(&self) -> &PointerTracker {
        &self.parallax
    }

    pub fn request(&mut self, update: NavUpdate, scheduler: &mut Scheduler) -> RequestOutcome {
        self.transition.request(update, scheduler)
    }

    /// Apply the pending update if `timer` is this view's exit timer.
    /// Returns `true` when the selection was swapped.
    pub fn on_timer(
        &mut self,
        timer: TimerId,
        scheduler: &mut Scheduler,
        store: &ContentStore,
    ) -> bool {
        match self.transition.on_timer(timer, scheduler) {
            Some(update) => {
                self.nav = self.nav.apply(&update, store);
                true
            }
            None => false,
        }
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.parallax.on_pointer_move(x, y, width, height);
    }

    /// Drop pending updates and release the exit timer and pointer listener.
    pub fn teardown(&mut self, scheduler: &mut Scheduler) -> usize {
        self.parallax.detach(scheduler);
        self.transition.teardown(scheduler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::Due;

    fn drive(view: &mut BlogView, scheduler: &mut Scheduler, store: &ContentStore, until: u64) {
        while let Some(due) = scheduler.pop_due(until) {
            if let Due::Timer(id) = due {
                view.on_timer(id, scheduler, store);
            }
        }
        scheduler.settle_at(until);
    }

    #[test]
    fn mounts_at_overview() {
        let mut scheduler = Scheduler::new(16);
        let view = BlogView::mount(&SiteConfig::default(), &mut scheduler);
        assert_eq!(view.nav(), &BlogNav::Overview);
        assert_eq!(view.transition().animation_class(), "animate-enter");
    }

    #[test]
    fn selection_applies_after_exit() {
        let store = ContentStore::stock();
        let mut scheduler = Scheduler::new(16);
        let mut view = BlogView::mount(&SiteConfig::default(), &mut scheduler);

        view.request(NavUpdate::SelectCategory("engineering".into()), &mut scheduler);
        drive(&mut view, &mut scheduler, &store, 499);
        assert_eq!(view.nav(), &BlogNav::Overview);
        assert_eq!(view.transition().animation_class(), "animate-exit");

        drive(&mut view, &mut scheduler, &store, 500);
        assert_eq!(view.nav().to_string(), "CategoryList(engineering)");
    }

    #[test]
    fn teardown_before_delay_never_applies() {
        let store = ContentStore::stock();
        let mut scheduler = Scheduler::new(16);
        let mut view = BlogView::mount(&SiteConfig::default(), &mut scheduler);
        view.request(NavUpdate::SelectCategory("philosophy".into()), &mut scheduler);
        drive(&mut view, &mut scheduler, &store, 200);

        assert_eq!(view.teardown(&mut scheduler), 1);
        drive(&mut view, &mut scheduler, &store, 2_000);
        assert_eq!(view.nav(), &BlogNav::Overview);
        assert_eq!(scheduler.active_timers(), 0);
        assert_eq!(scheduler.total_listeners(), 0);
    }
}

//! Top-level views and their mount/unmount lifecycle.
//!
//! | View | Owns |
//! |---|---|
//! | [`HomeView`] | spotlight listener, particle frame loop + resize listener |
//! | [`CollectionView`] | nothing |
//! | [`BlogView`] | parallax listener, transition timer + queue |
//!
//! [`MountedView::teardown`] releases everything the view registered, so
//! swapping routes never leaks a timer, frame or listener.

pub mod blog;
pub mod collection;
pub mod home;

pub use blog::BlogView;
pub use collection::CollectionView;
pub use home::HomeView;

use crate::config::SiteConfig;
use crate::content::ContentStore;
use crate::route::Route;
use crate::scheduler::{FrameId, Scheduler, TimerId};
use tracing::debug;

#[derive(Debug)]
pub enum MountedView {
    Home(HomeView),
    Collection(CollectionView),
    Blog(BlogView),
}

impl MountedView {
    pub fn mount(
        route: Route,
        config: &SiteConfig,
        viewport: (f64, f64),
        scheduler: &mut Scheduler,
    ) -> Self {
        debug!(%route, at = scheduler.now_ms(), "mount view");
        match route {
            Route::Home => MountedView::Home(HomeView::mount(config, viewport, scheduler)),
            Route::Collection => MountedView::Collection(CollectionView::mount()),
            Route::Blog => MountedView::Blog(BlogView::mount(config, scheduler)),
        }
    }

    pub fn route(&self) -> Route {
        match self {
            MountedView::Home(_) => Route::Home,
            MountedView::Collection(_) => Route::Collection,
            MountedView::Blog(_) => Route::Blog,
        }
    }

    /// Route name, followed by the journal selection when on the journal:
    /// `Home`, `Collection`, `Blog/Overview`, `Blog/Article(3)`.
    pub fn path(&self) -> String {
        match self {
            MountedView::Blog(view) => format!("{}/{}", Route::Blog, view.nav()),
            other => other.route().to_string(),
        }
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64, width: f64, height: f64) {
        match self {
            MountedView::Home(view) => view.on_pointer_move(x, y, width, height),
            MountedView::Blog(view) => view.on_pointer_move(x, y, width, height),
            MountedView::Collection(_) => {}
        }
    }

    pub fn on_resize(&mut self, width: f64, height: f64) {
        if let MountedView::Home(view) = self {
            view.on_resize(width, height);
        }
    }

    pub fn on_frame(&mut self, frame: FrameId, scheduler: &mut Scheduler) -> bool {
        match self {
            MountedView::Home(view) => view.on_frame(frame, scheduler),
            _ => false,
        }
    }

    /// Returns `true` when a journal update was applied.
    pub fn on_timer(
        &mut self,
        timer: TimerId,
        scheduler: &mut Scheduler,
        store: &ContentStore,
    ) -> bool {
        match self {
            MountedView::Blog(view) => view.on_timer(timer, scheduler, store),
            _ => false,
        }
    }

    pub fn teardown(&mut self, scheduler: &mut Scheduler) {
        debug!(route = %self.route(), at = scheduler.now_ms(), "unmount view");
        match self {
            MountedView::Home(view) => view.teardown(scheduler),
            MountedView::Blog(view) => {
                view.teardown(scheduler);
            }
            MountedView::Collection(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::seeded_config;

    #[test]
    fn every_view_tears_down_to_zero() {
        for route in Route::ALL {
            let mut scheduler = Scheduler::new(16);
            let mut view = MountedView::mount(route, &seeded_config(), (800.0, 600.0), &mut scheduler);
            assert_eq!(view.route(), route);
            view.teardown(&mut scheduler);
            assert_eq!(scheduler.total_listeners(), 0, "{route}");
            assert_eq!(scheduler.pending_frames(), 0, "{route}");
            assert_eq!(scheduler.active_timers(), 0, "{route}");
        }
    }

    #[test]
    fn paths_name_route_and_selection() {
        let mut scheduler = Scheduler::new(16);
        let config = seeded_config();
        let home = MountedView::mount(Route::Home, &config, (800.0, 600.0), &mut scheduler);
        let blog = MountedView::mount(Route::Blog, &config, (800.0, 600.0), &mut scheduler);
        assert_eq!(home.path(), "Home");
        assert_eq!(blog.path(), "Blog/Overview");
    }
}

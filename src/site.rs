//! The running site: one simulated host plus whatever view is mounted.
//!
//! [`Site`] owns the scheduler, the location, the route resolver and the
//! mounted view, and is the only place that routes host activity to them:
//!
//! ```text
//! set_fragment / navigate ──▶ Location (queues change)
//! flush                    ──▶ RouteResolver ──▶ unmount old view, mount new
//! advance(ms)              ──▶ Scheduler::pop_due ──▶ view.on_timer / on_frame
//! pointer_move / resize    ──▶ view (only while a listener is registered)
//! ```
//!
//! Fragment changes are delivered on [`Site::flush`], which [`Site::advance`]
//! also runs first. Top-level route swaps are immediate; only journal
//! sub-navigation is animated.

use crate::blog::NavUpdate;
use crate::config::SiteConfig;
use crate::content::ContentStore;
use crate::render;
use crate::route::{Location, Route, RouteResolver};
use crate::scheduler::{Due, EventKind, Scheduler};
use crate::transition::RequestOutcome;
use crate::views::MountedView;
use maud::Markup;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct Site {
    store: ContentStore,
    config: SiteConfig,
    scheduler: Scheduler,
    location: Location,
    resolver: RouteResolver,
    view: Option<MountedView>,
    viewport: (f64, f64),
    scroll_y: f64,
    /// Transitions started by journal views that have since been unmounted.
    retired_transitions: usize,
}

impl Site {
    /// Boot the site at `fragment`. The initial route is resolved before the
    /// first view mounts.
    pub fn new(store: ContentStore, config: SiteConfig, fragment: &str) -> Self {
        let mut scheduler = Scheduler::new(config.viewport.frame_interval_ms);
        let location = Location::new(fragment);
        let resolver = RouteResolver::attach(&location, &mut scheduler);
        let viewport = (
            f64::from(config.viewport.width),
            f64::from(config.viewport.height),
        );
        let view = MountedView::mount(resolver.current_route(), &config, viewport, &mut scheduler);
        Self {
            store,
            config,
            scheduler,
            location,
            resolver,
            view: Some(view),
            viewport,
            scroll_y: 0.0,
            retired_transitions: 0,
        }
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn view(&self) -> Option<&MountedView> {
        self.view.as_ref()
    }

    pub fn fragment(&self) -> &str {
        self.location.fragment()
    }

    pub fn current_route(&self) -> Route {
        self.resolver.current_route()
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn viewport(&self) -> (f64, f64) {
        self.viewport
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// `Home`, `Collection`, or `Blog/<selection>`.
    pub fn view_path(&self) -> String {
        self.view
            .as_ref()
            .map(MountedView::path)
            .unwrap_or_else(|| "Unmounted".to_string())
    }

    /// Journal exit sequences started since boot, across remounts.
    pub fn transitions_started(&self) -> usize {
        let live = match &self.view {
            Some(MountedView::Blog(view)) => view.transition().started(),
            _ => 0,
        };
        self.retired_transitions + live
    }

    // ------------------------------------------------------------------
    // Location
    // ------------------------------------------------------------------

    /// Write the fragment directly, as a user editing the address would.
    pub fn set_fragment(&mut self, fragment: &str) {
        self.location.set_fragment(fragment);
    }

    pub fn navigate(&mut self, route: Route) {
        self.resolver.navigate(route, &mut self.location);
    }

    /// Deliver queued fragment-change notifications. Returns the number of
    /// route swaps performed.
    pub fn flush(&mut self) -> usize {
        let mut swaps = 0;
        while self.location.take_change() {
            if self.scheduler.listener_count(EventKind::FragmentChange) == 0 {
                continue;
            }
            if let Some(route) = self.resolver.on_fragment_change(&self.location) {
                self.swap_view(route);
                swaps += 1;
            }
        }
        swaps
    }

    fn swap_view(&mut self, route: Route) {
        self.unmount();
        self.view = Some(MountedView::mount(
            route,
            &self.config,
            self.viewport,
            &mut self.scheduler,
        ));
    }

    fn unmount(&mut self) {
        if let Some(mut view) = self.view.take() {
            if let MountedView::Blog(blog) = &view {
                self.retired_transitions += blog.transition().started();
            }
            view.teardown(&mut self.scheduler);
        }
    }

    // ------------------------------------------------------------------
    // Host events
    // ------------------------------------------------------------------

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if self.scheduler.listener_count(EventKind::PointerMove) == 0 {
            return;
        }
        let (width, height) = self.viewport;
        if let Some(view) = self.view.as_mut() {
            view.on_pointer_move(x, y, width, height);
        }
    }

    /// Non-finite or non-positive dimensions are ignored.
    pub fn resize(&mut self, width: f64, height: f64) {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            warn!(width, height, "resize ignored: viewport must be positive");
            return;
        }
        self.viewport = (width, height);
        if self.scheduler.listener_count(EventKind::Resize) == 0 {
            return;
        }
        if let Some(view) = self.view.as_mut() {
            view.on_resize(width, height);
        }
    }

    pub fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y.max(0.0);
    }

    /// Move the virtual clock forward, running everything that comes due in
    /// time order.
    pub fn advance(&mut self, ms: u64) {
        self.flush();
        let until = self.scheduler.now_ms().saturating_add(ms);
        while let Some(due) = self.scheduler.pop_due(until) {
            let Some(view) = self.view.as_mut() else {
                continue;
            };
            match due {
                Due::Timer(id) => {
                    if view.on_timer(id, &mut self.scheduler, &self.store) {
                        self.scroll_y = 0.0;
                        debug!(path = %view.path(), at = self.scheduler.now_ms(), "sub-view applied");
                    }
                }
                Due::Frame(ids) => {
                    for id in ids {
                        view.on_frame(id, &mut self.scheduler);
                    }
                }
            }
        }
        self.scheduler.settle_at(until);
    }

    // ------------------------------------------------------------------
    // Journal actions
    // ------------------------------------------------------------------

    fn request(&mut self, update: NavUpdate) -> Option<RequestOutcome> {
        match self.view.as_mut() {
            Some(MountedView::Blog(view)) => Some(view.request(update, &mut self.scheduler)),
            _ => {
                warn!(?update, route = %self.resolver.current_route(), "journal action ignored outside the journal");
                None
            }
        }
    }

    pub fn select_category(&mut self, id: &str) -> Option<RequestOutcome> {
        self.request(NavUpdate::SelectCategory(id.to_string()))
    }

    pub fn select_post(&mut self, id: &str) -> Option<RequestOutcome> {
        self.request(NavUpdate::SelectPost(id.to_string()))
    }

    pub fn back_to_posts(&mut self) -> Option<RequestOutcome> {
        self.request(NavUpdate::BackToPosts)
    }

    pub fn back_to_categories(&mut self) -> Option<RequestOutcome> {
        self.request(NavUpdate::BackToCategories)
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    pub fn render(&self) -> Markup {
        render::render_site(self)
    }

    /// Unmount the view and stop listening for fragment changes.
    pub fn shutdown(&mut self) {
        self.unmount();
        self.resolver.detach(&mut self.scheduler);
    }
}

//! Fragment-based routing.
//!
//! The location fragment is the only shareable piece of state the site has.
//! Its grammar is tiny:
//!
//! ```text
//! ""            → Home
//! "collection"  → Collection
//! "blog"        → Blog
//! anything else → Home (silently)
//! ```
//!
//! [`Location`] plays the host's addressable location: writing a different
//! fragment queues one change notification, writing the same fragment queues
//! nothing. [`RouteResolver`] owns the current route and only updates it when
//! a notification is delivered, so `navigate` is asynchronous relative to its
//! caller but settled before the next render.

use crate::scheduler::{EventKind, ListenerId, Scheduler};
use std::fmt;
use tracing::debug;

/// Top-level application mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Collection,
    Blog,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Home, Route::Collection, Route::Blog];

    /// Map a fragment to a route. A leading `#` is ignored; unrecognized
    /// values fall back to [`Route::Home`].
    pub fn from_fragment(fragment: &str) -> Self {
        match fragment.strip_prefix('#').unwrap_or(fragment) {
            "collection" => Route::Collection,
            "blog" => Route::Blog,
            _ => Route::Home,
        }
    }

    /// Canonical fragment for the route (empty for Home).
    pub fn fragment(self) -> &'static str {
        match self {
            Route::Home => "",
            Route::Collection => "collection",
            Route::Blog => "blog",
        }
    }

    /// Label used by the navigation menu.
    pub fn menu_label(self) -> &'static str {
        match self {
            Route::Home => "Essence",
            Route::Collection => "Collection",
            Route::Blog => "Journal",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Route::Home => "Home",
            Route::Collection => "Collection",
            Route::Blog => "Blog",
        };
        f.write_str(name)
    }
}

/// The host's addressable location, reduced to its fragment.
#[derive(Debug, Default)]
pub struct Location {
    fragment: String,
    pending_changes: usize,
}

impl Location {
    pub fn new(fragment: &str) -> Self {
        Self {
            fragment: normalize(fragment).to_string(),
            pending_changes: 0,
        }
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Write the fragment. Returns `true` and queues a change notification
    /// when the value actually changed.
    pub fn set_fragment(&mut self, fragment: &str) -> bool {
        let fragment = normalize(fragment);
        if self.fragment == fragment {
            return false;
        }
        self.fragment = fragment.to_string();
        self.pending_changes += 1;
        true
    }

    /// Take one queued change notification, if any.
    pub fn take_change(&mut self) -> bool {
        if self.pending_changes == 0 {
            return false;
        }
        self.pending_changes -= 1;
        true
    }

    pub fn pending_changes(&self) -> usize {
        self.pending_changes
    }
}

fn normalize(fragment: &str) -> &str {
    fragment.strip_prefix('#').unwrap_or(fragment)
}

/// Tracks the active route from fragment-change notifications.
#[derive(Debug)]
pub struct RouteResolver {
    route: Route,
    listener: Option<ListenerId>,
}

impl RouteResolver {
    /// Compute the route from the fragment present right now and start
    /// listening for changes.
    pub fn attach(location: &Location, scheduler: &mut Scheduler) -> Self {
        let route = Route::from_fragment(location.fragment());
        let listener = scheduler.add_listener(EventKind::FragmentChange);
        debug!(fragment = location.fragment(), %route, "route resolver attached");
        Self {
            route,
            listener: Some(listener),
        }
    }

    pub fn current_route(&self) -> Route {
        self.route
    }

    pub fn listener(&self) -> Option<ListenerId> {
        self.listener
    }

    /// Request a route by writing its canonical fragment. The route itself
    /// changes when the notification is delivered.
    pub fn navigate(&self, route: Route, location: &mut Location) {
        let changed = location.set_fragment(route.fragment());
        debug!(%route, changed, "navigate");
    }

    /// Handle a fragment-change notification. Returns the new route if it
    /// differs from the current one.
    pub fn on_fragment_change(&mut self, location: &Location) -> Option<Route> {
        let next = Route::from_fragment(location.fragment());
        if next == self.route {
            return None;
        }
        debug!(from = %self.route, to = %next, "route changed");
        self.route = next;
        Some(next)
    }

    pub fn detach(&mut self, scheduler: &mut Scheduler) {
        if let Some(id) = self.listener.take() {
            scheduler.remove_listener(id);
        }
    }
}

//! Active Section Tracker - Scroll position to active navigation link
//!
//! Derives the active section from the scroll offset and reflects it onto
//! the navigation links:
//! - Scroll ticks are coalesced to one pass per rendering frame
//! - Each pass measures section boundaries fresh and reads the latest offset
//! - A changed active section rewrites the fragment in place (no history
//!   entry, no change notification), so the router never re-runs
//! - Router broadcasts (link clicks, back button) are reflected immediately
//!
//! The first measurement waits for the configured settle delay so late
//! layout (images, fonts) does not skew the initial boundaries.
//!
//! # Example
//!
//! ```ignore
//! let tracker = ActiveSectionTracker::new(&router, page.clone(), &config.navigation);
//!
//! // On every scroll notification
//! tracker.on_scroll();
//! ```

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use spark_signals::Signal;
use tracing::{debug, trace, warn};

use super::router::Router;
use super::scroll::{self, ActivationRules};
use crate::config::NavigationConfig;
use crate::page::Page;
use crate::types::{LinkStyle, Route};

// =============================================================================
// TRACKER
// =============================================================================

pub struct ActiveSectionTracker {
    page: Rc<dyn Page>,
    rules: ActivationRules,
    /// The router's default, read on every pass.
    default_route: Signal<Route>,
    /// Last route reflected onto the links.
    active: RefCell<Option<Route>>,
    /// A frame pass is scheduled and has not run yet.
    frame_pending: Cell<bool>,
    silent_updates: Cell<usize>,
    unsubscribe: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl ActiveSectionTracker {
    /// Create a tracker following `router`.
    ///
    /// Seeds the links from the router's current route, subscribes to its
    /// broadcasts and schedules the first measurement after the settle delay.
    pub fn new(router: &Router, page: Rc<dyn Page>, config: &NavigationConfig) -> Rc<Self> {
        let tracker = Rc::new(Self {
            page,
            rules: ActivationRules::from(config),
            default_route: router.default_route_signal(),
            active: RefCell::new(None),
            frame_pending: Cell::new(false),
            silent_updates: Cell::new(0),
            unsubscribe: RefCell::new(None),
        });

        if tracker.page.nav_links().is_empty() {
            warn!("no navigation links found");
        }

        let weak = Rc::downgrade(&tracker);
        let cleanup = router.on_route_changed(move |event| {
            if let Some(tracker) = weak.upgrade() {
                tracker.set_active(&event.route);
            }
        });
        *tracker.unsubscribe.borrow_mut() = Some(Box::new(cleanup));

        tracker.set_active(&router.get_current_route());

        // Links reflect the route now; only the scroll measurement waits
        // for layout to settle.
        let weak: Weak<Self> = Rc::downgrade(&tracker);
        tracker.page.set_timeout(
            config.settle_delay(),
            Box::new(move || {
                if let Some(tracker) = weak.upgrade() {
                    trace!("layout settled, measuring sections");
                    tracker.update_from_scroll();
                }
            }),
        );

        tracker
    }

    /// Route currently reflected onto the links.
    pub fn active_route(&self) -> Option<Route> {
        self.active.borrow().clone()
    }

    /// Fragment rewrites made by scroll passes so far.
    pub fn silent_update_count(&self) -> usize {
        self.silent_updates.get()
    }

    pub fn is_frame_pending(&self) -> bool {
        self.frame_pending.get()
    }

    // -------------------------------------------------------------------------
    // Computation and reflection
    // -------------------------------------------------------------------------

    /// Active section for the current scroll offset and layout.
    pub fn compute_active_section_from_scroll(&self) -> Route {
        let sections = self.page.sections();
        let default_route = self.default_route.get();
        let previous = self.active.borrow();
        scroll::active_section_at(
            self.page.scroll_y(),
            self.rules,
            &sections,
            previous.as_ref(),
            &default_route,
        )
    }

    /// Mark links targeting `route` active and every other link inactive.
    pub fn reflect_active_link(&self, route: &Route) {
        for link in self.page.nav_links() {
            let style = LinkStyle::for_target(&link.target, route);
            if !self.page.set_link_style(&link.id, style) {
                trace!(link = %link.id, "link vanished before restyle");
            }
        }
    }

    fn set_active(&self, route: &Route) {
        self.reflect_active_link(route);
        *self.active.borrow_mut() = Some(route.clone());
    }

    // -------------------------------------------------------------------------
    // Scroll handling
    // -------------------------------------------------------------------------

    /// Scroll notification. Schedules at most one pass per frame.
    pub fn on_scroll(self: &Rc<Self>) {
        if self.frame_pending.replace(true) {
            return;
        }

        let weak = Rc::downgrade(self);
        self.page.request_frame(Box::new(move || {
            if let Some(tracker) = weak.upgrade() {
                tracker.run_frame();
            }
        }));
    }

    /// The per-frame pass.
    pub fn run_frame(&self) {
        self.frame_pending.set(false);
        self.update_from_scroll();
    }

    fn update_from_scroll(&self) {
        let route = self.compute_active_section_from_scroll();
        self.reflect_active_link(&route);

        let changed = self.active.borrow().as_ref() != Some(&route);
        if changed {
            debug!(%route, "active section changed");
            self.page.replace_fragment(&route);
            self.silent_updates.set(self.silent_updates.get() + 1);
            *self.active.borrow_mut() = Some(route);
        }
    }

    /// Release the router subscription.
    pub fn detach(&self) {
        if let Some(cleanup) = self.unsubscribe.borrow_mut().take() {
            cleanup();
        }
    }
}

impl Drop for ActiveSectionTracker {
    fn drop(&mut self) {
        if let Some(cleanup) = self.unsubscribe.get_mut().take() {
            cleanup();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! Mount API - Navigation lifecycle and event dispatch.
//!
//! This module provides the entry point for mounting the navigation layer on
//! a page. It builds the router, lets the caller register routes before the
//! page's load event, and wires the active-section tracker and the back to
//! top control behind a single event dispatcher.
//!
//! # Example
//!
//! ```ignore
//! use spark_nav::pipeline::mount;
//!
//! let handle = mount::mount(page.clone(), &config, |router| {
//!     router
//!         .add_route(download.clone(), || track_download_view())
//!         .add_route(about.clone(), || {});
//! });
//!
//! // Feed every platform notification, one at a time
//! handle.handle_event(PageEvent::Load);
//!
//! // Clean up
//! handle.unmount();
//! ```

use std::rc::Rc;

use tracing::{debug, trace};

use crate::config::AppConfig;
use crate::page::Page;
use crate::state::{ActiveSectionTracker, BackToTop, Router};
use crate::types::PageEvent;

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by mount() that owns the mounted components.
///
/// Holds references to:
/// - The router (route table, current route)
/// - The active-section tracker (subscribed to the router)
/// - The back to top control
pub struct MountHandle {
    router: Rc<Router>,
    tracker: Rc<ActiveSectionTracker>,
    back_to_top: BackToTop,
}

impl MountHandle {
    pub fn router(&self) -> &Rc<Router> {
        &self.router
    }

    pub fn tracker(&self) -> &Rc<ActiveSectionTracker> {
        &self.tracker
    }

    pub fn back_to_top(&self) -> &BackToTop {
        &self.back_to_top
    }

    /// Dispatch one platform event, running it to completion.
    pub fn handle_event(&self, event: PageEvent) {
        trace!(?event, "page event");
        match event {
            PageEvent::Load | PageEvent::HashChange => self.router.handle_route_change(),
            PageEvent::Scroll => {
                self.tracker.on_scroll();
                self.back_to_top.on_scroll();
            }
            PageEvent::LinkClick(route) => self.router.navigate(&route),
            PageEvent::Click { target } => {
                if target == self.back_to_top.element_id() {
                    self.back_to_top.on_click();
                }
            }
        }
    }

    /// Release the tracker's router subscription and drop the components.
    pub fn unmount(self) {
        self.tracker.detach();
        debug!("navigation unmounted");
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Mount the navigation layer on `page`.
///
/// This sets up:
/// 1. The router with the configured default route and scroll offset
/// 2. Route registration through `register`, before any load event
///    (`register` may still override the default route)
/// 3. The active-section tracker, seeded from the router's current route
/// 4. The back to top control
///
/// Returns a MountHandle that dispatches page events.
pub fn mount<F>(page: Rc<dyn Page>, config: &AppConfig, register: F) -> MountHandle
where
    F: FnOnce(&Router),
{
    let router = Rc::new(Router::new(page.clone(), &config.navigation));
    register(&router);

    let tracker = ActiveSectionTracker::new(&router, page.clone(), &config.navigation);
    let back_to_top = BackToTop::new(page, config);

    debug!(default_route = %router.default_route(), "navigation mounted");

    MountHandle {
        router,
        tracker,
        back_to_top,
    }
}

/// Unmount the navigation layer.
pub fn unmount(handle: MountHandle) {
    handle.unmount();
}

//! Router - URL fragment to section actions
//!
//! Owns the route table and the canonical current route:
//! - `add_route` / `set_default` - chained registration at startup
//! - `navigate` - programmatic fragment change
//! - `handle_route_change` - reconciliation, run on load and on every
//!   fragment change notification
//! - `get_current_route` - the committed route, or what the page implies
//!
//! Reconciliation always scrolls to the resolved section. It only commits,
//! runs the route's callback and broadcasts when the route differs from the
//! committed one. That duplicate check is what keeps the router and the
//! active-section tracker from notifying each other forever.
//!
//! # Example
//!
//! ```ignore
//! let router = Router::new(page.clone(), &config.navigation);
//! router
//!     .add_route(download.clone(), || show_store_badges())
//!     .add_route(about.clone(), || {})
//!     .set_default(download);
//!
//! let cleanup = router.on_route_changed(|event| println!("{}", event.route));
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use spark_signals::{signal, Signal};
use tracing::{debug, trace, warn};

use super::channel::{RouteChannel, RouteChanged};
use super::scroll;
use crate::config::NavigationConfig;
use crate::page::Page;
use crate::types::Route;

/// Side effect registered for a route.
pub type RouteCallback = Rc<dyn Fn()>;

// =============================================================================
// ROUTER
// =============================================================================

pub struct Router {
    page: Rc<dyn Page>,
    routes: RefCell<HashMap<Route, RouteCallback>>,
    /// Shared with the tracker, so a late `set_default` reaches both.
    default_route: Signal<Route>,
    /// Single writer: only `commit` sets it.
    current: Signal<Option<Route>>,
    channel: RouteChannel,
    scroll_offset: f64,
}

impl Router {
    pub fn new(page: Rc<dyn Page>, config: &NavigationConfig) -> Self {
        Self {
            page,
            routes: RefCell::new(HashMap::new()),
            default_route: signal(config.default_route.clone()),
            current: signal(None),
            channel: RouteChannel::new(),
            scroll_offset: config.offset_top,
        }
    }

    // -------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------

    /// Register `callback` under `route`. A second registration replaces the first.
    pub fn add_route<F>(&self, route: Route, callback: F) -> &Self
    where
        F: Fn() + 'static,
    {
        let replaced = self
            .routes
            .borrow_mut()
            .insert(route.clone(), Rc::new(callback));
        if replaced.is_some() {
            debug!(%route, "route callback replaced");
        }
        self
    }

    /// Route used when the fragment is empty.
    pub fn set_default(&self, route: Route) -> &Self {
        self.default_route.set(route);
        self
    }

    pub fn default_route(&self) -> Route {
        self.default_route.get()
    }

    /// Handle onto the default route, following later `set_default` calls.
    pub fn default_route_signal(&self) -> Signal<Route> {
        self.default_route.clone()
    }

    pub fn has_route(&self, route: &Route) -> bool {
        self.routes.borrow().contains_key(route)
    }

    // -------------------------------------------------------------------------
    // Notifications
    // -------------------------------------------------------------------------

    pub fn channel(&self) -> &RouteChannel {
        &self.channel
    }

    /// Subscribe to committed route changes.
    /// Returns cleanup function.
    pub fn on_route_changed<F>(&self, handler: F) -> impl FnOnce() + use<F>
    where
        F: Fn(&RouteChanged) + 'static,
    {
        self.channel.subscribe(handler)
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Change the fragment to `route`.
    ///
    /// When the fragment differs, the page's change notification drives
    /// reconciliation. When it already matches, the page stays silent, so
    /// reconciliation runs here: the scroll happens, the duplicate check
    /// suppresses the rest.
    pub fn navigate(&self, route: &Route) {
        if self.page.fragment() == route.to_fragment() {
            trace!(%route, "navigate to current fragment");
            self.handle_route_change();
            return;
        }
        self.page.assign_fragment(route);
    }

    /// The committed route, else the route in the fragment, else the default.
    pub fn get_current_route(&self) -> Route {
        self.current
            .get()
            .or_else(|| Route::from_fragment(&self.page.fragment()))
            .unwrap_or_else(|| self.default_route())
    }

    /// Reconcile with the current fragment.
    pub fn handle_route_change(&self) {
        let route = self.resolve_fragment();

        scroll::scroll_to_section(&*self.page, &route, self.scroll_offset);

        if self.current.get().as_ref() == Some(&route) {
            trace!(%route, "route unchanged, suppressing callback and broadcast");
            return;
        }

        self.commit(route.clone());

        // Clone out so the callback may re-enter the router.
        let callback = self.routes.borrow().get(&route).cloned();
        match callback {
            Some(callback) => callback(),
            None => trace!(%route, "no callback registered"),
        }

        self.channel.publish(&RouteChanged::new(route));
    }

    fn resolve_fragment(&self) -> Route {
        let raw = self.page.fragment();
        match Route::from_fragment(&raw) {
            Some(route) => route,
            None => {
                if raw.len() > 1 {
                    warn!(fragment = %raw, "unusable fragment, using default route");
                }
                self.default_route()
            }
        }
    }

    fn commit(&self, route: Route) {
        debug!(%route, "route committed");
        self.current.set(Some(route));
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{HeadlessPage, Location, Viewport};
    use crate::types::PageEvent;
    use std::cell::Cell;

    fn route(name: &str) -> Route {
        Route::new(name).unwrap()
    }

    fn page() -> HeadlessPage {
        HeadlessPage::new()
            .with_section(route("download"), 0.0, 800.0)
            .with_section(route("about"), 800.0, 800.0)
            .with_section(route("contact"), 1600.0, 800.0)
    }

    fn setup(page: HeadlessPage) -> (Rc<HeadlessPage>, Router) {
        let page = page.into_rc();
        let router = Router::new(page.clone(), &NavigationConfig::default());
        (page, router)
    }

    fn counter() -> (Rc<Cell<u32>>, impl Fn() + 'static) {
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        (count, move || count_clone.set(count_clone.get() + 1))
    }

    #[test]
    fn test_empty_fragment_resolves_to_default() {
        let (_page, router) = setup(page());
        let (count, callback) = counter();
        router
            .add_route(route("download"), callback)
            .set_default(route("download"));

        router.handle_route_change();

        assert_eq!(router.get_current_route(), route("download"));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_duplicate_reconciliation_is_suppressed() {
        let (page, router) = setup(page().with_fragment("#about"));
        let (count, callback) = counter();
        router.add_route(route("about"), callback);

        let broadcasts = Rc::new(Cell::new(0));
        let broadcasts_clone = broadcasts.clone();
        let _cleanup = router.on_route_changed(move |_| {
            broadcasts_clone.set(broadcasts_clone.get() + 1);
        });

        router.handle_route_change();
        router.handle_route_change();

        assert_eq!(count.get(), 1);
        assert_eq!(broadcasts.get(), 1);
        // scroll step ran both times
        assert_eq!(page.scroll_to_calls(), 2);
    }

    #[test]
    fn test_registration_overwrite() {
        let (_page, router) = setup(page().with_fragment("#x"));
        let (first, f1) = counter();
        let (second, f2) = counter();

        router.add_route(route("x"), f1).add_route(route("x"), f2);
        router.handle_route_change();

        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn test_unregistered_route_still_scrolls_and_broadcasts() {
        let (page, router) = setup(page().with_fragment("#contact"));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        let _cleanup = router.on_route_changed(move |event| {
            seen_clone.borrow_mut().push(event.route.clone());
        });

        router.handle_route_change();

        assert_eq!(page.scroll_y(), 1600.0 - 80.0);
        assert_eq!(*seen.borrow(), vec![route("contact")]);
    }

    #[test]
    fn test_missing_section_skips_scroll_only() {
        let (page, router) = setup(page().with_fragment("#pricing"));
        let (count, callback) = counter();
        router.add_route(route("pricing"), callback);

        router.handle_route_change();

        assert_eq!(page.scroll_to_calls(), 0);
        assert_eq!(count.get(), 1);
        assert_eq!(router.get_current_route(), route("pricing"));
    }

    #[test]
    fn test_navigate_assigns_fragment() {
        let (page, router) = setup(page());

        router.navigate(&route("about"));

        assert_eq!(page.fragment(), "#about");
        assert_eq!(page.next_event(), Some(PageEvent::HashChange));
        // commit waits for the notification
        assert_eq!(router.get_current_route(), route("about"));
        assert_eq!(page.scroll_to_calls(), 0);
    }

    #[test]
    fn test_navigate_to_current_route_scrolls_without_callback() {
        let (page, router) = setup(page().with_fragment("#about"));
        let (count, callback) = counter();
        router.add_route(route("about"), callback);
        router.handle_route_change();
        assert_eq!(count.get(), 1);

        page.user_scroll_to(2000.0);
        while page.next_event().is_some() {}

        router.navigate(&route("about"));

        // scrolled back, but no fragment change was queued
        assert_eq!(page.next_event(), Some(PageEvent::Scroll));
        assert_eq!(page.next_event(), None);
        assert_eq!(page.scroll_y(), 800.0 - 80.0);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_get_current_route_fallbacks() {
        let (page, router) = setup(page());
        router.set_default(route("contact"));
        assert_eq!(router.get_current_route(), route("contact"));

        page.replace_fragment(&route("about"));
        assert_eq!(router.get_current_route(), route("about"));

        page.replace_fragment(&route("download"));
        router.handle_route_change();
        page.replace_fragment(&route("about"));
        // committed route wins over the live fragment
        assert_eq!(router.get_current_route(), route("download"));
    }

    #[test]
    fn test_unusable_fragment_uses_default() {
        let (_page, router) = setup(page().with_fragment("##about"));
        router.handle_route_change();
        assert_eq!(router.get_current_route(), route("download"));
    }

    #[test]
    fn test_callback_can_navigate() {
        let page = page().into_rc();
        let router = Rc::new(Router::new(page.clone(), &NavigationConfig::default()));

        let weak = Rc::downgrade(&router);
        router.add_route(route("download"), move || {
            if let Some(router) = weak.upgrade() {
                router.navigate(&route("about"));
            }
        });

        router.handle_route_change();

        assert_eq!(page.fragment(), "#about");
        assert_eq!(router.get_current_route(), route("download"));
    }
}

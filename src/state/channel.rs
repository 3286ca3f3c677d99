//! Route Channel - Route change notifications
//!
//! The publish point between the router and anything that follows the
//! current route. Owned by the [`Router`](super::Router); consumers hold a
//! cleanup closure rather than a reference to the router.
//!
//! # API
//!
//! - `subscribe(handler)` - Register a handler, returns cleanup function
//! - `publish(event)` - Deliver synchronously, in registration order
//! - `last_event()` - Last published event
//!
//! # Example
//!
//! ```ignore
//! let channel = RouteChannel::new();
//!
//! let cleanup = channel.subscribe(|event| {
//!     println!("now at {}", event.route);
//! });
//!
//! channel.publish(&RouteChanged::new(route));
//! cleanup();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{signal, Signal};

use crate::types::Route;

// =============================================================================
// TYPES
// =============================================================================

/// Payload of every route change notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteChanged {
    pub route: Route,
}

impl RouteChanged {
    pub fn new(route: Route) -> Self {
        Self { route }
    }
}

/// Handler for route change notifications.
pub type RouteHandler = Rc<dyn Fn(&RouteChanged)>;

// =============================================================================
// SUBSCRIBER REGISTRY
// =============================================================================

struct Subscribers {
    handlers: Vec<(usize, RouteHandler)>,
    next_id: usize,
}

impl Subscribers {
    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Ordered observer list for [`RouteChanged`] events.
///
/// Cloning yields another handle onto the same list.
#[derive(Clone)]
pub struct RouteChannel {
    subscribers: Rc<RefCell<Subscribers>>,
    last_event: Signal<Option<RouteChanged>>,
}

impl Default for RouteChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteChannel {
    pub fn new() -> Self {
        Self {
            subscribers: Rc::new(RefCell::new(Subscribers {
                handlers: Vec::new(),
                next_id: 0,
            })),
            last_event: signal(None),
        }
    }

    /// Subscribe to route changes.
    /// Returns cleanup function.
    pub fn subscribe<F>(&self, handler: F) -> impl FnOnce() + use<F>
    where
        F: Fn(&RouteChanged) + 'static,
    {
        let id = {
            let mut subs = self.subscribers.borrow_mut();
            let id = subs.next_id();
            subs.handlers.push((id, Rc::new(handler)));
            id
        };

        let subscribers = Rc::downgrade(&self.subscribers);
        move || {
            if let Some(subscribers) = subscribers.upgrade() {
                subscribers
                    .borrow_mut()
                    .handlers
                    .retain(|(handler_id, _)| *handler_id != id);
            }
        }
    }

    /// Deliver `event` to every current subscriber before returning.
    ///
    /// The subscriber list is snapshotted first: handlers added or removed
    /// during delivery take effect from the next publish.
    pub fn publish(&self, event: &RouteChanged) {
        self.last_event.set(Some(event.clone()));

        let handlers: Vec<RouteHandler> = self
            .subscribers
            .borrow()
            .handlers
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();

        for handler in handlers {
            handler(event);
        }
    }

    /// The most recently published event.
    pub fn last_event(&self) -> Option<RouteChanged> {
        self.last_event.get()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().handlers.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================

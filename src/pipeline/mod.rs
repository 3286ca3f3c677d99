//! Navigation Pipeline
//!
//! Connects platform events to the navigation state machines.
//!
//! ```text
//! Load / HashChange → Router::handle_route_change → RouteChanged → tracker reflect
//! Scroll            → tracker frame pass (silent fragment rewrite) + back to top
//! LinkClick         → Router::navigate → HashChange
//! ```
//!
//! Every event runs to completion before the next is dispatched. That is
//! what makes the router's duplicate check sufficient without locking.

pub mod mount;

// Re-exports
pub use mount::{mount, unmount, MountHandle};

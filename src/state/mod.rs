//! State Module - Runtime navigation state
//!
//! The state machines that keep the URL fragment, the scroll position and
//! the navigation links consistent:
//!
//! - **Router** - Route table, canonical current route, reconciliation
//! - **Channel** - Route change notifications between components
//! - **Tracker** - Active section from scroll position, link reflection
//! - **Scroll** - Scroll-to-section and the active section lookup
//! - **Back to top** - Scroll-driven visibility of the return control

mod back_to_top;
mod channel;
mod router;
mod scroll;
mod tracker;

pub use back_to_top::*;
pub use channel::*;
pub use router::*;
pub use scroll::*;
pub use tracker::*;

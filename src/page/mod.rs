//! Page Module - The browser-side collaborators
//!
//! The navigation core never touches a browser directly. Everything it needs
//! from the page goes through three small traits:
//!
//! - [`Document`] - section geometry, navigation links, element styling
//! - [`Viewport`] - scroll position, frame scheduling, timers
//! - [`Location`] - the URL fragment and its two write modes
//!
//! [`Page`] bundles all three. Every query treats "not found" as a normal
//! outcome (`None` / `false`), never as an error.
//!
//! [`HeadlessPage`] implements the traits in memory with browser semantics,
//! for tests and for driving the core outside a browser.

mod headless;

pub use headless::*;

use std::time::Duration;

use crate::types::{LinkStyle, NavLink, Route, SectionBoundary};

/// Callback run on the next rendering frame.
pub type FrameCallback = Box<dyn FnOnce()>;

/// Callback run once after a delay.
pub type TimerCallback = Box<dyn FnOnce()>;

// =============================================================================
// COLLABORATOR TRAITS
// =============================================================================

/// Read and restyle elements.
pub trait Document {
    /// Every element carrying a section id, measured now, in document order.
    fn sections(&self) -> Vec<SectionBoundary>;

    /// Every navigation link that declares a target section.
    fn nav_links(&self) -> Vec<NavLink>;

    /// Absolute top offset of the element with this id.
    fn element_top(&self, id: &str) -> Option<f64>;

    /// Apply a visual state to a link. Returns `false` if the link is gone.
    fn set_link_style(&self, link_id: &str, style: LinkStyle) -> bool;

    /// Show or hide an element. Returns `false` if the element is missing.
    fn set_hidden(&self, id: &str, hidden: bool) -> bool;
}

/// Scroll position and the page's scheduling primitives.
pub trait Viewport {
    /// Current vertical scroll offset in pixels.
    fn scroll_y(&self) -> f64;

    /// Scroll the viewport so its top sits at `top`.
    fn scroll_to(&self, top: f64);

    /// Run `callback` once, on the next rendering frame.
    fn request_frame(&self, callback: FrameCallback);

    /// Run `callback` once, after `delay`.
    fn set_timeout(&self, delay: Duration, callback: TimerCallback);
}

/// The URL fragment.
///
/// Contract for implementors: `assign_fragment` must only queue a
/// fragment-change notification when the new value differs from the current
/// one. Platforms that notify unconditionally have to compare first.
pub trait Location {
    /// Raw fragment including the leading `#`, or empty.
    fn fragment(&self) -> String;

    /// Set the fragment, pushing a history entry.
    fn assign_fragment(&self, route: &Route);

    /// Set the fragment in place. No history entry, no notification.
    fn replace_fragment(&self, route: &Route);
}

/// Everything the navigation layer needs from the page.
pub trait Page: Document + Viewport + Location {}

impl<T: Document + Viewport + Location> Page for T {}

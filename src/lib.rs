//! # spark-nav
//!
//! Hash-based section navigation for single-page sites.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for the
//! canonical current route.
//!
//! ## Architecture
//!
//! Three signals are kept mutually consistent without a page reload: the URL
//! fragment, the scroll position, and the "active" state of navigation links.
//!
//! ```text
//! Link click → navigate → fragment change → Router → RouteChanged → Tracker → links
//! Scroll → (one pass per frame) → Tracker → links + silent fragment rewrite
//! ```
//!
//! The router is the only writer of the current route and suppresses
//! duplicate reconciliations. The tracker rewrites the fragment in place, so
//! scroll-driven updates never re-enter the router.
//!
//! ## Modules
//!
//! - [`types`] - Core types (Route, SectionBoundary, NavLink, PageEvent)
//! - [`page`] - Page collaborator traits and the in-memory [`HeadlessPage`]
//! - [`state`] - Router, route channel, active-section tracker, scrolling
//! - [`pipeline`] - Mount API and event dispatch
//! - [`config`] - TOML configuration

pub mod config;
pub mod error;
pub mod page;
pub mod pipeline;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{AnimationConfig, AppConfig, NavigationConfig, Selectors};

pub use error::{ConfigError, RouteError};

pub use page::{Document, HeadlessPage, Location, Page, Viewport};

pub use pipeline::{mount, unmount, MountHandle};

pub use state::{
    // Router
    Router, RouteCallback,
    // Channel
    RouteChannel, RouteChanged, RouteHandler,
    // Tracker
    ActiveSectionTracker,
    // Scroll
    active_section_at, scroll_to_section, scroll_to_top, ActivationRules,
    // Back to top
    BackToTop,
};

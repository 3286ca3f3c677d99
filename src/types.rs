//! Core types for spark-nav.
//!
//! These types flow between the router, the active-section tracker and the
//! page collaborators. They carry no behaviour beyond validation and
//! geometry.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RouteError;

// =============================================================================
// Route
// =============================================================================

/// Identifier of a page section, as carried in the URL fragment.
///
/// Case-sensitive, never empty, never contains `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Route(String);

impl Route {
    /// Validate and wrap a route name.
    pub fn new(name: impl Into<String>) -> Result<Self, RouteError> {
        let name = name.into();
        if name.is_empty() {
            return Err(RouteError::Empty);
        }
        if name.contains('#') {
            return Err(RouteError::ContainsHash(name));
        }
        Ok(Self(name))
    }

    /// Wrap a compile-time literal known to be valid.
    pub(crate) fn from_literal(name: &'static str) -> Self {
        debug_assert!(!name.is_empty() && !name.contains('#'));
        Self(name.to_string())
    }

    /// Parse a raw URL fragment (`"#about"`, `"about"` or `""`).
    ///
    /// One leading `#` is stripped. Returns `None` when nothing usable is
    /// left, which callers resolve to the default route.
    pub fn from_fragment(raw: &str) -> Option<Self> {
        let name = raw.strip_prefix('#').unwrap_or(raw);
        Self::new(name).ok()
    }

    /// The route name without any `#`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The route formatted as a URL fragment.
    pub fn to_fragment(&self) -> String {
        format!("#{}", self.0)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Route {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Route {
    type Error = RouteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Route {
    type Error = RouteError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Route> for String {
    fn from(route: Route) -> Self {
        route.0
    }
}

// =============================================================================
// Section geometry
// =============================================================================

/// A section's vertical extent, measured at one instant.
///
/// Never cached across scroll ticks: layout moves as images and fonts load.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBoundary {
    pub id: Route,
    pub top: f64,
    pub height: f64,
}

impl SectionBoundary {
    pub fn new(id: Route, top: f64, height: f64) -> Self {
        Self { id, top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Half-open containment: `[top, top + height)`.
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }
}

// =============================================================================
// Navigation links
// =============================================================================

/// A navigation link element and the section it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    /// Element identifier used to address the link when restyling it.
    pub id: String,
    /// Section declared by the link's `href="#..."`.
    pub target: Route,
}

impl NavLink {
    pub fn new(id: impl Into<String>, target: Route) -> Self {
        Self {
            id: id.into(),
            target,
        }
    }
}

/// Visual state written onto a navigation link.
///
/// `underline` is the indicator width as a fraction of the link width.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinkStyle {
    pub active: bool,
    pub underline: f32,
}

impl LinkStyle {
    /// Active link: marked, underline at full width.
    pub const ACTIVE: Self = Self {
        active: true,
        underline: 1.0,
    };

    /// Any other link: unmarked, underline collapsed.
    pub const INACTIVE: Self = Self {
        active: false,
        underline: 0.0,
    };

    pub fn for_target(target: &Route, active: &Route) -> Self {
        if target == active {
            Self::ACTIVE
        } else {
            Self::INACTIVE
        }
    }
}

// =============================================================================
// Page events
// =============================================================================

/// Platform notifications the navigation layer reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// The page finished loading.
    Load,
    /// The URL fragment changed (user edit, back button, or `assign`).
    HashChange,
    /// The viewport scrolled.
    Scroll,
    /// A navigation link was activated.
    LinkClick(Route),
    /// Some other element was clicked.
    Click { target: String },
}

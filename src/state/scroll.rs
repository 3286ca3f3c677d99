//! Scroll Module - Section scrolling and active section geometry
//!
//! Manages the scroll side of navigation:
//! - Scroll-to-section with a fixed offset under the sticky header
//! - Scroll to top
//! - Active section lookup from a scroll offset
//!
//! Architecture:
//! - Section boundaries are measured by the page on every call, never cached
//! - The lookup is a pure function so the tracker can feed it fresh state

use tracing::trace;

use crate::config::NavigationConfig;
use crate::page::Page;
use crate::types::{Route, SectionBoundary};

// =============================================================================
// SCROLL OPERATIONS
// =============================================================================

/// Scroll so the section's top sits `offset` pixels below the viewport top.
///
/// Does nothing (returns `false`) if no element carries the route's id.
pub fn scroll_to_section(page: &dyn Page, route: &Route, offset: f64) -> bool {
    let Some(top) = page.element_top(route.as_str()) else {
        trace!(%route, "scroll target not found");
        return false;
    };

    let target = (top - offset).max(0.0);
    page.scroll_to(target);
    true
}

/// Scroll the viewport to the very top.
pub fn scroll_to_top(page: &dyn Page) {
    page.scroll_to(0.0);
}

// =============================================================================
// ACTIVE SECTION
// =============================================================================

/// Tuning values for the active section lookup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActivationRules {
    /// Added to the scroll offset, biasing toward the section entering view.
    pub lookahead: f64,
    /// Offsets strictly below this force the default route.
    pub top_threshold: f64,
}

impl From<&NavigationConfig> for ActivationRules {
    fn from(config: &NavigationConfig) -> Self {
        Self {
            lookahead: config.activation_lookahead,
            top_threshold: config.top_threshold,
        }
    }
}

/// Which section is active at scroll offset `y`.
///
/// - `y` below the top threshold: the default route
/// - otherwise the first section (document order) containing `y + lookahead`
/// - no containing section: `previous`, or the default route if there is none
pub fn active_section_at(
    y: f64,
    rules: ActivationRules,
    sections: &[SectionBoundary],
    previous: Option<&Route>,
    default: &Route,
) -> Route {
    if y < rules.top_threshold {
        return default.clone();
    }

    let probe = y + rules.lookahead;
    sections
        .iter()
        .find(|section| section.contains(probe))
        .map(|section| &section.id)
        .or(previous)
        .unwrap_or(default)
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{HeadlessPage, Viewport};

    fn route(name: &str) -> Route {
        Route::new(name).unwrap()
    }

    fn sections() -> Vec<SectionBoundary> {
        vec![
            SectionBoundary::new(route("a"), 0.0, 300.0),
            SectionBoundary::new(route("b"), 300.0, 400.0),
            SectionBoundary::new(route("c"), 700.0, 300.0),
        ]
    }

    const RULES: ActivationRules = ActivationRules {
        lookahead: 200.0,
        top_threshold: 100.0,
    };

    #[test]
    fn test_lookahead_selects_entering_section() {
        // 150 + 200 = 350 lies in b
        let active = active_section_at(150.0, RULES, &sections(), None, &route("a"));
        assert_eq!(active, route("b"));

        // 550 + 200 = 750 lies in c
        let active = active_section_at(550.0, RULES, &sections(), None, &route("a"));
        assert_eq!(active, route("c"));
    }

    #[test]
    fn test_top_threshold_forces_default() {
        // 50 + 200 = 250 would be a, but the default wins regardless
        let active =
            active_section_at(50.0, RULES, &sections(), Some(&route("c")), &route("home"));
        assert_eq!(active, route("home"));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let active = active_section_at(100.0, RULES, &sections(), None, &route("home"));
        assert_eq!(active, route("b"));
    }

    #[test]
    fn test_boundary_belongs_to_lower_section() {
        // 500 + 200 = 700: exactly c's top, b's exclusive bottom
        let active = active_section_at(500.0, RULES, &sections(), None, &route("a"));
        assert_eq!(active, route("c"));
    }

    #[test]
    fn test_no_match_retains_previous() {
        let gapped = vec![
            SectionBoundary::new(route("a"), 0.0, 300.0),
            SectionBoundary::new(route("b"), 500.0, 300.0),
        ];

        // 200 + 200 = 400 falls in the gap
        let active = active_section_at(200.0, RULES, &gapped, Some(&route("a")), &route("a"));
        assert_eq!(active, route("a"));

        // past the end of the document
        let active = active_section_at(5000.0, RULES, &gapped, Some(&route("b")), &route("a"));
        assert_eq!(active, route("b"));
    }

    #[test]
    fn test_no_match_without_previous_uses_default() {
        let active = active_section_at(5000.0, RULES, &sections(), None, &route("a"));
        assert_eq!(active, route("a"));
    }

    #[test]
    fn test_overlap_prefers_document_order() {
        let overlapping = vec![
            SectionBoundary::new(route("x"), 0.0, 1000.0),
            SectionBoundary::new(route("y"), 200.0, 400.0),
        ];
        let active = active_section_at(300.0, RULES, &overlapping, None, &route("x"));
        assert_eq!(active, route("x"));
    }

    #[test]
    fn test_scroll_to_section_applies_offset() {
        let page = HeadlessPage::new()
            .with_section(route("a"), 0.0, 500.0)
            .with_section(route("b"), 500.0, 1500.0);

        assert!(scroll_to_section(&page, &route("b"), 80.0));
        assert_eq!(page.scroll_y(), 420.0);
    }

    #[test]
    fn test_scroll_to_section_clamps_at_zero() {
        let page = HeadlessPage::new().with_section(route("a"), 40.0, 500.0);
        page.user_scroll_to(300.0);

        assert!(scroll_to_section(&page, &route("a"), 80.0));
        assert_eq!(page.scroll_y(), 0.0);
    }

    #[test]
    fn test_scroll_to_missing_section_is_noop() {
        let page = HeadlessPage::new().with_section(route("a"), 0.0, 500.0);
        page.user_scroll_to(200.0);

        assert!(!scroll_to_section(&page, &route("zzz"), 80.0));
        assert_eq!(page.scroll_y(), 200.0);
        assert_eq!(page.scroll_to_calls(), 0);
    }

    #[test]
    fn test_scroll_to_top() {
        let page = HeadlessPage::new().with_section(route("a"), 0.0, 2000.0);
        page.user_scroll_to(900.0);

        scroll_to_top(&page);
        assert_eq!(page.scroll_y(), 0.0);
    }
}

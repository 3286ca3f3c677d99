//! Headless Page - In-memory page with browser semantics
//!
//! Implements [`Document`], [`Viewport`] and [`Location`] without a browser,
//! reproducing the behaviours the navigation core depends on:
//!
//! - Programmatic scrolls that move the viewport queue a `Scroll` event
//! - `assign_fragment` pushes a history entry and queues `HashChange` only
//!   when the fragment actually changes
//! - `replace_fragment` rewrites the current history entry silently
//! - Frame callbacks requested during a frame run on the next frame
//! - Timers fire against a virtual clock advanced by the driver
//!
//! # Example
//!
//! ```ignore
//! use spark_nav::{HeadlessPage, Route};
//!
//! let about = Route::new("about")?;
//! let page = HeadlessPage::new()
//!     .with_section(about.clone(), 0.0, 600.0)
//!     .with_link("nav-about", about)
//!     .into_rc();
//!
//! page.load();
//! page.pump(&handle);
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use super::{Document, FrameCallback, Location, TimerCallback, Viewport};
use crate::pipeline::MountHandle;
use crate::types::{LinkStyle, NavLink, PageEvent, Route, SectionBoundary};

// =============================================================================
// STATE
// =============================================================================

struct Timer {
    due: Duration,
    seq: u64,
    callback: TimerCallback,
}

struct PageState {
    sections: Vec<SectionBoundary>,
    links: Vec<NavLink>,
    link_styles: HashMap<String, LinkStyle>,
    /// Non-section elements by id, with their hidden flag.
    elements: HashMap<String, bool>,
    viewport_height: f64,
    scroll_y: f64,
    scroll_to_calls: usize,
    /// History entries (raw fragments) and the index of the current one.
    history: Vec<String>,
    history_index: usize,
    events: VecDeque<PageEvent>,
    frames: Vec<FrameCallback>,
    timers: Vec<Timer>,
    timer_seq: u64,
    now: Duration,
}

impl PageState {
    fn fragment(&self) -> &str {
        &self.history[self.history_index]
    }

    fn max_scroll(&self) -> f64 {
        let document_height = self
            .sections
            .iter()
            .map(SectionBoundary::bottom)
            .fold(0.0, f64::max);
        (document_height - self.viewport_height).max(0.0)
    }

    /// Move the viewport, queueing a scroll event if it actually moved.
    fn move_viewport(&mut self, y: f64) -> bool {
        let clamped = y.clamp(0.0, self.max_scroll());
        if clamped == self.scroll_y {
            return false;
        }
        self.scroll_y = clamped;
        self.events.push_back(PageEvent::Scroll);
        true
    }

    /// Push a history entry, queueing a hash change if the fragment differs.
    fn push_fragment(&mut self, fragment: String) -> bool {
        if self.fragment() == fragment {
            return false;
        }
        self.history.truncate(self.history_index + 1);
        self.history.push(fragment);
        self.history_index += 1;
        self.events.push_back(PageEvent::HashChange);
        true
    }
}

// =============================================================================
// HEADLESS PAGE
// =============================================================================

/// In-memory page. Build it, wrap it in an `Rc`, hand it to `mount`.
pub struct HeadlessPage {
    state: RefCell<PageState>,
}

impl Default for HeadlessPage {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessPage {
    /// Empty page: no sections, no links, empty fragment, scrolled to top.
    pub fn new() -> Self {
        Self {
            state: RefCell::new(PageState {
                sections: Vec::new(),
                links: Vec::new(),
                link_styles: HashMap::new(),
                elements: HashMap::new(),
                viewport_height: 0.0,
                scroll_y: 0.0,
                scroll_to_calls: 0,
                history: vec![String::new()],
                history_index: 0,
                events: VecDeque::new(),
                frames: Vec::new(),
                timers: Vec::new(),
                timer_seq: 0,
                now: Duration::ZERO,
            }),
        }
    }

    // -------------------------------------------------------------------------
    // Builder
    // -------------------------------------------------------------------------

    /// Append a section (document order is insertion order).
    pub fn with_section(self, id: Route, top: f64, height: f64) -> Self {
        self.state
            .borrow_mut()
            .sections
            .push(SectionBoundary::new(id, top, height));
        self
    }

    /// Append a navigation link pointing at `target`.
    pub fn with_link(self, link_id: impl Into<String>, target: Route) -> Self {
        {
            let mut state = self.state.borrow_mut();
            let link = NavLink::new(link_id, target);
            state.link_styles.insert(link.id.clone(), LinkStyle::default());
            state.links.push(link);
        }
        self
    }

    /// Add a plain element, initially hidden.
    pub fn with_element(self, id: impl Into<String>) -> Self {
        self.state.borrow_mut().elements.insert(id.into(), true);
        self
    }

    /// Start with this raw fragment as the current history entry.
    pub fn with_fragment(self, fragment: impl Into<String>) -> Self {
        {
            let mut state = self.state.borrow_mut();
            let index = state.history_index;
            state.history[index] = fragment.into();
        }
        self
    }

    /// Viewport height, which bounds the maximum scroll offset.
    pub fn with_viewport_height(self, height: f64) -> Self {
        self.state.borrow_mut().viewport_height = height;
        self
    }

    pub fn into_rc(self) -> Rc<Self> {
        Rc::new(self)
    }

    // -------------------------------------------------------------------------
    // User actions
    // -------------------------------------------------------------------------

    /// The page finished loading.
    pub fn load(&self) {
        self.state.borrow_mut().events.push_back(PageEvent::Load);
    }

    /// The user scrolled. Returns `true` if the viewport moved.
    pub fn user_scroll_to(&self, y: f64) -> bool {
        self.state.borrow_mut().move_viewport(y)
    }

    /// The user edited the fragment in the address bar.
    pub fn user_set_fragment(&self, fragment: impl Into<String>) -> bool {
        self.state.borrow_mut().push_fragment(fragment.into())
    }

    /// The user pressed the back button. Returns `false` at the oldest entry.
    pub fn back(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.history_index == 0 {
            return false;
        }
        let before = state.fragment().to_string();
        state.history_index -= 1;
        if state.fragment() != before {
            state.events.push_back(PageEvent::HashChange);
        }
        true
    }

    pub fn click_link(&self, target: Route) {
        self.state
            .borrow_mut()
            .events
            .push_back(PageEvent::LinkClick(target));
    }

    pub fn click(&self, target: impl Into<String>) {
        self.state.borrow_mut().events.push_back(PageEvent::Click {
            target: target.into(),
        });
    }

    /// Move or resize a section, as late-loading content would.
    pub fn resize_section(&self, id: &Route, top: f64, height: f64) -> bool {
        let mut state = self.state.borrow_mut();
        match state.sections.iter_mut().find(|s| &s.id == id) {
            Some(section) => {
                section.top = top;
                section.height = height;
                true
            }
            None => false,
        }
    }

    // -------------------------------------------------------------------------
    // Event loop
    // -------------------------------------------------------------------------

    /// Pop the oldest queued event.
    pub fn next_event(&self) -> Option<PageEvent> {
        self.state.borrow_mut().events.pop_front()
    }

    pub fn pending_events(&self) -> usize {
        self.state.borrow().events.len()
    }

    pub fn has_pending_frame(&self) -> bool {
        !self.state.borrow().frames.is_empty()
    }

    /// Run every callback queued for this frame. Returns how many ran.
    ///
    /// Callbacks requested while the frame runs wait for the next one.
    pub fn run_frame(&self) -> usize {
        let frames = std::mem::take(&mut self.state.borrow_mut().frames);
        let count = frames.len();
        for callback in frames {
            callback();
        }
        count
    }

    /// Advance the virtual clock, firing due timers in order.
    pub fn advance(&self, by: Duration) {
        let target = self.state.borrow().now + by;
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let due = state
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.seq))
                    .map(|(i, _)| i);
                due.map(|i| {
                    let timer = state.timers.remove(i);
                    state.now = timer.due;
                    timer.callback
                })
            };
            match next {
                Some(callback) => callback(),
                None => break,
            }
        }
        self.state.borrow_mut().now = target;
    }

    /// Dispatch queued events and run frames until nothing is left.
    pub fn pump(&self, handle: &MountHandle) {
        loop {
            while let Some(event) = self.next_event() {
                handle.handle_event(event);
            }
            if self.run_frame() == 0 && self.pending_events() == 0 {
                break;
            }
        }
    }

    // -------------------------------------------------------------------------
    // Observation
    // -------------------------------------------------------------------------

    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// All history entries, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.state.borrow().history.clone()
    }

    /// Number of `scroll_to` calls, including ones that did not move.
    pub fn scroll_to_calls(&self) -> usize {
        self.state.borrow().scroll_to_calls
    }

    pub fn link_style(&self, link_id: &str) -> Option<LinkStyle> {
        self.state.borrow().link_styles.get(link_id).copied()
    }

    /// Ids of links currently styled active, in document order.
    pub fn active_links(&self) -> Vec<String> {
        let state = self.state.borrow();
        state
            .links
            .iter()
            .filter(|l| state.link_styles.get(&l.id).is_some_and(|s| s.active))
            .map(|l| l.id.clone())
            .collect()
    }

    pub fn is_hidden(&self, id: &str) -> Option<bool> {
        self.state.borrow().elements.get(id).copied()
    }
}

// =============================================================================
// COLLABORATOR IMPLS
// =============================================================================

impl Document for HeadlessPage {
    fn sections(&self) -> Vec<SectionBoundary> {
        self.state.borrow().sections.clone()
    }

    fn nav_links(&self) -> Vec<NavLink> {
        self.state.borrow().links.clone()
    }

    fn element_top(&self, id: &str) -> Option<f64> {
        self.state
            .borrow()
            .sections
            .iter()
            .find(|s| s.id.as_str() == id)
            .map(|s| s.top)
    }

    fn set_link_style(&self, link_id: &str, style: LinkStyle) -> bool {
        match self.state.borrow_mut().link_styles.get_mut(link_id) {
            Some(slot) => {
                *slot = style;
                true
            }
            None => false,
        }
    }

    fn set_hidden(&self, id: &str, hidden: bool) -> bool {
        match self.state.borrow_mut().elements.get_mut(id) {
            Some(slot) => {
                *slot = hidden;
                true
            }
            None => false,
        }
    }
}

impl Viewport for HeadlessPage {
    fn scroll_y(&self) -> f64 {
        self.state.borrow().scroll_y
    }

    fn scroll_to(&self, top: f64) {
        let mut state = self.state.borrow_mut();
        state.scroll_to_calls += 1;
        state.move_viewport(top);
    }

    fn request_frame(&self, callback: FrameCallback) {
        self.state.borrow_mut().frames.push(callback);
    }

    fn set_timeout(&self, delay: Duration, callback: TimerCallback) {
        let mut state = self.state.borrow_mut();
        let seq = state.timer_seq;
        state.timer_seq += 1;
        let due = state.now + delay;
        state.timers.push(Timer { due, seq, callback });
    }
}

impl Location for HeadlessPage {
    fn fragment(&self) -> String {
        self.state.borrow().fragment().to_string()
    }

    fn assign_fragment(&self, route: &Route) {
        self.state.borrow_mut().push_fragment(route.to_fragment());
    }

    fn replace_fragment(&self, route: &Route) {
        let mut state = self.state.borrow_mut();
        let index = state.history_index;
        state.history[index] = route.to_fragment();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn route(name: &str) -> Route {
        Route::new(name).unwrap()
    }

    fn setup() -> HeadlessPage {
        HeadlessPage::new()
            .with_section(route("a"), 0.0, 500.0)
            .with_section(route("b"), 500.0, 500.0)
            .with_link("nav-a", route("a"))
            .with_element("back-to-top")
            .with_viewport_height(400.0)
    }

    #[test]
    fn test_scroll_is_clamped_and_queues_event() {
        let page = setup();

        assert!(page.user_scroll_to(250.0));
        assert_eq!(page.scroll_y(), 250.0);
        assert_eq!(page.next_event(), Some(PageEvent::Scroll));

        // 1000 document height - 400 viewport
        page.user_scroll_to(5000.0);
        assert_eq!(page.scroll_y(), 600.0);

        page.next_event();
        assert!(!page.user_scroll_to(600.0));
        assert_eq!(page.next_event(), None);
    }

    #[test]
    fn test_programmatic_scroll_counts_calls() {
        let page = setup();

        page.scroll_to(0.0);
        assert_eq!(page.scroll_to_calls(), 1);
        assert_eq!(page.next_event(), None); // did not move

        page.scroll_to(100.0);
        assert_eq!(page.scroll_to_calls(), 2);
        assert_eq!(page.next_event(), Some(PageEvent::Scroll));
    }

    #[test]
    fn test_assign_only_notifies_on_change() {
        let page = setup().with_fragment("#a");

        page.assign_fragment(&route("a"));
        assert_eq!(page.next_event(), None);
        assert_eq!(page.history(), vec!["#a".to_string()]);

        page.assign_fragment(&route("b"));
        assert_eq!(page.next_event(), Some(PageEvent::HashChange));
        assert_eq!(page.fragment(), "#b");
        assert_eq!(page.history(), vec!["#a".to_string(), "#b".to_string()]);
    }

    #[test]
    fn test_replace_is_silent() {
        let page = setup().with_fragment("#a");

        page.replace_fragment(&route("b"));
        assert_eq!(page.fragment(), "#b");
        assert_eq!(page.history(), vec!["#b".to_string()]);
        assert_eq!(page.next_event(), None);
    }

    #[test]
    fn test_back_restores_previous_entry() {
        let page = setup();

        page.assign_fragment(&route("a"));
        page.next_event();
        assert!(page.back());
        assert_eq!(page.fragment(), "");
        assert_eq!(page.next_event(), Some(PageEvent::HashChange));
        assert!(!page.back());
    }

    #[test]
    fn test_frames_requested_during_frame_wait() {
        let page = Rc::new(setup());
        let ran = Rc::new(Cell::new(0));

        let page_clone = page.clone();
        let ran_clone = ran.clone();
        page.request_frame(Box::new(move || {
            ran_clone.set(ran_clone.get() + 1);
            let ran_inner = ran_clone.clone();
            page_clone.request_frame(Box::new(move || ran_inner.set(ran_inner.get() + 1)));
        }));

        assert_eq!(page.run_frame(), 1);
        assert_eq!(ran.get(), 1);
        assert!(page.has_pending_frame());
        assert_eq!(page.run_frame(), 1);
        assert_eq!(ran.get(), 2);
    }

    #[test]
    fn test_timers_fire_in_order() {
        let page = setup();
        let order = Rc::new(RefCell::new(Vec::new()));

        for (label, ms) in [("late", 200), ("early", 50), ("tie", 50)] {
            let order = order.clone();
            page.set_timeout(
                Duration::from_millis(ms),
                Box::new(move || order.borrow_mut().push(label)),
            );
        }

        page.advance(Duration::from_millis(49));
        assert!(order.borrow().is_empty());

        page.advance(Duration::from_millis(1));
        assert_eq!(*order.borrow(), vec!["early", "tie"]);

        page.advance(Duration::from_millis(500));
        assert_eq!(*order.borrow(), vec!["early", "tie", "late"]);
        assert_eq!(page.now(), Duration::from_millis(550));
    }

    #[test]
    fn test_missing_elements_report_false() {
        let page = setup();

        assert!(!page.set_link_style("nav-zzz", LinkStyle::ACTIVE));
        assert!(!page.set_hidden("nope", false));
        assert_eq!(page.element_top("zzz"), None);
        assert_eq!(page.element_top("b"), Some(500.0));
    }
}

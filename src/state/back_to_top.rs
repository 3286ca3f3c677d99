//! Back To Top - Scroll-driven visibility for the return-to-top control
//!
//! Hidden while the page is scrolled no further than the threshold,
//! shown beyond it. Clicking it scrolls the viewport back to the top.

use std::cell::Cell;
use std::rc::Rc;

use tracing::{trace, warn};

use super::scroll;
use crate::config::AppConfig;
use crate::page::Page;

pub struct BackToTop {
    page: Rc<dyn Page>,
    element_id: String,
    threshold: f64,
    /// Visibility last written, to skip redundant writes.
    hidden: Cell<Option<bool>>,
    present: bool,
}

impl BackToTop {
    pub fn new(page: Rc<dyn Page>, config: &AppConfig) -> Self {
        let element_id = config.selectors.back_to_top.clone();
        // Probe by writing the initial state; a missing element leaves us inert.
        let hidden = page.scroll_y() <= config.animation.back_to_top_threshold;
        let present = page.set_hidden(&element_id, hidden);
        if !present {
            warn!(id = %element_id, "back to top button not found");
        }

        Self {
            page,
            element_id,
            threshold: config.animation.back_to_top_threshold,
            hidden: Cell::new(present.then_some(hidden)),
            present,
        }
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn is_present(&self) -> bool {
        self.present
    }

    /// Scroll notification.
    pub fn on_scroll(&self) {
        if !self.present {
            return;
        }

        let hidden = self.page.scroll_y() <= self.threshold;
        if self.hidden.get() == Some(hidden) {
            return;
        }
        trace!(hidden, "back to top visibility");
        self.page.set_hidden(&self.element_id, hidden);
        self.hidden.set(Some(hidden));
    }

    /// The control was clicked.
    pub fn on_click(&self) {
        if self.present {
            scroll::scroll_to_top(&*self.page);
        }
    }
}

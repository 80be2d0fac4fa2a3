//! Scroll-driven reading UI on post pages

use crate::helpers::strip_html;

/// Below this scroll offset the header is always shown
pub const HEADER_THRESHOLD: f64 = 100.0;
/// Pointer within this distance of the top edge reveals the header
pub const HOVER_ZONE: f64 = 40.0;
/// A section becomes active this far before its heading reaches the top
pub const SECTION_OFFSET: f64 = 150.0;
pub const WAYPOINTS_THRESHOLD: f64 = 200.0;
pub const BACK_TO_TOP_THRESHOLD: f64 = 400.0;

/// Fraction of the page scrolled, in `[0, 1]`. A page that does not scroll
/// counts as fully read.
pub fn reading_progress(scroll_y: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if scrollable > 0.0 {
        (scroll_y / scrollable).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// Hides the site header while scrolling down a post
#[derive(Debug, Clone, Default)]
pub struct HeaderAutoHide {
    last_scroll_y: f64,
    hovering: bool,
    hidden: bool,
}

impl HeaderAutoHide {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Returns whether the header is hidden afterwards
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        self.hidden = if scroll_y < HEADER_THRESHOLD || self.hovering {
            false
        } else {
            scroll_y > self.last_scroll_y
        };
        self.last_scroll_y = scroll_y;
        self.hidden
    }

    pub fn on_mouse_move(&mut self, client_y: f64) -> bool {
        let was_hovering = self.hovering;
        self.hovering = client_y <= HOVER_ZONE;
        if self.hovering && !was_hovering {
            self.hidden = false;
        }
        self.hidden
    }

    pub fn on_mouse_enter(&mut self) -> bool {
        self.hovering = true;
        self.hidden = false;
        self.hidden
    }

    pub fn on_mouse_leave(&mut self, client_y: f64, scroll_y: f64) -> bool {
        self.hovering = client_y <= HOVER_ZONE;
        if !self.hovering && scroll_y >= HEADER_THRESHOLD {
            self.hidden = true;
        }
        self.hidden
    }
}

/// Index of the section being read, given the document offsets of the
/// section headings in order. None when there are no sections.
pub fn active_section(scroll_y: f64, section_tops: &[f64]) -> Option<usize> {
    if section_tops.is_empty() {
        return None;
    }
    let active = section_tops
        .iter()
        .rposition(|top| scroll_y >= top - SECTION_OFFSET)
        .unwrap_or(0);
    Some(active)
}

/// Section waypoints need at least two sections and some scrolling
pub fn waypoints_visible(scroll_y: f64, section_count: usize) -> bool {
    section_count >= 2 && scroll_y > WAYPOINTS_THRESHOLD
}

pub fn back_to_top_visible(scroll_y: f64) -> bool {
    scroll_y > BACK_TO_TOP_THRESHOLD
}

/// Minutes to read rendered article HTML
pub fn word_count_read_time(article_html: &str, words_per_minute: usize) -> u32 {
    let words = strip_html(article_html).split_whitespace().count().max(1);
    words.div_ceil(words_per_minute.max(1)) as u32
}

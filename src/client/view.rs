//! View model for the home page post list

use std::collections::BTreeSet;

use super::state::{filter_and_sort, FilterState, TagFilter};
use crate::generator::PostRecord;

/// Window size below which every page number is listed
const MAX_LISTED_PAGES: usize = 5;

/// One entry in the page-number strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page { number: usize, current: bool },
    Ellipsis,
}

/// A tag filter button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagButton {
    /// `data-tag` value: `all` or a lowercase tag
    pub tag: String,
    pub label: String,
    pub active: bool,
}

/// Everything needed to draw the post list for one state
#[derive(Debug, Clone)]
pub struct ListView<'a> {
    /// Posts on the current page
    pub posts: Vec<&'a PostRecord>,
    /// Posts matching the filters across all pages
    pub total_matches: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub pages: Vec<PageItem>,
    pub tags: Vec<TagButton>,
    pub no_results: bool,
    pub show_clear_filter: bool,
    pub show_clear_search: bool,
    /// Screen-reader summary of the result set
    pub announcement: String,
}

impl<'a> ListView<'a> {
    pub fn build(posts: &'a [PostRecord], state: &FilterState, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let matches = filter_and_sort(posts, state);
        let total_matches = matches.len();
        let total_pages = total_matches.div_ceil(per_page);
        let current_page = state.current_page.max(1);

        let start = (current_page - 1).saturating_mul(per_page);
        let page_posts = matches.into_iter().skip(start).take(per_page).collect();

        Self {
            posts: page_posts,
            total_matches,
            total_pages,
            current_page,
            has_prev: current_page > 1,
            has_next: current_page < total_pages,
            pages: page_items(current_page, total_pages),
            tags: tag_buttons(posts, &state.active_tag),
            no_results: total_matches == 0,
            show_clear_filter: !state.active_tag.is_all(),
            show_clear_search: !state.search_query.is_empty(),
            announcement: announcement(total_matches, state),
        }
    }

    /// Pagination is only shown when there is more than one page
    pub fn show_pagination(&self) -> bool {
        self.total_pages > 1
    }
}

/// Page numbers to show: all of them for short lists, otherwise the first,
/// the last and the neighbours of the current page, with gaps elided.
pub fn page_items(current: usize, total: usize) -> Vec<PageItem> {
    let page = |number| PageItem::Page {
        number,
        current: number == current,
    };

    if total <= MAX_LISTED_PAGES {
        return (1..=total).map(page).collect();
    }

    let mut items = vec![page(1)];
    if current > 3 {
        items.push(PageItem::Ellipsis);
    }

    let start = current.saturating_sub(1).max(2);
    let end = (current + 1).min(total - 1);
    items.extend((start..=end).map(page));

    if current < total - 2 {
        items.push(PageItem::Ellipsis);
    }
    items.push(page(total));
    items
}

/// "All" followed by every distinct lowercase tag, sorted
pub fn tag_buttons(posts: &[PostRecord], active: &TagFilter) -> Vec<TagButton> {
    let tags: BTreeSet<String> = posts
        .iter()
        .flat_map(|p| p.tags.iter())
        .map(|t| t.to_lowercase())
        .filter(|t| !t.trim().is_empty() && t != "all")
        .collect();

    let mut buttons = vec![TagButton {
        tag: "all".to_string(),
        label: "All".to_string(),
        active: active.is_all(),
    }];

    buttons.extend(tags.into_iter().map(|tag| TagButton {
        label: tag_label(&tag),
        active: active.as_str() == tag,
        tag,
    }));

    buttons
}

/// Capitalize the first letter of each word, where words are separated by
/// whitespace or hyphens
pub fn tag_label(tag: &str) -> String {
    let mut label = String::with_capacity(tag.len());
    let mut word_start = true;

    for c in tag.chars() {
        if word_start {
            label.extend(c.to_uppercase());
        } else {
            label.push(c);
        }
        word_start = c.is_whitespace() || c == '-';
    }

    label
}

fn announcement(count: usize, state: &FilterState) -> String {
    if count == 0 {
        return "No posts found".to_string();
    }

    let mut text = format!("Showing {} post{}", count, if count == 1 { "" } else { "s" });
    if let TagFilter::Tag(tag) = &state.active_tag {
        text.push_str(&format!(" in {}", tag));
    }
    if !state.search_query.is_empty() {
        text.push_str(&format!(" matching \"{}\"", state.search_query));
    }
    text
}

/// Fade edges of a horizontally scrolling strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMask {
    Start,
    End,
    Both,
}

impl ScrollMask {
    /// Edge tolerance in pixels
    const SLACK: f64 = 10.0;

    /// Which edges have hidden content, or None when everything fits
    pub fn compute(scroll_left: f64, scroll_width: f64, client_width: f64) -> Option<Self> {
        let at_start = scroll_left <= Self::SLACK;
        let at_end = (scroll_width - client_width - scroll_left).abs() <= Self::SLACK;

        match (at_start, at_end) {
            (false, false) => Some(ScrollMask::Both),
            (false, true) => Some(ScrollMask::Start),
            (true, false) => Some(ScrollMask::End),
            (true, true) => None,
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            ScrollMask::Start => "mask-start",
            ScrollMask::End => "mask-end",
            ScrollMask::Both => "mask-both",
        }
    }
}

//! Filter/sort/page state and its reducer

use serde::{Deserialize, Serialize};

use crate::generator::PostRecord;

/// Sort direction for the post list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
        }
    }
}

/// Active tag filter. Persisted as `"all"` or the lowercase tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TagFilter {
    #[default]
    All,
    Tag(String),
}

impl TagFilter {
    /// `"all"` (any case) and the empty string select every post
    pub fn parse(tag: &str) -> Self {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() || tag == "all" {
            TagFilter::All
        } else {
            TagFilter::Tag(tag)
        }
    }

    /// The `data-tag` value for this filter
    pub fn as_str(&self) -> &str {
        match self {
            TagFilter::All => "all",
            TagFilter::Tag(tag) => tag,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, TagFilter::All)
    }

    pub fn matches(&self, post: &PostRecord) -> bool {
        match self {
            TagFilter::All => true,
            TagFilter::Tag(tag) => post.has_tag(tag),
        }
    }
}

impl From<String> for TagFilter {
    fn from(s: String) -> Self {
        TagFilter::parse(&s)
    }
}

impl From<TagFilter> for String {
    fn from(filter: TagFilter) -> Self {
        filter.as_str().to_string()
    }
}

/// User interactions with the post list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// New search input; surrounding whitespace is ignored
    Search(String),
    ClearSearch,
    SelectTag(String),
    ClearTag,
    SetSort(SortOrder),
    PrevPage,
    /// Advance one page, given the current page count
    NextPage(usize),
    GoToPage(usize),
}

/// Everything the post list depends on besides the posts themselves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub search_query: String,
    pub active_tag: TagFilter,
    pub sort_order: SortOrder,
    /// 1-based
    pub current_page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            active_tag: TagFilter::All,
            sort_order: SortOrder::Newest,
            current_page: 1,
        }
    }
}

/// Persisted shape; every field is optional
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredState {
    search_query: Option<String>,
    active_tag: Option<TagFilter>,
    sort_order: Option<SortOrder>,
    current_page: Option<usize>,
}

impl FilterState {
    /// Rebuild state from persisted JSON.
    ///
    /// Fields present in the stored object override the defaults. Anything
    /// that fails to parse yields the default state.
    pub fn restore(raw: Option<&str>) -> Self {
        let mut state = Self::default();

        let Some(stored) = raw.and_then(|raw| serde_json::from_str::<StoredState>(raw).ok())
        else {
            return state;
        };

        if let Some(query) = stored.search_query {
            state.search_query = query;
        }
        if let Some(tag) = stored.active_tag {
            state.active_tag = tag;
        }
        if let Some(order) = stored.sort_order {
            state.sort_order = order;
        }
        if let Some(page) = stored.current_page {
            state.current_page = page.max(1);
        }

        state
    }

    /// Apply an action. Returns false when nothing changed.
    ///
    /// Every change to the search, tag or sort order goes back to page 1.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Search(query) => {
                self.search_query = query.trim().to_string();
                self.current_page = 1;
            }
            Action::ClearSearch => {
                self.search_query.clear();
                self.current_page = 1;
            }
            Action::SelectTag(tag) => {
                self.active_tag = TagFilter::parse(&tag);
                self.current_page = 1;
            }
            Action::ClearTag => {
                self.active_tag = TagFilter::All;
                self.current_page = 1;
            }
            Action::SetSort(order) => {
                if order == self.sort_order {
                    return false;
                }
                self.sort_order = order;
                self.current_page = 1;
            }
            Action::PrevPage => {
                if self.current_page <= 1 {
                    return false;
                }
                self.current_page -= 1;
            }
            Action::NextPage(total_pages) => {
                if self.current_page >= total_pages {
                    return false;
                }
                self.current_page += 1;
            }
            Action::GoToPage(page) => {
                if page == 0 || page == self.current_page {
                    return false;
                }
                self.current_page = page;
            }
        }
        true
    }

    /// Whether a post passes the tag and search filters
    pub fn matches(&self, post: &PostRecord) -> bool {
        self.active_tag.matches(post)
            && (self.search_query.is_empty() || post.matches_query(&self.search_query))
    }
}

/// Posts passing the filters, in the requested date order.
///
/// Posts sharing a date keep their input order.
pub fn filter_and_sort<'a>(posts: &'a [PostRecord], state: &FilterState) -> Vec<&'a PostRecord> {
    let mut result: Vec<&PostRecord> = posts.iter().filter(|p| state.matches(p)).collect();

    match state.sort_order {
        SortOrder::Newest => result.sort_by(|a, b| b.date.cmp(&a.date)),
        SortOrder::Oldest => result.sort_by(|a, b| a.date.cmp(&b.date)),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, date: &str, title: &str, tags: &[&str]) -> PostRecord {
        PostRecord {
            id: id.to_string(),
            title: title.to_string(),
            date: date.to_string(),
            excerpt: format!("Notes on {}", title),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            url: format!("blog/{}.html", id),
            read_time: 3,
        }
    }

    fn posts() -> Vec<PostRecord> {
        vec![
            record("a", "2025-01-10", "Async Rust", &["Rust", "Async"]),
            record("b", "2025-02-01", "CSS Grid", &["CSS"]),
            record("c", "2024-12-05", "Rust Macros", &["rust"]),
            record("d", "2025-01-10", "Tokio Tips", &["RUST"]),
        ]
    }

    fn ids(list: &[&PostRecord]) -> Vec<String> {
        list.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_default() {
        let state = FilterState::default();
        assert_eq!(state.search_query, "");
        assert_eq!(state.active_tag, TagFilter::All);
        assert_eq!(state.sort_order, SortOrder::Newest);
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn test_sort_orders_keep_ties_stable() {
        let posts = posts();
        let mut state = FilterState::default();
        assert_eq!(ids(&filter_and_sort(&posts, &state)), ["b", "a", "d", "c"]);

        state.apply(Action::SetSort(SortOrder::Oldest));
        assert_eq!(ids(&filter_and_sort(&posts, &state)), ["c", "a", "d", "b"]);
    }

    #[test]
    fn test_tag_then_search() {
        let posts = posts();
        let mut state = FilterState::default();
        state.apply(Action::SelectTag("Rust".to_string()));
        assert_eq!(state.active_tag, TagFilter::Tag("rust".to_string()));
        assert_eq!(ids(&filter_and_sort(&posts, &state)), ["a", "d", "c"]);

        state.apply(Action::Search("  MACROS ".to_string()));
        assert_eq!(state.search_query, "MACROS");
        assert_eq!(ids(&filter_and_sort(&posts, &state)), ["c"]);

        // matches excerpt too
        state.apply(Action::Search("notes on tokio".to_string()));
        assert_eq!(ids(&filter_and_sort(&posts, &state)), ["d"]);

        state.apply(Action::Search("grid".to_string()));
        assert!(filter_and_sort(&posts, &state).is_empty());
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let mut state = FilterState {
            current_page: 3,
            ..Default::default()
        };
        assert!(state.apply(Action::SelectTag("css".to_string())));
        assert_eq!(state.current_page, 1);

        state.current_page = 3;
        assert!(state.apply(Action::SetSort(SortOrder::Oldest)));
        assert_eq!(state.current_page, 1);

        state.current_page = 3;
        assert!(state.apply(Action::Search("x".to_string())));
        assert_eq!(state.current_page, 1);

        state.current_page = 3;
        assert!(state.apply(Action::ClearSearch));
        assert_eq!(state.current_page, 1);

        state.current_page = 3;
        assert!(state.apply(Action::ClearTag));
        assert_eq!(state.current_page, 1);
        assert!(state.active_tag.is_all());
    }

    #[test]
    fn test_same_sort_is_noop() {
        let mut state = FilterState {
            current_page: 2,
            ..Default::default()
        };
        assert!(!state.apply(Action::SetSort(SortOrder::Newest)));
        assert_eq!(state.current_page, 2);
    }

    #[test]
    fn test_select_all_tag() {
        let mut state = FilterState::default();
        state.apply(Action::SelectTag("css".to_string()));
        state.apply(Action::SelectTag("All".to_string()));
        assert_eq!(state.active_tag, TagFilter::All);
    }

    #[test]
    fn test_paging_bounds() {
        let mut state = FilterState::default();
        assert!(!state.apply(Action::PrevPage));
        assert!(state.apply(Action::NextPage(2)));
        assert_eq!(state.current_page, 2);
        assert!(!state.apply(Action::NextPage(2)));
        assert_eq!(state.current_page, 2);
        assert!(state.apply(Action::PrevPage));
        assert_eq!(state.current_page, 1);

        assert!(state.apply(Action::GoToPage(4)));
        assert_eq!(state.current_page, 4);
        assert!(!state.apply(Action::GoToPage(4)));
        assert!(!state.apply(Action::GoToPage(0)));
    }

    #[test]
    fn test_restore() {
        let state = FilterState::restore(Some(
            r#"{"searchQuery":"rust","activeTag":"CSS","sortOrder":"oldest","currentPage":2}"#,
        ));
        assert_eq!(state.search_query, "rust");
        assert_eq!(state.active_tag, TagFilter::Tag("css".to_string()));
        assert_eq!(state.sort_order, SortOrder::Oldest);
        assert_eq!(state.current_page, 2);
    }

    #[test]
    fn test_restore_partial_and_corrupt() {
        let state = FilterState::restore(Some(r#"{"activeTag":"all","currentPage":0}"#));
        assert_eq!(state, FilterState::default());

        let state = FilterState::restore(Some(r#"{"searchQuery":"go"}"#));
        assert_eq!(state.search_query, "go");
        assert_eq!(state.sort_order, SortOrder::Newest);

        assert_eq!(FilterState::restore(Some("{not json")), FilterState::default());
        assert_eq!(
            FilterState::restore(Some(r#"{"sortOrder":"sideways"}"#)),
            FilterState::default()
        );
        assert_eq!(FilterState::restore(None), FilterState::default());
    }

    #[test]
    fn test_persisted_shape() {
        let mut state = FilterState::default();
        state.apply(Action::SelectTag("Rust".to_string()));
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "searchQuery": "",
                "activeTag": "rust",
                "sortOrder": "newest",
                "currentPage": 1
            })
        );
        assert_eq!(
            FilterState::restore(Some(&serde_json::to_string(&state).unwrap())),
            state
        );
    }
}

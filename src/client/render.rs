//! HTML fragments for the home page post list
//!
//! Every value taken from post data is escaped.

use chrono::NaiveDate;

use super::view::{ListView, PageItem};
use crate::helpers::{format_long_date, html_escape};

const PREV_ICON: &str = r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M15 18l-6-6 6-6"/></svg>"#;
const NEXT_ICON: &str = r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M9 18l6-6-6-6"/></svg>"#;

/// The `<article>` cards for the current page
pub fn post_list(view: &ListView) -> String {
    let mut html = String::new();

    for (index, post) in view.posts.iter().enumerate() {
        let tags: String = post
            .tags
            .iter()
            .map(|tag| format!(r#"<span class="blog-item-tag">{}</span>"#, html_escape(tag)))
            .collect();

        let date = NaiveDate::parse_from_str(&post.date, "%Y-%m-%d")
            .map(format_long_date)
            .unwrap_or_else(|_| post.date.clone());

        let read_time = if post.read_time > 0 {
            format!(
                r#"<span class="blog-item-readtime">{} min read</span>"#,
                post.read_time
            )
        } else {
            String::new()
        };

        html.push_str(&format!(
            r#"<article class="blog-item" style="animation-delay: {:.2}s">
  <a href="{}" class="blog-item-link">
    <div class="blog-item-header">
      <h2 class="blog-item-title">{}</h2>
      <span class="blog-item-date">{}</span>
    </div>
    <p class="blog-item-excerpt">{}</p>
    <div class="blog-item-footer">
      <div class="blog-item-tags">{}</div>
      <div class="blog-item-meta">{}<span class="blog-item-read">Read post</span></div>
    </div>
  </a>
</article>
"#,
            index as f64 * 0.05,
            html_escape(&post.url),
            html_escape(&post.title),
            html_escape(&date),
            html_escape(&post.excerpt),
            tags,
            read_time,
        ));
    }

    html
}

/// Prev/next buttons and page numbers, or nothing for a single page
pub fn pagination(view: &ListView) -> String {
    if !view.show_pagination() {
        return String::new();
    }

    let numbers: String = view
        .pages
        .iter()
        .map(|item| match item {
            PageItem::Ellipsis => r#"<span class="pagination-ellipsis">…</span>"#.to_string(),
            PageItem::Page { number, current } => format!(
                r#"<button class="pagination-num{}" data-page="{}"{}>{}</button>"#,
                if *current { " active" } else { "" },
                number,
                if *current { r#" aria-current="page""# } else { "" },
                number
            ),
        })
        .collect();

    format!(
        r#"<button class="pagination-btn pagination-prev{}"{} aria-label="Previous page">{}</button>
<div class="pagination-numbers">{}</div>
<button class="pagination-btn pagination-next{}"{} aria-label="Next page">{}</button>
"#,
        disabled(!view.has_prev),
        disabled(!view.has_prev),
        PREV_ICON,
        numbers,
        disabled(!view.has_next),
        disabled(!view.has_next),
        NEXT_ICON,
    )
}

/// Tag filter buttons
pub fn tag_filters(view: &ListView) -> String {
    view.tags
        .iter()
        .map(|button| {
            format!(
                r#"<button class="tag-btn{}" data-tag="{}">{}</button>"#,
                if button.active { " active" } else { "" },
                html_escape(&button.tag),
                html_escape(&button.label)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Used both as a class suffix and as the boolean attribute
fn disabled(flag: bool) -> &'static str {
    if flag {
        " disabled"
    } else {
        ""
    }
}

//! Post page template

use anyhow::{bail, Context, Result};
use lazy_static::lazy_static;
use regex::{NoExpand, Regex};
use std::fs;
use std::path::Path;

use crate::content::Post;
use crate::helpers::{format_iso_date, format_long_date, html_escape};

lazy_static! {
    static ref TAGS_BLOCK_RE: Regex = Regex::new(
        r#"<div class="post-tags">\s*<span class="post-tag">TAG_1</span>\s*<span class="post-tag">TAG_2</span>\s*</div>"#
    )
    .unwrap();
    static ref CONTENT_BLOCK_RE: Regex = Regex::new(
        r#"<div class="post-content">[\s\S]*?<!-- YOUR CONTENT HERE -->[\s\S]*?</div>\s*<div class="post-footer">"#
    )
    .unwrap();
}

/// The HTML page every post is rendered into.
///
/// The template is a plain HTML file with placeholder tokens:
/// `YOUR_TITLE_HERE`, `YOUR_DESCRIPTION_HERE`, `YOUR_SLUG_HERE`,
/// `YOUR_DATE_HERE`, `YYYY-MM-DD`, `X min read`, a sample tags block with
/// `TAG_1`/`TAG_2`, and a `post-content` block holding
/// `<!-- YOUR CONTENT HERE -->`.
#[derive(Debug, Clone)]
pub struct PostTemplate {
    source: String,
}

impl PostTemplate {
    /// Read the template from disk
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            bail!("Template not found: {:?}", path);
        }
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read template {:?}", path))?;
        Ok(Self { source })
    }

    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Substitute a post and its rendered body into the template
    pub fn render(&self, post: &Post, content_html: &str) -> String {
        let title = html_escape(&post.title);
        let description = html_escape(&post.excerpt);

        let html = self
            .source
            .replace("YOUR_TITLE_HERE", &title)
            .replace("YOUR_DESCRIPTION_HERE", &description)
            .replace("YOUR_SLUG_HERE", &post.slug)
            .replace("YOUR_DATE_HERE", &format_long_date(post.date))
            .replace("YYYY-MM-DD", &format_iso_date(post.date))
            .replace("X min read", &format!("{} min read", post.read_time));

        let html = TAGS_BLOCK_RE.replace(&html, NoExpand(&tags_html(&post.tags)));

        let content_block = format!(
            "<div class=\"post-content\">\n                        {}\n                    </div>\n                    <div class=\"post-footer\">",
            content_html
        );
        CONTENT_BLOCK_RE
            .replace(&html, NoExpand(&content_block))
            .into_owned()
    }
}

/// The tags block, or nothing when the post has no tags
fn tags_html(tags: &[String]) -> String {
    if tags.is_empty() {
        return String::new();
    }

    let spans: Vec<String> = tags
        .iter()
        .map(|tag| format!(r#"<span class="post-tag">{}</span>"#, html_escape(tag)))
        .collect();

    format!(
        "<div class=\"post-tags\">\n                            {}\n                        </div>",
        spans.join("\n                            ")
    )
}

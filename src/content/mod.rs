//! Content module - handles posts, front-matter and markdown rendering

mod frontmatter;
pub mod loader;
mod markdown;
mod post;
mod readtime;

pub use frontmatter::{is_valid_date, FrontMatter, PostMeta, Value};
pub use markdown::MarkdownRenderer;
pub use post::{Post, PostSource};
pub use readtime::calculate_read_time;

use thiserror::Error;

/// Problems with a single post's source
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("invalid frontmatter format (expected a `---` fenced block at the top of the file)")]
    MalformedFrontMatter,

    #[error("missing required frontmatter field `{0}`")]
    MissingField(&'static str),

    #[error("invalid date format `{0}` (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

//! Post model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::FrontMatter;

/// A published blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// URL-safe identifier, taken from the source file name
    pub slug: String,

    pub title: String,

    pub date: NaiveDate,

    pub excerpt: String,

    /// Tags as written; matching is case-insensitive
    pub tags: Vec<String>,

    /// Estimated minutes to read, at least 1
    pub read_time: u32,
}

impl Post {
    /// Page path relative to the site root, e.g. `blog/hello.html`
    pub fn url(&self, blog_dir: &str) -> String {
        format!("{}/{}.html", blog_dir.trim_matches('/'), self.slug)
    }
}

/// A markdown source file after front-matter parsing
#[derive(Debug, Clone)]
pub struct PostSource {
    pub slug: String,
    pub path: PathBuf,
    pub front_matter: FrontMatter,
    /// Markdown after the front-matter block
    pub body: String,
}

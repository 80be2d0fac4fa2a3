//! Content loader - loads posts from the content directory

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{calculate_read_time, FrontMatter, Post, PostSource};
use crate::Folio;

/// A post that passed validation, with the source it came from
#[derive(Debug, Clone)]
pub struct LoadedPost {
    pub post: Post,
    pub source: PostSource,
}

/// Result of scanning the content directory
#[derive(Debug, Default)]
pub struct LoadedContent {
    /// Publishable posts, in file name order
    pub posts: Vec<LoadedPost>,
    /// Drafts that were skipped
    pub drafts: usize,
    /// Files skipped for missing fields or bad dates
    pub invalid: usize,
}

/// Loads content from the content directory
pub struct ContentLoader<'a> {
    folio: &'a Folio,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(folio: &'a Folio) -> Self {
        Self { folio }
    }

    /// Load every markdown post.
    ///
    /// A file whose front-matter block is malformed fails the whole load.
    /// Files with missing fields or bad dates are logged and skipped.
    pub fn load_posts(&self, include_drafts: bool) -> Result<LoadedContent> {
        let content_dir = &self.folio.content_dir;
        if !content_dir.is_dir() {
            bail!("Content directory not found: {:?}", content_dir);
        }

        let mut loaded = LoadedContent::default();

        for path in markdown_files(content_dir) {
            let source = self.load_source(&path)?;
            let file_name = path.file_name().unwrap_or_default().to_string_lossy();

            if source.front_matter.draft && !include_drafts {
                tracing::info!("Draft: {} (skipped)", file_name);
                loaded.drafts += 1;
                continue;
            }

            let meta = match source.front_matter.validate() {
                Ok(meta) => meta,
                Err(e) => {
                    tracing::error!("Skipping {}: {}", file_name, e);
                    loaded.invalid += 1;
                    continue;
                }
            };

            let read_time = meta.read_time.unwrap_or_else(|| {
                calculate_read_time(&source.body, self.folio.config.build.words_per_minute)
            });

            let post = Post {
                slug: source.slug.clone(),
                title: meta.title,
                date: meta.date,
                excerpt: meta.excerpt,
                tags: meta.tags,
                read_time,
            };

            loaded.posts.push(LoadedPost { post, source });
        }

        Ok(loaded)
    }

    /// Read and parse a single source file
    pub fn load_source(&self, path: &Path) -> Result<PostSource> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let (front_matter, body) =
            FrontMatter::parse(&content).with_context(|| format!("Failed to parse {:?}", path))?;

        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();

        Ok(PostSource {
            slug,
            path: path.to_path_buf(),
            front_matter,
            body: body.to_string(),
        })
    }
}

/// Markdown files directly inside `dir`, sorted by name
fn markdown_files(dir: &Path) -> Vec<std::path::PathBuf> {
    let mut files: Vec<_> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_markdown_file(p))
        .collect();
    files.sort();
    files
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}

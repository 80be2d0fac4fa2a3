//! folio: a small static blog generator
//!
//! This crate turns a directory of markdown posts into HTML pages rendered
//! through a fixed template, plus the derived artifacts the site's scripts
//! load (posts data module, sitemap, RSS feed, minified CSS, service worker).
//! The [`client`] module holds the browser-side post browser logic as pure
//! functions over an explicit state value.

pub mod client;
pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod images;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Config file names, in lookup order
pub const CONFIG_FILES: [&str; 2] = ["site.config.json", "_config.yml"];

/// The main folio application
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown sources
    pub content_dir: PathBuf,
    /// Generated post pages
    pub blog_dir: PathBuf,
    /// Post page template
    pub template_path: PathBuf,
}

impl Folio {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();

        let config = match Self::find_config(&base_dir) {
            Some(path) => {
                tracing::debug!("Loading config from {:?}", path);
                config::SiteConfig::load(&path)?
            }
            None => config::SiteConfig::default(),
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let content_dir = base_dir.join(&config.paths.content_dir);
        let blog_dir = base_dir.join(&config.paths.blog_dir);
        let template_path = base_dir.join(&config.paths.template);

        Self {
            config,
            base_dir,
            content_dir,
            blog_dir,
            template_path,
        }
    }

    /// First existing config file in the base directory
    pub fn find_config(base_dir: &Path) -> Option<PathBuf> {
        CONFIG_FILES
            .iter()
            .map(|name| base_dir.join(name))
            .find(|p| p.exists())
    }

    /// Resolve a configured path against the base directory
    pub fn path(&self, relative: &str) -> PathBuf {
        self.base_dir.join(relative)
    }

    /// Build the site
    pub fn build(&self, force: bool) -> Result<commands::build::BuildReport> {
        commands::build::run(
            self,
            commands::build::BuildOptions {
                force,
                include_drafts: false,
            },
        )
    }

    /// Remove generated artifacts
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Scaffold a new post
    pub fn new_post(&self, title: &str) -> Result<PathBuf> {
        commands::new::create_post(self, title, chrono::Local::now().date_naive())
    }
}

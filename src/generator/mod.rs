//! Generator module - turns loaded posts into pages and site artifacts

pub mod blog_data;
pub mod css;
pub mod feed;
pub mod freshness;
pub mod service_worker;
pub mod site_config_js;
pub mod sitemap;
mod template;

pub use blog_data::PostRecord;
pub use template::PostTemplate;

use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::path::Path;

use crate::content::loader::LoadedContent;
use crate::content::{MarkdownRenderer, Post};
use crate::Folio;

/// Counters for one build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Post pages written
    pub generated: usize,
    /// Post pages skipped because they were newer than their source
    pub unchanged: usize,
    /// Drafts left out
    pub drafts: usize,
    /// Sources skipped for missing fields or bad dates
    pub invalid: usize,
    /// Posts in the data module, sitemap and feed
    pub posts: usize,
}

impl BuildReport {
    /// One-line summary, omitting zero counters other than `generated`
    pub fn summary(&self) -> String {
        let mut summary = format!("Build complete: {} generated", self.generated);
        if self.unchanged > 0 {
            summary.push_str(&format!(", {} unchanged", self.unchanged));
        }
        if self.drafts > 0 {
            summary.push_str(&format!(", {} drafts", self.drafts));
        }
        if self.invalid > 0 {
            summary.push_str(&format!(", {} invalid", self.invalid));
        }
        summary
    }
}

/// Static site generator
pub struct Generator {
    folio: Folio,
    template: PostTemplate,
    renderer: MarkdownRenderer,
}

impl Generator {
    /// Create a new generator. Fails when the post template is missing.
    pub fn new(folio: &Folio) -> Result<Self> {
        let template = PostTemplate::load(&folio.template_path)?;
        let paths = &folio.config.paths;
        let renderer = MarkdownRenderer::with_options(
            &folio.config.origin(),
            &paths.images_out,
            &folio.path(&paths.images_out),
        );

        Ok(Self {
            folio: folio.clone(),
            template,
            renderer,
        })
    }

    /// Generate the entire site
    pub fn generate(&self, content: &LoadedContent, force: bool) -> Result<BuildReport> {
        let mut report = BuildReport {
            drafts: content.drafts,
            invalid: content.invalid,
            posts: content.posts.len(),
            ..Default::default()
        };

        fs::create_dir_all(&self.folio.blog_dir)
            .with_context(|| format!("Failed to create {:?}", self.folio.blog_dir))?;

        for loaded in &content.posts {
            let post = &loaded.post;
            let output = self.folio.blog_dir.join(format!("{}.html", post.slug));

            if !force
                && freshness::is_up_to_date(&loaded.source.path, &output)
                && freshness::is_up_to_date(&self.folio.template_path, &output)
            {
                tracing::debug!("Unchanged: {}", post.url(&self.folio.config.paths.blog_dir));
                report.unchanged += 1;
                continue;
            }

            let body = self.renderer.render(&loaded.source.body);
            let html = self.template.render(post, &body);
            write_file(&output, &html)?;
            tracing::info!("Generated: {}", post.url(&self.folio.config.paths.blog_dir));
            report.generated += 1;
        }

        let posts: Vec<Post> = content.posts.iter().map(|l| l.post.clone()).collect();

        self.generate_blog_data(&posts)?;
        self.generate_sitemap(&posts)?;
        self.generate_feed(&posts)?;
        self.minify_css()?;
        self.generate_site_config()?;
        self.generate_service_worker()?;

        Ok(report)
    }

    fn generate_blog_data(&self, posts: &[Post]) -> Result<()> {
        let paths = &self.folio.config.paths;
        let js = blog_data::render(posts, &paths.blog_dir)?;
        write_file(&self.folio.path(&paths.blog_data), &js)?;
        tracing::info!("Generated: {} ({} posts)", paths.blog_data, posts.len());
        Ok(())
    }

    fn generate_sitemap(&self, posts: &[Post]) -> Result<()> {
        let config = &self.folio.config;
        let xml = sitemap::render(
            &config.origin(),
            &config.paths.blog_dir,
            posts,
            Utc::now().date_naive(),
        );
        write_file(&self.folio.path(&config.paths.sitemap), &xml)?;
        tracing::info!("Generated: {}", config.paths.sitemap);
        Ok(())
    }

    fn generate_feed(&self, posts: &[Post]) -> Result<()> {
        let config = &self.folio.config;
        let xml = feed::render(config, posts, Utc::now());
        write_file(&self.folio.path(&config.paths.feed), &xml)?;
        tracing::info!("Generated: {}", config.paths.feed);
        Ok(())
    }

    /// Minify the stylesheet, if there is one
    fn minify_css(&self) -> Result<()> {
        let paths = &self.folio.config.paths;
        let src = self.folio.path(&paths.css_src);
        if !src.is_file() {
            tracing::debug!("No stylesheet at {:?}", src);
            return Ok(());
        }

        let original =
            fs::read_to_string(&src).with_context(|| format!("Failed to read {:?}", src))?;
        let minified = css::minify(&original);
        write_file(&self.folio.path(&paths.css_min), &minified)?;
        tracing::info!(
            "Minified: {} ({}% smaller)",
            paths.css_min,
            css::savings_percent(&original, &minified)
        );
        Ok(())
    }

    fn generate_site_config(&self) -> Result<()> {
        let paths = &self.folio.config.paths;
        let js = site_config_js::render(&self.folio.config)?;
        write_file(&self.folio.path(&paths.site_config_js), &js)?;
        tracing::info!("Generated: {}", paths.site_config_js);
        Ok(())
    }

    fn generate_service_worker(&self) -> Result<()> {
        let paths = &self.folio.config.paths;
        let js = service_worker::render(&self.folio.config)?;
        write_file(&self.folio.path(&paths.service_worker), &js)?;
        tracing::info!("Generated: {}", paths.service_worker);
        Ok(())
    }
}

/// Write a file, creating parent directories
fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))
}

/// Escape XML special characters
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

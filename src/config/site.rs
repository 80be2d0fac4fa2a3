//! Site configuration (site.config.json / _config.yml)

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub name: String,
    pub description: String,
    /// Bare domain, e.g. `example.com`. Empty means relative links only.
    pub domain: String,
    pub language: String,

    #[serde(default)]
    pub footer: FooterConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "My Blog".to_string(),
            description: String::new(),
            domain: String::new(),
            language: "en-us".to_string(),
            footer: FooterConfig::default(),
            build: BuildConfig::default(),
            paths: PathsConfig::default(),
            extra: IndexMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file, picking the format by extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;

        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e == "yml" || e == "yaml")
            .unwrap_or(false);

        let config = if is_yaml {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid YAML config {:?}", path))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON config {:?}", path))?
        };

        Ok(config)
    }

    /// Site origin (`https://<domain>`), or an empty string when no domain is set
    pub fn origin(&self) -> String {
        let domain = self.domain.trim().trim_end_matches('/');
        if domain.is_empty() {
            String::new()
        } else if domain.starts_with("http://") || domain.starts_with("https://") {
            domain.to_string()
        } else {
            format!("https://{}", domain)
        }
    }
}

/// Social links rendered in the page footer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Build and client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub posts_per_page: usize,
    pub words_per_minute: usize,
    /// Service worker cache name; bump it to invalidate old caches
    pub cache_name: String,
    /// Static assets the service worker precaches on install
    pub precache: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            posts_per_page: 5,
            words_per_minute: 200,
            cache_name: "folio-v1".to_string(),
            precache: [
                "/",
                "/index.html",
                "/about.html",
                "/404.html",
                "/css/style.min.css",
                "/js/main.js",
                "/js/layout.js",
                "/js/blog-data.js",
                "/js/theme-init.js",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Project layout, relative to the base directory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub content_dir: String,
    pub blog_dir: String,
    pub template: String,
    pub blog_data: String,
    pub site_config_js: String,
    pub sitemap: String,
    pub feed: String,
    pub css_src: String,
    pub css_min: String,
    pub service_worker: String,
    pub images_src: String,
    pub images_out: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content_dir: "content/posts".to_string(),
            blog_dir: "blog".to_string(),
            template: "blog/_template.html".to_string(),
            blog_data: "js/blog-data.js".to_string(),
            site_config_js: "js/site-config.js".to_string(),
            sitemap: "sitemap.xml".to_string(),
            feed: "feed.xml".to_string(),
            css_src: "css/style.css".to_string(),
            css_min: "css/style.min.css".to_string(),
            service_worker: "sw.js".to_string(),
            images_src: "assets/images/src".to_string(),
            images_out: "assets/images".to_string(),
        }
    }
}

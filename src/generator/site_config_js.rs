//! The site-config module read by the shared layout script

use anyhow::Result;
use indexmap::IndexMap;
use serde::Serialize;

use crate::config::{FooterConfig, SiteConfig};

/// Fields of the site config that the browser needs
#[derive(Serialize)]
struct ClientConfig<'a> {
    name: &'a str,
    description: &'a str,
    domain: &'a str,
    footer: &'a FooterConfig,
    #[serde(flatten)]
    extra: &'a IndexMap<String, serde_json::Value>,
}

/// Render `export const siteConfig = {...};`
pub fn render(config: &SiteConfig) -> Result<String> {
    let client = ClientConfig {
        name: &config.name,
        description: &config.description,
        domain: &config.domain,
        footer: &config.footer,
        extra: &config.extra,
    };
    let json = serde_json::to_string_pretty(&client)?;
    Ok(format!("export const siteConfig = {};\n", json))
}

//! Scaffold a new post

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

use crate::Folio;

/// Create `content/posts/<slug>.md` and the post's image source folder.
///
/// Refuses to overwrite an existing post.
pub fn create_post(folio: &Folio, title: &str, today: NaiveDate) -> Result<PathBuf> {
    let title = title.trim();
    if title.is_empty() {
        bail!("A post title is required");
    }

    let slug = slug::slugify(title);
    if slug.is_empty() {
        bail!("Cannot derive a file name from title {:?}", title);
    }

    let file_path = folio.content_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        bail!("File already exists: {:?}", file_path);
    }

    fs::create_dir_all(&folio.content_dir)
        .with_context(|| format!("Failed to create {:?}", folio.content_dir))?;
    fs::write(&file_path, scaffold(title, today))
        .with_context(|| format!("Failed to write {:?}", file_path))?;
    tracing::info!("Created: {:?}", file_path);

    let images_dir = folio.path(&folio.config.paths.images_src).join(&slug);
    fs::create_dir_all(&images_dir)
        .with_context(|| format!("Failed to create {:?}", images_dir))?;
    tracing::info!("Created: {:?}", images_dir);

    Ok(file_path)
}

fn scaffold(title: &str, today: NaiveDate) -> String {
    format!(
        r#"---
title: "{}"
date: "{}"
excerpt: "A brief description of your post for the homepage."
tags: ["Tag1", "Tag2"]
draft: false
---

Your introduction paragraph goes here.

## First Section

Your content here. You can use **bold**, *italic*, and [links](https://example.com).

> Blockquotes are great for highlighting key ideas.

## Second Section

Continue your essay here.

## Conclusion

Wrap up your thoughts.
"#,
        title.replace('"', "\\\""),
        today.format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;

    #[test]
    fn test_create_post() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();

        let path = create_post(&folio, "Hello, \"Rust\" World!", today).unwrap();
        assert_eq!(path, dir.path().join("content/posts/hello-rust-world.md"));
        assert!(dir.path().join("assets/images/src/hello-rust-world").is_dir());

        let content = fs::read_to_string(&path).unwrap();
        let (fm, body) = FrontMatter::parse(&content).unwrap();
        let meta = fm.validate().unwrap();
        assert_eq!(meta.title, "Hello, \"Rust\" World!");
        assert_eq!(meta.date, today);
        assert_eq!(meta.tags, vec!["Tag1", "Tag2"]);
        assert!(!fm.draft);
        assert!(body.contains("## First Section"));
    }

    #[test]
    fn test_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();

        create_post(&folio, "Twice", today).unwrap();
        let err = create_post(&folio, "Twice", today).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_rejects_empty_title() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert!(create_post(&folio, "   ", today).is_err());
        assert!(create_post(&folio, "!!!", today).is_err());
    }
}

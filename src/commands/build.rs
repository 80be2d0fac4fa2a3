//! Build the site

use anyhow::{bail, Result};

use crate::content::loader::ContentLoader;
use crate::generator::Generator;
use crate::Folio;

pub use crate::generator::BuildReport;

/// Build switches
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Regenerate pages even when they are newer than their source
    pub force: bool,
    /// Publish drafts too
    pub include_drafts: bool,
}

/// Generate the static site
pub fn run(folio: &Folio, options: BuildOptions) -> Result<BuildReport> {
    let start = std::time::Instant::now();

    tracing::info!("Building blog...");
    if options.force {
        tracing::info!("(--force: rebuilding all files)");
    }

    if !folio.content_dir.is_dir() {
        bail!("Content directory not found: {:?}", folio.content_dir);
    }

    let generator = Generator::new(folio)?;

    let content = ContentLoader::new(folio).load_posts(options.include_drafts)?;
    if content.posts.is_empty() && content.drafts == 0 && content.invalid == 0 {
        tracing::warn!("No Markdown files found in {:?}", folio.content_dir);
    }

    let report = generator.generate(&content, options.force)?;

    tracing::info!("{}", report.summary());
    tracing::debug!("Built in {:.2}s", start.elapsed().as_secs_f64());

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use std::time::{Duration, SystemTime};

    const TEMPLATE: &str = r#"<html><head><title>YOUR_TITLE_HERE</title></head><body>
<div class="post-content">
<!-- YOUR CONTENT HERE -->
</div>
<div class="post-footer"></div>
</body></html>"#;

    fn backdate(path: &Path) {
        let past = SystemTime::now() - Duration::from_secs(3600);
        fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(past)
            .unwrap();
    }

    fn site() -> (tempfile::TempDir, Folio) {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        fs::create_dir_all(base.join("content/posts")).unwrap();
        fs::create_dir_all(base.join("blog")).unwrap();
        fs::create_dir_all(base.join("css")).unwrap();
        fs::write(
            base.join("site.config.json"),
            r#"{ "name": "Test Blog", "domain": "blog.example" }"#,
        )
        .unwrap();
        fs::write(base.join("blog/_template.html"), TEMPLATE).unwrap();
        fs::write(base.join("css/style.css"), "body {\n  margin: 0;\n}\n").unwrap();
        fs::write(
            base.join("content/posts/hello.md"),
            "---\ntitle: Hello\ndate: 2025-01-15\nexcerpt: First post\ntags: [Rust]\n---\n\n# Hi\n\nSome words.\n",
        )
        .unwrap();
        fs::write(
            base.join("content/posts/wip.md"),
            "---\ntitle: WIP\ndate: 2025-02-01\nexcerpt: Soon\ndraft: true\n---\n\nLater.\n",
        )
        .unwrap();
        fs::write(
            base.join("content/posts/broken.md"),
            "---\ntitle: Broken\nexcerpt: No date\n---\n",
        )
        .unwrap();
        backdate(&base.join("blog/_template.html"));
        for name in ["hello.md", "wip.md", "broken.md"] {
            backdate(&base.join("content/posts").join(name));
        }
        let folio = Folio::new(base).unwrap();
        (dir, folio)
    }

    #[test]
    fn test_full_build() {
        let (dir, folio) = site();
        let base = dir.path();

        let report = run(&folio, BuildOptions::default()).unwrap();
        assert_eq!(report.generated, 1);
        assert_eq!(report.drafts, 1);
        assert_eq!(report.invalid, 1);
        assert_eq!(report.posts, 1);

        let page = fs::read_to_string(base.join("blog/hello.html")).unwrap();
        assert!(page.contains("<title>Hello</title>"));
        assert!(page.contains("<h1"));
        assert!(!base.join("blog/wip.html").exists());

        let data = fs::read_to_string(base.join("js/blog-data.js")).unwrap();
        assert!(data.starts_with("export const blogPosts = "));
        assert!(data.contains("\"hello\""));
        assert!(!data.contains("WIP"));

        let sitemap = fs::read_to_string(base.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("https://blog.example/blog/hello.html"));

        let feed = fs::read_to_string(base.join("feed.xml")).unwrap();
        assert!(feed.contains("<title>Hello</title>"));

        assert!(base.join("css/style.min.css").is_file());
        assert!(base.join("js/site-config.js").is_file());
        assert!(base.join("sw.js").is_file());
    }

    #[test]
    fn test_incremental_and_forced_builds() {
        let (_dir, folio) = site();

        run(&folio, BuildOptions::default()).unwrap();
        let report = run(&folio, BuildOptions::default()).unwrap();
        assert_eq!(report.generated, 0);
        assert_eq!(report.unchanged, 1);

        let report = run(
            &folio,
            BuildOptions {
                force: true,
                include_drafts: false,
            },
        )
        .unwrap();
        assert_eq!(report.generated, 1);
        assert_eq!(report.unchanged, 0);
    }

    #[test]
    fn test_drafts_included() {
        let (dir, folio) = site();

        let report = run(
            &folio,
            BuildOptions {
                force: false,
                include_drafts: true,
            },
        )
        .unwrap();
        assert_eq!(report.generated, 2);
        assert_eq!(report.drafts, 0);
        assert!(dir.path().join("blog/wip.html").is_file());
    }

    #[test]
    fn test_build_then_clean() {
        let (dir, folio) = site();
        let base = dir.path();

        run(&folio, BuildOptions::default()).unwrap();
        folio.clean().unwrap();

        assert!(!base.join("blog/hello.html").exists());
        assert!(!base.join("js/blog-data.js").exists());
        assert!(!base.join("sitemap.xml").exists());
        assert!(!base.join("feed.xml").exists());
        assert!(base.join("blog/_template.html").is_file());
    }

    #[test]
    fn test_missing_template_fails() {
        let (dir, folio) = site();
        fs::remove_file(dir.path().join("blog/_template.html")).unwrap();
        assert!(run(&folio, BuildOptions::default()).is_err());
    }
}

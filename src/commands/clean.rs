//! Remove generated files

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::Folio;

/// Delete the generated artifacts and post pages, keeping the template.
///
/// A file that cannot be removed is logged and skipped.
pub fn run(folio: &Folio) -> Result<()> {
    tracing::info!("Cleaning generated files...");

    let paths = &folio.config.paths;
    for artifact in [&paths.blog_data, &paths.sitemap, &paths.feed] {
        let path = folio.path(artifact);
        if path.exists() {
            remove(folio, &path);
        }
    }

    let pattern = format!(
        "{}/*.html",
        glob::Pattern::escape(&folio.blog_dir.to_string_lossy())
    );
    for entry in glob::glob(&pattern)? {
        match entry {
            Ok(path) if !is_template(folio, &path) => remove(folio, &path),
            Ok(_) => {}
            Err(e) => tracing::error!("Failed to read {:?}: {}", e.path(), e.error()),
        }
    }

    tracing::info!("Clean complete.");
    Ok(())
}

/// Compared by file name, since glob drops a leading `./` from its results
fn is_template(folio: &Folio, path: &Path) -> bool {
    path.file_name().is_some() && path.file_name() == folio.template_path.file_name()
}

fn remove(folio: &Folio, path: &Path) {
    let shown = path.strip_prefix(&folio.base_dir).unwrap_or(path);
    match fs::remove_file(path) {
        Ok(()) => tracing::info!("Removed: {}", shown.display()),
        Err(e) => tracing::error!("Failed to remove {}: {}", shown.display(), e),
    }
}

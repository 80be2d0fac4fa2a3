//! Optimize images

use anyhow::Result;

use crate::images::{format_size, ImageOptimizer, OptimizeReport};
use crate::Folio;

/// Convert source images into responsive WebP variants
pub fn run(folio: &Folio, force: bool) -> Result<OptimizeReport> {
    tracing::info!("Optimizing images...");
    if force {
        tracing::info!("(--force: reprocessing all images)");
    }

    let paths = &folio.config.paths;
    let optimizer = ImageOptimizer::new(
        folio.path(&paths.images_src),
        folio.path(&paths.images_out),
        force,
    );
    let report = optimizer.run()?;

    if report.processed > 0 {
        tracing::info!("Done: {} images optimized", report.processed);
        if report.saved_bytes > 0 {
            tracing::info!(
                "{} saved on full-size conversions",
                format_size(report.saved_bytes)
            );
        }
    }
    if report.skipped > 0 {
        tracing::info!("{} images unchanged (skipped)", report.skipped);
    }

    Ok(report)
}

//! Image optimizer - responsive WebP variants and inline placeholders
//!
//! Every image under the source directory is written to the mirrored path
//! under the output directory as `<name>-400w.webp`, `<name>-800w.webp`,
//! `<name>-1200w.webp`, `<name>.webp` and `<name>-placeholder.txt`. The
//! placeholder holds a `data:` URI of a tiny rendition that the markdown
//! renderer inlines while the full image loads.

use anyhow::{Context, Result};
use base64::Engine;
use image::{imageops::FilterType, DynamicImage, ImageFormat};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::generator::freshness;

/// Responsive widths and their file suffixes
pub const SIZES: [(u32, &str); 3] = [(400, "-400w"), (800, "-800w"), (1200, "-1200w")];

pub const PLACEHOLDER_WIDTH: u32 = 20;

/// Source extensions, lowercase
pub const SUPPORTED_FORMATS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// An image found under the source directory
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub path: PathBuf,
    /// Directory relative to the source root, empty for top-level images
    pub relative_dir: PathBuf,
    /// File name without extension
    pub base_name: String,
}

impl SourceImage {
    pub fn display_path(&self) -> String {
        let name = self.path.file_name().unwrap_or_default().to_string_lossy();
        if self.relative_dir.as_os_str().is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.relative_dir.display(), name)
        }
    }
}

/// A file written for one source image
#[derive(Debug, Clone)]
pub struct OutputFile {
    pub name: String,
    pub size: u64,
    /// Set for the full-size conversion
    pub full_size: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptimizeReport {
    pub processed: usize,
    pub skipped: usize,
    /// Bytes saved by the full-size conversions
    pub saved_bytes: u64,
}

/// Converts source images to WebP variants
pub struct ImageOptimizer {
    src_dir: PathBuf,
    out_dir: PathBuf,
    force: bool,
}

impl ImageOptimizer {
    pub fn new(src_dir: PathBuf, out_dir: PathBuf, force: bool) -> Self {
        Self {
            src_dir,
            out_dir,
            force,
        }
    }

    /// Process every source image
    pub fn run(&self) -> Result<OptimizeReport> {
        fs::create_dir_all(&self.src_dir)
            .with_context(|| format!("Failed to create {:?}", self.src_dir))?;

        let images = self.collect();
        let mut report = OptimizeReport::default();

        if images.is_empty() {
            tracing::info!("No images found in {:?}", self.src_dir);
            return Ok(report);
        }

        for image in &images {
            let outputs = self
                .process(image)
                .with_context(|| format!("Failed to optimize {:?}", image.path))?;

            if outputs.is_empty() {
                tracing::debug!("Unchanged: {}", image.display_path());
                report.skipped += 1;
                continue;
            }

            tracing::info!("Optimized: {}", image.display_path());
            for output in &outputs {
                tracing::info!("  -> {} ({})", output.name, format_size(output.size));
            }

            let source_size = fs::metadata(&image.path).map(|m| m.len()).unwrap_or(0);
            if let Some(full) = outputs.iter().find(|o| o.full_size) {
                report.saved_bytes += source_size.saturating_sub(full.size);
            }
            report.processed += 1;
        }

        Ok(report)
    }

    /// Supported images under the source directory, sorted by path
    pub fn collect(&self) -> Vec<SourceImage> {
        let mut images: Vec<SourceImage> = WalkDir::new(&self.src_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && is_supported(e.path()))
            .filter_map(|e| {
                let path = e.into_path();
                let relative_dir = path
                    .parent()?
                    .strip_prefix(&self.src_dir)
                    .ok()?
                    .to_path_buf();
                let base_name = path.file_stem()?.to_string_lossy().to_string();
                Some(SourceImage {
                    path,
                    relative_dir,
                    base_name,
                })
            })
            .collect();
        images.sort_by(|a, b| a.path.cmp(&b.path));
        images
    }

    /// Write whichever outputs are missing or stale. Returns what was written.
    pub fn process(&self, image: &SourceImage) -> Result<Vec<OutputFile>> {
        let out_dir = self.out_dir.join(&image.relative_dir);
        let mut outputs = Vec::new();
        let mut decoded: Option<DynamicImage> = None;

        for (width, suffix) in SIZES {
            let name = format!("{}{}.webp", image.base_name, suffix);
            let path = out_dir.join(&name);
            if !self.needs_update(&image.path, &path) {
                continue;
            }
            let source = load(&image.path, &mut decoded)?;
            let size = write_webp(&resize_to_width(source, width), &path)?;
            outputs.push(OutputFile {
                name,
                size,
                full_size: false,
            });
        }

        let name = format!("{}.webp", image.base_name);
        let path = out_dir.join(&name);
        if self.needs_update(&image.path, &path) {
            let source = load(&image.path, &mut decoded)?;
            let size = write_webp(source, &path)?;
            outputs.push(OutputFile {
                name,
                size,
                full_size: true,
            });
        }

        let name = format!("{}-placeholder.txt", image.base_name);
        let path = out_dir.join(&name);
        if self.needs_update(&image.path, &path) {
            let source = load(&image.path, &mut decoded)?;
            let uri = placeholder_uri(source)?;
            fs::write(&path, &uri).with_context(|| format!("Failed to write {:?}", path))?;
            outputs.push(OutputFile {
                name,
                size: uri.len() as u64,
                full_size: false,
            });
        }

        Ok(outputs)
    }

    fn needs_update(&self, source: &Path, output: &Path) -> bool {
        self.force || !freshness::is_up_to_date(source, output)
    }
}

/// Decode the source once, on first use
fn load<'a>(path: &Path, cache: &'a mut Option<DynamicImage>) -> Result<&'a DynamicImage> {
    if cache.is_none() {
        let image = image::open(path).with_context(|| format!("Failed to decode {:?}", path))?;
        *cache = Some(image);
    }
    cache
        .as_ref()
        .context("image cache unexpectedly empty")
}

/// Scale down to `max_width`, keeping the aspect ratio. Never enlarges.
fn resize_to_width(image: &DynamicImage, max_width: u32) -> DynamicImage {
    if image.width() <= max_width {
        return image.clone();
    }
    let height = (image.height() as u64 * max_width as u64 / image.width() as u64).max(1) as u32;
    image.resize_exact(max_width, height, FilterType::Lanczos3)
}

fn encode_webp(image: &DynamicImage) -> Result<Vec<u8>> {
    // the WebP encoder only takes 8-bit RGB(A)
    let rgba = DynamicImage::ImageRgba8(image.to_rgba8());
    let mut buf = Vec::new();
    rgba.write_to(&mut Cursor::new(&mut buf), ImageFormat::WebP)?;
    Ok(buf)
}

fn write_webp(image: &DynamicImage, path: &Path) -> Result<u64> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let bytes = encode_webp(image)?;
    fs::write(path, &bytes).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(bytes.len() as u64)
}

fn placeholder_uri(image: &DynamicImage) -> Result<String> {
    let small = resize_to_width(image, PLACEHOLDER_WIDTH);
    let bytes = encode_webp(&small)?;
    Ok(format!(
        "data:image/webp;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    ))
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_FORMATS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Human-readable byte count
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{}B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1}KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1}MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::fs::File;
    use std::time::{Duration, SystemTime};

    fn write_png(path: &Path, width: u32, height: u32) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let img = RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]));
        img.save(path).unwrap();
        let past = SystemTime::now() - Duration::from_secs(3600);
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(past)
            .unwrap();
    }

    #[test]
    fn test_optimize_and_skip() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        let out = dir.path().join("out");
        write_png(&src.join("my-post/diagram.png"), 900, 450);
        fs::write(src.join("notes.txt"), "not an image").unwrap();

        let report = ImageOptimizer::new(src.clone(), out.clone(), false).run().unwrap();
        assert_eq!(report.processed, 1);
        assert_eq!(report.skipped, 0);

        let post_dir = out.join("my-post");
        for name in ["diagram-400w.webp", "diagram-800w.webp", "diagram-1200w.webp", "diagram.webp"] {
            assert!(post_dir.join(name).is_file(), "missing {}", name);
        }
        assert_eq!(image::open(post_dir.join("diagram-400w.webp")).unwrap().width(), 400);
        // never enlarged
        assert_eq!(image::open(post_dir.join("diagram-1200w.webp")).unwrap().width(), 900);

        let placeholder = fs::read_to_string(post_dir.join("diagram-placeholder.txt")).unwrap();
        assert!(placeholder.starts_with("data:image/webp;base64,"));

        let report = ImageOptimizer::new(src.clone(), out.clone(), false).run().unwrap();
        assert_eq!(report.processed, 0);
        assert_eq!(report.skipped, 1);

        let report = ImageOptimizer::new(src, out, true).run().unwrap();
        assert_eq!(report.processed, 1);
    }

    #[test]
    fn test_collect() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        write_png(&src.join("b.PNG"), 4, 4);
        write_png(&src.join("a/c.png"), 4, 4);
        fs::write(src.join("d.svg"), "<svg/>").unwrap();

        let optimizer = ImageOptimizer::new(src.clone(), dir.path().join("out"), false);
        let images = optimizer.collect();
        let names: Vec<String> = images.iter().map(|i| i.display_path()).collect();
        assert_eq!(names, ["a/c.png", "b.PNG"]);
        assert_eq!(images[0].relative_dir, PathBuf::from("a"));
        assert_eq!(images[1].base_name, "b");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512B");
        assert_eq!(format_size(1536), "1.5KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0MB");
    }
}

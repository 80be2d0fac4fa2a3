//! Incremental build checks based on modification times

use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// Get file modification time
pub fn get_mtime(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Whether `output` exists and was modified strictly after `source`.
///
/// Any metadata failure counts as stale.
pub fn is_up_to_date(source: &Path, output: &Path) -> bool {
    match (get_mtime(source), get_mtime(output)) {
        (Some(src), Some(out)) => out > src,
        _ => false,
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::error::{CollageError, Result};

/// Extensions picked up by the walker (compared case-insensitively).
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

pub fn is_supported_image(p: &Path) -> bool {
    matches!(
        p.extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase()),
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str())
    )
}

/// Recursively collects supported images under `root`, in walk order
/// (file names sorted within each directory).
///
/// A missing or non-directory `root` is an error; entries that cannot be read
/// further down are skipped with a warning.
pub fn collect_images(root: &Path) -> Result<Vec<PathBuf>> {
    let meta = fs::metadata(root).map_err(|e| {
        CollageError::InvalidInput(format!("stat input dir {}: {}", root.display(), e))
    })?;
    if !meta.is_dir() {
        return Err(CollageError::InvalidInput(format!(
            "input path {} is not a directory",
            root.display()
        )));
    }

    let mut images = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(path = ?e.path(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_dir() {
            continue;
        }
        if is_supported_image(entry.path()) {
            images.push(entry.into_path());
        }
    }
    Ok(images)
}

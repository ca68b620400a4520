use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::probe::is_image;

/// Recursively collect every readable image under `root`.
///
/// The tree is walked depth-unbounded, following symlinks, and every
/// regular file is probed with [`is_image`]. Paths come back in traversal
/// encounter order; nothing is sorted or deduplicated beyond what the
/// filesystem yields. Unreadable directory entries are silently skipped.
///
/// An empty result carries no further detail; the caller decides whether
/// to surface it as a "no images found" condition.
///
/// # Example
///
/// ```rust,no_run
/// use img_inspect::scan::scan_folder;
/// use std::path::Path;
///
/// let images = scan_folder(Path::new("./photos"));
/// println!("Found {} image(s)", images.len());
/// ```
pub fn scan_folder(root: &Path) -> Vec<PathBuf> {
    let mut images = Vec::new();

    if !root.is_dir() {
        log::warn!("Not a directory: {}", root.display());
        return images;
    }

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if entry.file_type().is_file() && is_image(path) {
            images.push(path.to_path_buf());
        }
    }

    log::debug!("Scanned {}: {} image(s)", root.display(), images.len());
    images
}

/// Expand a mixed list of file and directory paths into readable images.
///
/// Files are probed directly, directories go through [`scan_folder`], and
/// anything else is skipped with a warning.
pub fn collect_images(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut images = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_image(path) {
                images.push(path.clone());
            } else {
                log::warn!("Skipping non-image file: {}", path.display());
            }
        } else if path.is_dir() {
            images.extend(scan_folder(path));
        } else {
            log::warn!("Path does not exist: {}", path.display());
        }
    }

    images
}

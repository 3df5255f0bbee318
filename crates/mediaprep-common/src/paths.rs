//! Path utilities for matching files against extension allow-lists.
//!
//! Extensions are compared case-insensitively and without the leading dot,
//! so `"JPG"`, `".jpg"` and `"jpg"` all name the same allow-list entry.

use std::path::{Path, PathBuf};

/// Default extensions picked up by the image job.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Default extensions picked up by the video job.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv"];

/// Normalize an extension for comparison: strip leading dots and lowercase.
///
/// # Examples
///
/// ```
/// use mediaprep_common::paths::normalize_extension;
///
/// assert_eq!(normalize_extension(".JPG"), "jpg");
/// assert_eq!(normalize_extension("webp"), "webp");
/// ```
pub fn normalize_extension(ext: &str) -> String {
    ext.trim_start_matches('.').to_lowercase()
}

/// Lowercase extension of a path, if it has one.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Check if a path's extension is in the allow-list.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use mediaprep_common::paths::has_allowed_extension;
///
/// let allow = vec!["mp4".to_string(), "mkv".to_string()];
/// assert!(has_allowed_extension(Path::new("/videos/intro.MP4"), &allow));
/// assert!(!has_allowed_extension(Path::new("/videos/notes.txt"), &allow));
/// ```
pub fn has_allowed_extension(path: &Path, allow: &[String]) -> bool {
    extension_of(path)
        .map(|ext| allow.iter().any(|a| normalize_extension(a) == ext))
        .unwrap_or(false)
}

/// Replace the extension of a path, keeping directory and stem.
///
/// Only the final extension is replaced, so `photo.final.png` becomes
/// `photo.final.webp`.
pub fn replace_extension(path: &Path, ext: &str) -> PathBuf {
    path.with_extension(normalize_extension(ext))
}

/// Get the default image extension allow-list.
#[must_use]
pub fn image_extensions() -> &'static [&'static str] {
    IMAGE_EXTENSIONS
}

/// Get the default video extension allow-list.
#[must_use]
pub fn video_extensions() -> &'static [&'static str] {
    VIDEO_EXTENSIONS
}

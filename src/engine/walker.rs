//! Depth-first discovery of source files.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// A directory or entry that could not be read during the walk.
#[derive(Debug, Error)]
#[error("cannot read {}: {message}", display_path(.path))]
pub struct DiscoveryError {
    pub path: Option<PathBuf>,
    pub message: String,
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<unknown>".to_string())
}

impl From<walkdir::Error> for DiscoveryError {
    fn from(err: walkdir::Error) -> Self {
        let message = match err.io_error() {
            Some(io) => io.to_string(),
            None => err.to_string(),
        };
        Self {
            path: err.path().map(Path::to_path_buf),
            message,
        }
    }
}

/// Walks one or more roots and yields every regular file below them.
///
/// Errors are yielded in place of the unreadable entry and the walk carries
/// on with the remaining entries. Excluded directories are never entered.
/// Siblings are visited in file name order.
#[derive(Debug, Clone)]
pub struct SourceWalker {
    roots: Vec<PathBuf>,
    excluded: Vec<PathBuf>,
}

impl SourceWalker {
    pub fn new(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            excluded: Vec::new(),
        }
    }

    /// Never descend into `dir`.
    pub fn exclude(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Ok(canonical) = std::fs::canonicalize(&dir) {
            self.excluded.push(canonical);
        }
        self.excluded.push(dir);
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Start a new walk. Each call restarts from the roots.
    pub fn walk(&self) -> impl Iterator<Item = Result<PathBuf, DiscoveryError>> + '_ {
        self.roots.iter().flat_map(move |root| {
            WalkDir::new(root)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(move |entry| !self.is_excluded(entry))
                .filter_map(|entry| match entry {
                    Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.into_path())),
                    Ok(_) => None,
                    Err(err) => Some(Err(DiscoveryError::from(err))),
                })
        })
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        if self.excluded.is_empty() || !entry.file_type().is_dir() {
            return false;
        }
        if self.excluded.iter().any(|ex| ex == entry.path()) {
            return true;
        }
        std::fs::canonicalize(entry.path())
            .map(|canonical| self.excluded.contains(&canonical))
            .unwrap_or(false)
    }
}

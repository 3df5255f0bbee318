//! Staged outputs for tool execution.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tempfile::TempPath;

/// Prefix of staging files; they are hidden next to their destination.
pub const STAGING_PREFIX: &str = ".mediaprep-";

/// A hidden file next to the final destination that a tool writes into.
///
/// The destination only appears once [`commit`](Self::commit) moves the
/// finished file into place, so an interrupted or failed tool never leaves a
/// truncated file under the destination name. Dropping an uncommitted
/// staging file removes it.
///
/// The staging file keeps the destination's extension because both ffmpeg
/// and ImageMagick choose the output format from it.
///
/// # Example
///
/// ```no_run
/// use mediaprep_av::StagedOutput;
/// use std::path::Path;
///
/// let staged = StagedOutput::new(Path::new("out/intro-720p-mp4-h264.mp4"))?;
/// // run a tool that writes to staged.path()
/// staged.commit()?;
/// # Ok::<(), mediaprep_av::Error>(())
/// ```
#[derive(Debug)]
pub struct StagedOutput {
    temp_path: TempPath,
    destination: PathBuf,
}

impl StagedOutput {
    /// Create a staging file in the destination's directory.
    pub fn new(destination: &Path) -> Result<Self> {
        let dir = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let suffix = destination
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let mut builder = tempfile::Builder::new();
        builder.prefix(STAGING_PREFIX).suffix(&suffix);
        // 0666 minus the umask, like a plain `File::create`
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(std::fs::Permissions::from_mode(0o666));
        }

        let file = builder.tempfile_in(dir).map_err(|e| {
            Error::Staging(format!(
                "Failed to create staging file in {}: {}",
                dir.display(),
                e
            ))
        })?;

        Ok(Self {
            temp_path: file.into_temp_path(),
            destination: destination.to_path_buf(),
        })
    }

    /// Path the tool should write to.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }


    /// Move the staged file to its destination.
    ///
    /// Never replaces an existing destination; if one appeared in the
    /// meantime the staged file is discarded and an error returned.
    pub fn commit(self) -> Result<PathBuf> {
        let destination = self.destination;
        self.temp_path
            .persist_noclobber(&destination)
            .map_err(|e| {
                Error::Staging(format!(
                    "Failed to move output to {}: {}",
                    destination.display(),
                    e.error
                ))
            })?;

        Ok(destination)
    }

    /// Remove the staged file without committing.
    pub fn discard(self) {
        // TempPath removes the file on drop
        drop(self.temp_path);
    }
}

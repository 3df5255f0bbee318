//! Producing a single variant.

use super::outcome::ConversionResult;
use super::resolver::PlannedVariant;
use mediaprep_av::{StagedOutput, Transcoder};
use std::path::Path;

/// Runs one transcoder invocation per variant, guarded by an existence check.
pub struct ConversionExecutor<T> {
    transcoder: T,
}

impl<T: Transcoder> ConversionExecutor<T> {
    pub fn new(transcoder: T) -> Self {
        Self { transcoder }
    }

    /// Produce `variant` from `source`.
    ///
    /// An existing destination is never touched and yields `Skipped`. The
    /// tool writes to a staging file which is moved into place only on
    /// success, so failures leave no file behind.
    pub fn execute(&self, source: &Path, variant: &PlannedVariant) -> ConversionResult {
        let destination = &variant.destination;

        if destination_exists(destination) {
            tracing::debug!("Destination exists, skipping: {:?}", destination);
            return ConversionResult::Skipped {
                existing: destination.clone(),
            };
        }

        let staged = match StagedOutput::new(destination) {
            Ok(staged) => staged,
            Err(e) => return ConversionResult::failed(e.to_string()),
        };

        if let Err(e) = self
            .transcoder
            .transcode(source, staged.path(), &variant.params)
        {
            staged.discard();
            return ConversionResult::failed(e.to_string());
        }

        if let Err(e) = staged.commit() {
            return ConversionResult::failed(e.to_string());
        }

        ConversionResult::Converted {
            size_before: file_size(source),
            size_after: file_size(destination),
        }
    }
}

/// Existence check that also counts dangling symlinks as present.
fn destination_exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

fn file_size(path: &Path) -> u64 {
    match std::fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) => {
            tracing::warn!("Cannot read size of {:?}: {}", path, e);
            0
        }
    }
}

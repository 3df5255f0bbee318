//! Driving a whole job: walk, resolve, convert, report.

use super::executor::ConversionExecutor;
use super::outcome::{BatchSummary, ConversionResult, VariantOutcome};
use super::resolver::{ConvertibleFile, PlannedVariant, VariantResolver};
use super::walker::{DiscoveryError, SourceWalker};
use mediaprep_av::Transcoder;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A configured conversion job.
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub name: String,
    pub walker: SourceWalker,
    /// Allowed source extensions, without dots.
    pub extensions: Vec<String>,
    pub resolver: VariantResolver,
}

/// Progress notifications emitted while a job runs.
#[derive(Debug)]
pub enum BatchEvent<'a> {
    /// A path could not be read; the walk continues.
    DiscoveryFailed(&'a DiscoveryError),
    /// All convertible files have been discovered.
    FilesFound(usize),
    /// A file is about to be processed (1-based index).
    FileStarted {
        index: usize,
        total: usize,
        path: &'a Path,
    },
    /// A variant finished.
    VariantFinished(&'a VariantOutcome),
    /// Dry run: the variant would be attempted (or skipped if it exists).
    VariantPlanned {
        variant: &'a PlannedVariant,
        exists: bool,
    },
}

/// Event callback type
pub type EventCallback = Box<dyn Fn(&BatchEvent<'_>)>;

/// Processes one file at a time, one variant at a time.
pub struct BatchRunner<T> {
    executor: ConversionExecutor<T>,
    dry_run: bool,
    event_callback: Option<EventCallback>,
}

impl<T: Transcoder> BatchRunner<T> {
    pub fn new(transcoder: T) -> Self {
        Self {
            executor: ConversionExecutor::new(transcoder),
            dry_run: false,
            event_callback: None,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_event_callback(mut self, callback: EventCallback) -> Self {
        self.event_callback = Some(callback);
        self
    }

    fn emit(&self, event: BatchEvent<'_>) {
        if let Some(ref cb) = self.event_callback {
            cb(&event);
        }
    }

    /// Run `job` to completion.
    ///
    /// Per-file and per-variant failures are recorded in the summary and never
    /// stop the run.
    pub fn run(&self, job: &BatchJob) -> BatchSummary {
        let mut summary = BatchSummary::new(&job.name);
        tracing::info!("Starting {} job over {:?}", job.name, job.walker.roots());

        let mut files = Vec::new();
        for entry in job.walker.walk() {
            match entry {
                Ok(path) => {
                    if let Some(file) = ConvertibleFile::from_path(&path, &job.extensions) {
                        files.push(file);
                    } else {
                        tracing::trace!("Ignoring {:?}", path);
                    }
                }
                Err(e) => {
                    tracing::warn!("{}", e);
                    summary.discovery_errors += 1;
                    self.emit(BatchEvent::DiscoveryFailed(&e));
                }
            }
        }

        let total = files.len();
        self.emit(BatchEvent::FilesFound(total));

        // destination -> first source that claimed it in this run
        let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();

        for (i, file) in files.iter().enumerate() {
            summary.files_processed += 1;
            tracing::info!("[{}/{}] {:?}", i + 1, total, file.path);
            self.emit(BatchEvent::FileStarted {
                index: i + 1,
                total,
                path: &file.path,
            });

            for variant in job.resolver.resolve(file) {
                if self.dry_run {
                    let exists = variant.destination.symlink_metadata().is_ok();
                    self.emit(BatchEvent::VariantPlanned {
                        variant: &variant,
                        exists,
                    });
                    continue;
                }

                let collision = claimed
                    .get(&variant.destination)
                    .filter(|first| **first != file.path)
                    .cloned();
                let result = match collision {
                    Some(first) => ConversionResult::failed(format!(
                        "destination already produced from {} in this run",
                        first.display()
                    )),
                    None => {
                        claimed.insert(variant.destination.clone(), file.path.clone());
                        self.executor.execute(&file.path, &variant)
                    }
                };

                if let ConversionResult::Failed { ref message } = result {
                    tracing::warn!(
                        "Failed {:?} -> {:?}: {}",
                        file.path,
                        variant.destination,
                        message
                    );
                }

                summary.record(&result);
                let outcome = VariantOutcome {
                    source: file.path.clone(),
                    destination: variant.destination,
                    label: variant.params.label(),
                    result,
                };
                self.emit(BatchEvent::VariantFinished(&outcome));
            }
        }

        tracing::info!("{}", summary);
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediaprep_common::VariantParams;
    use std::cell::RefCell;
    use std::fs;
    use std::rc::Rc;

    struct CopyTranscoder;

    impl Transcoder for CopyTranscoder {
        fn transcode(
            &self,
            input: &Path,
            output: &Path,
            _params: &VariantParams,
        ) -> mediaprep_av::Result<()> {
            fs::copy(input, output)?;
            Ok(())
        }
    }

    fn image_job(root: &Path) -> BatchJob {
        BatchJob {
            name: "images".to_string(),
            walker: SourceWalker::new([root]),
            extensions: vec!["jpg".into(), "png".into()],
            resolver: VariantResolver::Sibling {
                target_extension: "webp".to_string(),
                quality: 80,
            },
        }
    }

    #[test]
    fn test_collision_is_reported_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("logo.jpg"), b"from jpg").unwrap();
        fs::write(dir.path().join("logo.png"), b"from png").unwrap();

        let summary = BatchRunner::new(CopyTranscoder).run(&image_job(dir.path()));

        assert_eq!(summary.converted, 1);
        assert_eq!(summary.failed, 1);
        // Siblings are visited in name order
        assert_eq!(fs::read(dir.path().join("logo.webp")).unwrap(), b"from jpg");
    }

    #[test]
    fn test_dry_run_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.jpg"), b"a").unwrap();
        fs::write(dir.path().join("b.png"), b"b").unwrap();
        fs::write(dir.path().join("b.webp"), b"done").unwrap();

        let planned = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&planned);
        let runner = BatchRunner::new(CopyTranscoder)
            .with_dry_run(true)
            .with_event_callback(Box::new(move |event: &BatchEvent<'_>| {
                if let BatchEvent::VariantPlanned { variant, exists } = event {
                    sink.borrow_mut()
                        .push((variant.destination.clone(), *exists));
                }
            }));

        let summary = runner.run(&image_job(dir.path()));

        assert_eq!(summary.files_processed, 2);
        assert_eq!(summary.variants(), 0);
        assert!(!dir.path().join("a.webp").exists());
        assert_eq!(
            *planned.borrow(),
            vec![
                (dir.path().join("a.webp"), false),
                (dir.path().join("b.webp"), true)
            ]
        );
    }

    #[test]
    fn test_events_are_streamed_in_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.jpg"), b"a").unwrap();

        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let runner = BatchRunner::new(CopyTranscoder).with_event_callback(Box::new(
            move |event: &BatchEvent<'_>| {
                let tag = match event {
                    BatchEvent::DiscoveryFailed(_) => "discovery",
                    BatchEvent::FilesFound(_) => "found",
                    BatchEvent::FileStarted { .. } => "file",
                    BatchEvent::VariantFinished(_) => "variant",
                    BatchEvent::VariantPlanned { .. } => "planned",
                };
                sink.borrow_mut().push(tag);
            },
        ));

        runner.run(&image_job(dir.path()));
        assert_eq!(*log.borrow(), vec!["found", "file", "variant"]);
    }

    #[test]
    fn test_missing_root_counts_discovery_error() {
        let dir = tempfile::tempdir().unwrap();
        let summary = BatchRunner::new(CopyTranscoder).run(&image_job(&dir.path().join("gone")));

        assert_eq!(summary.discovery_errors, 1);
        assert_eq!(summary.files_processed, 0);
        assert_eq!(
            summary.to_string(),
            "images: no input files found, 1 unreadable paths"
        );
    }
}

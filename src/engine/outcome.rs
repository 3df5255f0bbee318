//! Conversion outcomes and run summaries.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Result of attempting one variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ConversionResult {
    Converted { size_before: u64, size_after: u64 },
    Skipped { existing: PathBuf },
    Failed { message: String },
}

impl ConversionResult {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// Percentage saved relative to the source, `None` for an empty source.
    pub fn savings_percent(&self) -> Option<f64> {
        match self {
            Self::Converted {
                size_before,
                size_after,
            } => savings_percent(*size_before, *size_after),
            _ => None,
        }
    }
}

/// Percentage by which `after` is smaller than `before`.
///
/// Negative when the output grew. `None` when `before` is zero.
pub fn savings_percent(before: u64, after: u64) -> Option<f64> {
    if before == 0 {
        return None;
    }
    Some((before as f64 - after as f64) / before as f64 * 100.0)
}

/// Format a byte count as megabytes with two decimals.
pub fn format_mb(bytes: u64) -> String {
    format!("{:.2}MB", bytes as f64 / BYTES_PER_MB)
}

/// Outcome of one variant of one source file.
#[derive(Debug, Clone, Serialize)]
pub struct VariantOutcome {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub label: String,
    pub result: ConversionResult,
}

impl fmt::Display for VariantOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            ConversionResult::Converted {
                size_before,
                size_after,
            } => {
                writeln!(
                    f,
                    "Converted: {} -> {}",
                    self.source.display(),
                    self.destination.display()
                )?;
                match savings_percent(*size_before, *size_after) {
                    Some(pct) => write!(
                        f,
                        "Size reduction: {:.2}% ({} -> {})",
                        pct,
                        format_mb(*size_before),
                        format_mb(*size_after)
                    ),
                    None => write!(f, "Size reduction: n/a (empty source)"),
                }
            }
            ConversionResult::Skipped { existing } => {
                write!(f, "Skipping {} - already exists", existing.display())
            }
            ConversionResult::Failed { message } => write!(
                f,
                "Error converting {} -> {}: {}",
                self.source.display(),
                self.destination.display(),
                message
            ),
        }
    }
}

/// Running totals for one job.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub job: String,
    /// Files whose extension matched the allow-list.
    pub files_processed: usize,
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub discovery_errors: usize,
    pub bytes_before: u64,
    pub bytes_after: u64,
}

impl BatchSummary {
    pub fn new(job: impl Into<String>) -> Self {
        Self {
            job: job.into(),
            ..Default::default()
        }
    }

    pub fn record(&mut self, result: &ConversionResult) {
        match result {
            ConversionResult::Converted {
                size_before,
                size_after,
            } => {
                self.converted += 1;
                self.bytes_before += size_before;
                self.bytes_after += size_after;
            }
            ConversionResult::Skipped { .. } => self.skipped += 1,
            ConversionResult::Failed { .. } => self.failed += 1,
        }
    }

    /// Total variants attempted.
    pub fn variants(&self) -> usize {
        self.converted + self.skipped + self.failed
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.files_processed == 0 {
            write!(f, "{}: no input files found", self.job)?;
        } else {
            write!(
                f,
                "{}: {} files processed ({} converted, {} skipped, {} failed)",
                self.job, self.files_processed, self.converted, self.skipped, self.failed
            )?;
        }
        if self.discovery_errors > 0 {
            write!(f, ", {} unreadable paths", self.discovery_errors)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(result: ConversionResult) -> VariantOutcome {
        VariantOutcome {
            source: PathBuf::from("images/a.jpg"),
            destination: PathBuf::from("images/a.webp"),
            label: "webp q80".to_string(),
            result,
        }
    }

    #[test]
    fn test_savings_percent() {
        assert_eq!(savings_percent(200, 50), Some(75.0));
        assert_eq!(savings_percent(100, 150), Some(-50.0));
        assert_eq!(savings_percent(0, 10), None);
        assert_eq!(savings_percent(0, 0), None);
    }

    #[test]
    fn test_format_mb() {
        assert_eq!(format_mb(0), "0.00MB");
        assert_eq!(format_mb(1024 * 1024), "1.00MB");
        assert_eq!(format_mb(1_572_864), "1.50MB");
    }

    #[test]
    fn test_converted_line() {
        let line = outcome(ConversionResult::Converted {
            size_before: 2 * 1024 * 1024,
            size_after: 1024 * 1024,
        })
        .to_string();

        assert_eq!(
            line,
            "Converted: images/a.jpg -> images/a.webp\nSize reduction: 50.00% (2.00MB -> 1.00MB)"
        );
    }

    #[test]
    fn test_empty_source_line() {
        let line = outcome(ConversionResult::Converted {
            size_before: 0,
            size_after: 34,
        })
        .to_string();
        assert!(line.ends_with("Size reduction: n/a (empty source)"));
    }

    #[test]
    fn test_skipped_and_failed_lines() {
        let skipped = outcome(ConversionResult::Skipped {
            existing: PathBuf::from("images/a.webp"),
        });
        assert_eq!(skipped.to_string(), "Skipping images/a.webp - already exists");

        let failed = outcome(ConversionResult::failed("convert: exited with exit status: 1"));
        assert_eq!(
            failed.to_string(),
            "Error converting images/a.jpg -> images/a.webp: convert: exited with exit status: 1"
        );
    }

    #[test]
    fn test_summary() {
        let mut summary = BatchSummary::new("images");
        assert_eq!(summary.to_string(), "images: no input files found");

        summary.files_processed = 3;
        summary.record(&ConversionResult::Converted {
            size_before: 10,
            size_after: 4,
        });
        summary.record(&ConversionResult::Skipped {
            existing: PathBuf::from("x"),
        });
        summary.record(&ConversionResult::failed("boom"));

        assert_eq!(summary.variants(), 3);
        assert_eq!(summary.bytes_before, 10);
        assert_eq!(
            summary.to_string(),
            "images: 3 files processed (1 converted, 1 skipped, 1 failed)"
        );
    }

    #[test]
    fn test_summary_reports_unreadable_paths() {
        let mut summary = BatchSummary::new("images");
        summary.discovery_errors = 1;
        assert_eq!(
            summary.to_string(),
            "images: no input files found, 1 unreadable paths"
        );

        summary.files_processed = 1;
        summary.record(&ConversionResult::failed("boom"));
        assert_eq!(
            summary.to_string(),
            "images: 1 files processed (0 converted, 0 skipped, 1 failed), 1 unreadable paths"
        );
    }
}

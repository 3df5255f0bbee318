//! Batch conversion engine.
//!
//! A job walks its source roots ([`walker`]), keeps files whose extension is
//! on the allow-list, expands each into planned variants ([`resolver`]) and
//! produces them one at a time ([`executor`]). [`orchestrator`] ties these
//! together and reports [`outcome`]s as it goes.
//!
//! The files on disk are the only state: an existing destination means the
//! variant is done, so re-running a job resumes where the last run stopped.

pub mod executor;
pub mod orchestrator;
pub mod outcome;
pub mod resolver;
pub mod walker;

pub use executor::ConversionExecutor;
pub use orchestrator::{BatchEvent, BatchJob, BatchRunner, EventCallback};
pub use outcome::{BatchSummary, ConversionResult, VariantOutcome};
pub use resolver::{ConvertibleFile, PlannedVariant, VariantResolver};
pub use walker::{DiscoveryError, SourceWalker};

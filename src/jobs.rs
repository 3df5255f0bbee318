//! Building runnable jobs from configuration.

use crate::config::{Config, ImageJobConfig, ToolsConfig, VideoJobConfig};
use crate::engine::{BatchJob, BatchRunner, BatchSummary, EventCallback, SourceWalker, VariantResolver};
use anyhow::{Context, Result};
use mediaprep_av::tools::{CONVERT, FFMPEG};
use mediaprep_av::{get_tool_path, AudioSettings, ImageEncoder, VideoEncoder};
use mediaprep_common::paths::normalize_extension;
use std::path::{Path, PathBuf};

/// The jobs mediaprep knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum JobKind {
    Images,
    Videos,
}

impl JobKind {
    /// Jobs in the order `run` executes them.
    pub const ALL: [JobKind; 2] = [JobKind::Images, JobKind::Videos];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Images => "images",
            Self::Videos => "videos",
        }
    }

    /// Singular noun used in progress output.
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Images => "image",
            Self::Videos => "video",
        }
    }

    pub fn enabled(&self, config: &Config) -> bool {
        match self {
            Self::Images => config.images.enabled,
            Self::Videos => config.videos.enabled,
        }
    }
}

fn normalized(extensions: &[String]) -> Vec<String> {
    extensions.iter().map(|e| normalize_extension(e)).collect()
}

/// Sibling conversion over the image roots.
pub fn image_job(config: &ImageJobConfig) -> BatchJob {
    BatchJob {
        name: JobKind::Images.name().to_string(),
        walker: SourceWalker::new(&config.roots),
        extensions: normalized(&config.extensions),
        resolver: VariantResolver::Sibling {
            target_extension: normalize_extension(&config.target_extension),
            quality: config.quality,
        },
    }
}

/// Fan-out over the video roots, never descending into the output directory.
pub fn video_job(config: &VideoJobConfig) -> BatchJob {
    BatchJob {
        name: JobKind::Videos.name().to_string(),
        walker: SourceWalker::new(&config.roots).exclude(&config.output_dir),
        extensions: normalized(&config.extensions),
        resolver: VariantResolver::FanOut {
            output_dir: config.output_dir.clone(),
            formats: config.formats.clone(),
            resolutions: config.resolutions.clone(),
            pattern: config.output_pattern.clone(),
        },
    }
}

/// Create the video input roots and output directory if missing.
pub fn prepare_video_dirs(config: &VideoJobConfig) -> Result<()> {
    for dir in config.roots.iter().chain(std::iter::once(&config.output_dir)) {
        if !dir.is_dir() {
            tracing::info!("Creating directory {:?}", dir);
        }
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {:?}", dir))?;
    }
    Ok(())
}

/// Locate a tool, falling back to the bare name when nothing will be executed.
fn resolve_tool(name: &str, configured: Option<&Path>, dry_run: bool) -> Result<PathBuf> {
    match get_tool_path(name, configured) {
        Ok(path) => Ok(path),
        Err(e) if dry_run => {
            tracing::debug!("{}; dry run continues", e);
            Ok(configured.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(name)))
        }
        Err(e) => Err(e).with_context(|| format!("Cannot run without {}", name)),
    }
}

pub fn image_encoder(tools: &ToolsConfig, dry_run: bool) -> Result<ImageEncoder> {
    let program = resolve_tool(CONVERT, tools.convert_path.as_deref(), dry_run)?;
    Ok(ImageEncoder::new(program))
}

pub fn video_encoder(config: &Config, dry_run: bool) -> Result<VideoEncoder> {
    let program = resolve_tool(FFMPEG, config.tools.ffmpeg_path.as_deref(), dry_run)?;
    Ok(VideoEncoder::new(program).with_audio(AudioSettings {
        codec: config.videos.audio_codec.clone(),
        bitrate: config.videos.audio_bitrate.clone(),
    }))
}

/// Run one job end to end with the real tools.
///
/// Errors are orchestration faults only; per-file failures are in the summary.
pub fn run_job(
    kind: JobKind,
    config: &Config,
    dry_run: bool,
    events: EventCallback,
) -> Result<BatchSummary> {
    let summary = match kind {
        JobKind::Images => {
            let encoder = image_encoder(&config.tools, dry_run)?;
            BatchRunner::new(encoder)
                .with_dry_run(dry_run)
                .with_event_callback(events)
                .run(&image_job(&config.images))
        }
        JobKind::Videos => {
            let encoder = video_encoder(config, dry_run)?;
            if !dry_run {
                prepare_video_dirs(&config.videos)?;
            }
            BatchRunner::new(encoder)
                .with_dry_run(dry_run)
                .with_event_callback(events)
                .run(&video_job(&config.videos))
        }
    };
    Ok(summary)
}

/// Outcome of running several jobs in sequence.
#[derive(Debug, Default)]
pub struct RunReport {
    pub summaries: Vec<BatchSummary>,
    /// Jobs that could not start or finish, with the fault.
    pub faults: Vec<(JobKind, anyhow::Error)>,
}

/// Run `kinds` in order. A fault in one job is recorded and the next job
/// still runs.
pub fn run_jobs(
    kinds: &[JobKind],
    config: &Config,
    dry_run: bool,
    mut events: impl FnMut(JobKind) -> EventCallback,
) -> RunReport {
    let mut report = RunReport::default();
    for &kind in kinds {
        match run_job(kind, config, dry_run, events(kind)) {
            Ok(summary) => report.summaries.push(summary),
            Err(e) => {
                tracing::error!("{} job did not run: {:#}", kind.name(), e);
                report.faults.push((kind, e));
            }
        }
    }
    report
}

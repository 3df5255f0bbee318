//! # mediaprep-av
//!
//! Wrappers around the external tools that produce web media assets.
//!
//! This crate provides:
//! - Tool discovery (`convert`, `ffmpeg`) and a blocking command runner
//! - Image re-encoding through ImageMagick
//! - Video transcoding and scaling through ffmpeg
//! - Staged outputs that only appear at their destination once complete
//!
//! ## Features
//!
//! - `tracing` - Enable tracing support
//!
//! ## Example
//!
//! ```no_run
//! use mediaprep_av::{ImageEncoder, StagedOutput, Transcoder};
//! use mediaprep_common::VariantParams;
//! use std::path::Path;
//!
//! let encoder = ImageEncoder::new("convert");
//! let staged = StagedOutput::new(Path::new("static/images/hero.webp"))?;
//! let params = VariantParams::Image { format: "webp".into(), quality: 80 };
//! encoder.transcode(Path::new("static/images/hero.jpg"), staged.path(), &params)?;
//! staged.commit()?;
//! # Ok::<(), mediaprep_av::Error>(())
//! ```

pub mod command;
mod error;
pub mod staging;
pub mod template;
pub mod tools;
pub mod transcode;

// Re-exports
pub use command::{ToolCommand, ToolOutput};
pub use error::{Error, Result};
pub use staging::StagedOutput;
pub use template::TemplateContext;
pub use tools::{check_tool, check_tools, get_tool_path, require_tool, ToolInfo};
pub use transcode::{AudioSettings, ImageEncoder, Transcoder, VideoEncoder};

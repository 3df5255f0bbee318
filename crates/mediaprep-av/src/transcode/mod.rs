//! Media transcoding through external tools.
//!
//! - [`ImageEncoder`]: re-encodes raster images with ImageMagick
//! - [`VideoEncoder`]: transcodes and scales video with ffmpeg

mod image;
mod video;

pub use image::ImageEncoder;
pub use video::{AudioSettings, VideoEncoder};

use crate::Result;
use mediaprep_common::VariantParams;
use std::path::Path;

/// Produces one variant of a source file.
///
/// Implementations write `output` and nothing else. `output` may already
/// exist as an empty staging file and must be overwritten.
pub trait Transcoder {
    fn transcode(&self, input: &Path, output: &Path, params: &VariantParams) -> Result<()>;
}

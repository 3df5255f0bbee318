//! Variant descriptors shared by the engine and the transcoders.
//!
//! A *variant* is one output rendition of a source file: either a single
//! re-encoded image, or one (video format, resolution) pair.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A video output format: codec, container and quality settings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoFormat {
    /// Name used in output file names (e.g. `mp4-h264`).
    pub name: String,
    /// Container file extension without the dot.
    pub extension: String,
    /// Encoder passed to `-c:v` (e.g. `libx264`).
    pub codec: String,
    /// Constant rate factor; lower means higher quality.
    pub crf: u8,
    /// Encoder speed preset.
    pub preset: String,
}

impl VideoFormat {
    /// H.264 in MP4 at CRF 23.
    pub fn h264() -> Self {
        Self {
            name: "mp4-h264".to_string(),
            extension: "mp4".to_string(),
            codec: "libx264".to_string(),
            crf: 23,
            preset: "slow".to_string(),
        }
    }

    /// H.265 in MP4 at CRF 28.
    pub fn h265() -> Self {
        Self {
            name: "mp4-h265".to_string(),
            extension: "mp4".to_string(),
            codec: "libx265".to_string(),
            crf: 28,
            preset: "slow".to_string(),
        }
    }
}

impl fmt::Display for VideoFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} crf {})", self.name, self.codec, self.crf)
    }
}

/// Target frame size for a scaled rendition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// 1080p, 720p and 480p.
    pub fn web_ladder() -> Vec<Self> {
        vec![
            Self::new(1920, 1080),
            Self::new(1280, 720),
            Self::new(854, 480),
        ]
    }

    /// Argument for ffmpeg's `scale` filter.
    pub fn scale_filter(&self) -> String {
        format!("scale={}:{}", self.width, self.height)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parameters for producing one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum VariantParams {
    /// Re-encode a raster image into a web format.
    Image {
        /// Target format extension (e.g. `webp`).
        format: String,
        /// Encoder quality, 0-100.
        quality: u8,
    },
    /// Transcode and scale a video.
    Video {
        format: VideoFormat,
        resolution: Resolution,
    },
}

impl VariantParams {
    /// Short label used in progress output.
    pub fn label(&self) -> String {
        match self {
            Self::Image { format, quality } => format!("{} q{}", format, quality),
            Self::Video { format, resolution } => {
                format!("{}p {}", resolution.height, format.name)
            }
        }
    }
}

impl fmt::Display for VariantParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

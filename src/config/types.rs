use mediaprep_common::paths::{image_extensions, video_extensions};
use mediaprep_common::{Resolution, VideoFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub images: ImageJobConfig,

    #[serde(default)]
    pub videos: VideoJobConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

/// Image job: re-encode rasters into a sibling web format.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImageJobConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_image_roots")]
    pub roots: Vec<PathBuf>,

    #[serde(default = "default_image_extensions")]
    pub extensions: Vec<String>,

    #[serde(default = "default_target_extension")]
    pub target_extension: String,

    #[serde(default = "default_quality")]
    pub quality: u8,
}

impl Default for ImageJobConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            roots: default_image_roots(),
            extensions: default_image_extensions(),
            target_extension: default_target_extension(),
            quality: default_quality(),
        }
    }
}

/// Video job: fan each source out into formats × resolutions.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VideoJobConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_video_roots")]
    pub roots: Vec<PathBuf>,

    /// Renditions are written here, never into the source tree.
    #[serde(default = "default_video_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_video_extensions")]
    pub extensions: Vec<String>,

    /// Output file name template, see `TemplateContext`.
    #[serde(default = "default_output_pattern")]
    pub output_pattern: String,

    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,

    #[serde(default = "default_audio_bitrate")]
    pub audio_bitrate: String,

    #[serde(default = "default_formats")]
    pub formats: Vec<VideoFormat>,

    #[serde(default = "Resolution::web_ladder")]
    pub resolutions: Vec<Resolution>,
}

impl Default for VideoJobConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            roots: default_video_roots(),
            output_dir: default_video_output_dir(),
            extensions: default_video_extensions(),
            output_pattern: default_output_pattern(),
            audio_codec: default_audio_codec(),
            audio_bitrate: default_audio_bitrate(),
            formats: default_formats(),
            resolutions: Resolution::web_ladder(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub convert_path: Option<PathBuf>,

    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_image_roots() -> Vec<PathBuf> {
    vec![PathBuf::from("static/images")]
}

fn default_image_extensions() -> Vec<String> {
    image_extensions().iter().map(|s| s.to_string()).collect()
}

fn default_target_extension() -> String {
    "webp".to_string()
}

fn default_quality() -> u8 {
    80
}

fn default_video_roots() -> Vec<PathBuf> {
    vec![PathBuf::from("static/videos/input")]
}

fn default_video_output_dir() -> PathBuf {
    PathBuf::from("static/videos/output")
}

fn default_video_extensions() -> Vec<String> {
    video_extensions().iter().map(|s| s.to_string()).collect()
}

fn default_output_pattern() -> String {
    "{filestem}-{height}p-{format}.{extension}".to_string()
}

fn default_audio_codec() -> String {
    "aac".to_string()
}

fn default_audio_bitrate() -> String {
    "128k".to_string()
}

fn default_formats() -> Vec<VideoFormat> {
    vec![VideoFormat::h264(), VideoFormat::h265()]
}

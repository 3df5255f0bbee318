//! Video transcoding with ffmpeg.

use super::Transcoder;
use crate::{Error, Result, ToolCommand};
use mediaprep_common::{Resolution, VariantParams, VideoFormat};
use std::path::{Path, PathBuf};

/// Audio track settings applied to every rendition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSettings {
    /// ffmpeg audio encoder.
    pub codec: String,
    /// Target bitrate (e.g. `128k`).
    pub bitrate: String,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            codec: "aac".to_string(),
            bitrate: "128k".to_string(),
        }
    }
}

/// Transcodes a video into one codec and resolution.
#[derive(Debug, Clone)]
pub struct VideoEncoder {
    program: PathBuf,
    audio: AudioSettings,
}

impl VideoEncoder {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            audio: AudioSettings::default(),
        }
    }

    pub fn with_audio(mut self, audio: AudioSettings) -> Self {
        self.audio = audio;
        self
    }

    /// Build the ffmpeg command for one rendition.
    ///
    /// `-y` is passed because the output is a staging file that already
    /// exists; destinations themselves are never handed to ffmpeg.
    pub fn command(
        &self,
        input: &Path,
        output: &Path,
        format: &VideoFormat,
        resolution: &Resolution,
    ) -> ToolCommand {
        let mut cmd = ToolCommand::new(&self.program);
        cmd.args(["-hide_banner", "-nostdin", "-y", "-i"])
            .arg(input.to_string_lossy())
            .args(["-c:v", format.codec.as_str()])
            .args(["-crf".to_string(), format.crf.to_string()])
            .args(["-preset", format.preset.as_str()])
            .args(["-vf".to_string(), resolution.scale_filter()])
            .args(["-c:a", self.audio.codec.as_str()])
            .args(["-b:a", self.audio.bitrate.as_str()])
            .arg(output.to_string_lossy());
        cmd
    }
}

impl Transcoder for VideoEncoder {
    fn transcode(&self, input: &Path, output: &Path, params: &VariantParams) -> Result<()> {
        let VariantParams::Video { format, resolution } = params else {
            return Err(Error::InvalidInput(format!(
                "video encoder cannot produce {}",
                params
            )));
        };

        if !input.exists() {
            return Err(Error::file_not_found(input));
        }

        #[cfg(feature = "tracing")]
        tracing::info!("Transcoding {:?} to {} at {}", input, format.name, resolution);

        self.command(input, output, format, resolution).execute()?;
        Ok(())
    }
}

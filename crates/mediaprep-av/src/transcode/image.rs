//! Image re-encoding with ImageMagick.

use super::Transcoder;
use crate::{Error, Result, ToolCommand};
use mediaprep_common::VariantParams;
use std::path::{Path, PathBuf};

/// Re-encodes a raster image through `convert <in> -quality <q> <out>`.
///
/// The output format follows the output file's extension.
#[derive(Debug, Clone)]
pub struct ImageEncoder {
    program: PathBuf,
}

impl ImageEncoder {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Build the command for one conversion.
    pub fn command(&self, input: &Path, output: &Path, quality: u8) -> ToolCommand {
        let mut cmd = ToolCommand::new(&self.program);
        cmd.arg(input.to_string_lossy())
            .arg("-quality")
            .arg(quality.min(100).to_string())
            .arg(output.to_string_lossy());
        cmd
    }
}

impl Transcoder for ImageEncoder {
    fn transcode(&self, input: &Path, output: &Path, params: &VariantParams) -> Result<()> {
        let VariantParams::Image { quality, .. } = params else {
            return Err(Error::InvalidInput(format!(
                "image encoder cannot produce {}",
                params
            )));
        };

        if !input.exists() {
            return Err(Error::file_not_found(input));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("Encoding {:?} -> {:?} at quality {}", input, output, quality);

        self.command(input, output, *quality).execute()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediaprep_common::{Resolution, VideoFormat};

    #[test]
    fn test_command_args() {
        let encoder = ImageEncoder::new("convert");
        let cmd = encoder.command(Path::new("images/a.jpg"), Path::new("images/a.webp"), 80);
        assert_eq!(
            cmd.get_args(),
            &["images/a.jpg", "-quality", "80", "images/a.webp"]
        );
    }

    #[test]
    fn test_quality_is_clamped() {
        let encoder = ImageEncoder::new("convert");
        let cmd = encoder.command(Path::new("a.png"), Path::new("a.webp"), 150);
        assert_eq!(cmd.get_args()[2], "100");
    }

    #[test]
    fn test_rejects_video_params() {
        let encoder = ImageEncoder::new("convert");
        let params = VariantParams::Video {
            format: VideoFormat::h264(),
            resolution: Resolution::new(1920, 1080),
        };
        let err = encoder
            .transcode(Path::new("a.png"), Path::new("a.webp"), &params)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_missing_input() {
        let encoder = ImageEncoder::new("convert");
        let params = VariantParams::Image {
            format: "webp".to_string(),
            quality: 80,
        };
        let err = encoder
            .transcode(Path::new("/nonexistent/a.png"), Path::new("a.webp"), &params)
            .unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}

//! Mapping source files to the variants they should produce.

use mediaprep_av::TemplateContext;
use mediaprep_common::paths::{extension_of, has_allowed_extension, replace_extension};
use mediaprep_common::{Resolution, VariantParams, VideoFormat};
use std::path::{Path, PathBuf};

/// A source file whose extension is on the job's allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertibleFile {
    pub path: PathBuf,
    /// Lowercase extension without the dot.
    pub extension: String,
}

impl ConvertibleFile {
    /// Returns `None` when the extension is not allowed.
    pub fn from_path(path: &Path, allow: &[String]) -> Option<Self> {
        if !has_allowed_extension(path, allow) {
            return None;
        }
        Some(Self {
            path: path.to_path_buf(),
            extension: extension_of(path)?,
        })
    }
}

/// One output to attempt for a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedVariant {
    pub destination: PathBuf,
    pub params: VariantParams,
}

/// How a job derives outputs from a source file.
#[derive(Debug, Clone)]
pub enum VariantResolver {
    /// One output next to the source with the extension replaced.
    Sibling { target_extension: String, quality: u8 },
    /// Every format × resolution pair, written into `output_dir`.
    FanOut {
        output_dir: PathBuf,
        formats: Vec<VideoFormat>,
        resolutions: Vec<Resolution>,
        /// File name template rendered with [`TemplateContext`].
        pattern: String,
    },
}

impl VariantResolver {
    /// Variants for one file, formats outermost for fan-out.
    pub fn resolve(&self, file: &ConvertibleFile) -> Vec<PlannedVariant> {
        match self {
            Self::Sibling {
                target_extension,
                quality,
            } => vec![PlannedVariant {
                destination: replace_extension(&file.path, target_extension),
                params: VariantParams::Image {
                    format: target_extension.clone(),
                    quality: *quality,
                },
            }],
            Self::FanOut {
                output_dir,
                formats,
                resolutions,
                pattern,
            } => {
                let source = TemplateContext::new().with_source(&file.path);
                formats
                    .iter()
                    .flat_map(|format| {
                        resolutions.iter().map(move |resolution| (format, resolution))
                    })
                    .map(|(format, resolution)| {
                        let name = source
                            .clone()
                            .with_video(format, resolution)
                            .substitute(pattern);
                        PlannedVariant {
                            destination: output_dir.join(name),
                            params: VariantParams::Video {
                                format: format.clone(),
                                resolution: *resolution,
                            },
                        }
                    })
                    .collect()
            }
        }
    }

    /// Number of variants every file yields.
    pub fn variants_per_file(&self) -> usize {
        match self {
            Self::Sibling { .. } => 1,
            Self::FanOut {
                formats,
                resolutions,
                ..
            } => formats.len() * resolutions.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn images() -> Vec<String> {
        vec!["jpg".into(), "jpeg".into(), "png".into()]
    }

    fn fan_out() -> VariantResolver {
        VariantResolver::FanOut {
            output_dir: PathBuf::from("static/videos/output"),
            formats: vec![VideoFormat::h264(), VideoFormat::h265()],
            resolutions: Resolution::web_ladder(),
            pattern: "{filestem}-{height}p-{format}.{extension}".to_string(),
        }
    }

    #[test]
    fn test_convertible_file() {
        let file = ConvertibleFile::from_path(Path::new("images/sub/B.PNG"), &images()).unwrap();
        assert_eq!(file.extension, "png");
        assert_eq!(file.path, PathBuf::from("images/sub/B.PNG"));

        assert!(ConvertibleFile::from_path(Path::new("images/c.txt"), &images()).is_none());
        assert!(ConvertibleFile::from_path(Path::new("images/a.webp"), &images()).is_none());
    }

    #[test]
    fn test_sibling_variant() {
        let resolver = VariantResolver::Sibling {
            target_extension: "webp".to_string(),
            quality: 80,
        };
        let file = ConvertibleFile::from_path(Path::new("images/sub/b.png"), &images()).unwrap();

        let variants = resolver.resolve(&file);
        assert_eq!(
            variants,
            vec![PlannedVariant {
                destination: PathBuf::from("images/sub/b.webp"),
                params: VariantParams::Image {
                    format: "webp".to_string(),
                    quality: 80
                },
            }]
        );
        assert_eq!(resolver.variants_per_file(), 1);
    }

    #[test]
    fn test_fan_out_is_full_product() {
        let resolver = fan_out();
        let file =
            ConvertibleFile::from_path(Path::new("static/videos/input/hero.mov"), &["mov".into()])
                .unwrap();

        let variants = resolver.resolve(&file);
        assert_eq!(variants.len(), 6);
        assert_eq!(resolver.variants_per_file(), 6);

        let names: Vec<String> = variants
            .iter()
            .map(|v| {
                v.destination
                    .file_name()
                    .unwrap()
                    .to_string_lossy()
                    .to_string()
            })
            .collect();
        assert_eq!(
            names,
            vec![
                "hero-1080p-mp4-h264.mp4",
                "hero-720p-mp4-h264.mp4",
                "hero-480p-mp4-h264.mp4",
                "hero-1080p-mp4-h265.mp4",
                "hero-720p-mp4-h265.mp4",
                "hero-480p-mp4-h265.mp4",
            ]
        );

        let unique: HashSet<_> = variants.iter().map(|v| &v.destination).collect();
        assert_eq!(unique.len(), 6);
        assert!(variants
            .iter()
            .all(|v| v.destination.starts_with("static/videos/output")));
    }

    #[test]
    fn test_fan_out_empty_product() {
        let resolver = VariantResolver::FanOut {
            output_dir: PathBuf::from("out"),
            formats: vec![VideoFormat::h264()],
            resolutions: Vec::new(),
            pattern: "{filestem}.{extension}".to_string(),
        };
        let file = ConvertibleFile::from_path(Path::new("a.mp4"), &["mp4".into()]).unwrap();
        assert!(resolver.resolve(&file).is_empty());
    }
}

pub mod persist;
mod types;

pub use types::*;

use anyhow::{Context, Result};
use mediaprep_common::paths::normalize_extension;
use std::collections::HashSet;
use std::path::Path;

/// Highest CRF accepted by any of the supported encoders.
const MAX_CRF: u8 = 63;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./mediaprep.toml",
        "./config.toml",
        "~/.config/mediaprep/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_images(&config.images)?;
    validate_videos(&config.videos)?;
    Ok(())
}

fn validate_images(images: &ImageJobConfig) -> Result<()> {
    if images.quality > 100 {
        anyhow::bail!("Image quality must be between 0 and 100, got {}", images.quality);
    }

    if images.extensions.is_empty() {
        anyhow::bail!("Image job has no source extensions");
    }

    // Outputs must never look like inputs, or a later run would convert them again
    let target = normalize_extension(&images.target_extension);
    if target.is_empty() {
        anyhow::bail!("Image target extension cannot be empty");
    }
    if images
        .extensions
        .iter()
        .any(|ext| normalize_extension(ext) == target)
    {
        anyhow::bail!(
            "Image target extension '{}' is also a source extension",
            target
        );
    }

    for root in &images.roots {
        if !root.exists() {
            tracing::warn!("Image root does not exist: {:?}", root);
        }
    }

    Ok(())
}

fn validate_videos(videos: &VideoJobConfig) -> Result<()> {
    if videos.extensions.is_empty() {
        anyhow::bail!("Video job has no source extensions");
    }

    if videos.enabled && (videos.formats.is_empty() || videos.resolutions.is_empty()) {
        anyhow::bail!("Video job is enabled but has no formats or no resolutions");
    }

    let mut names = HashSet::new();
    for format in &videos.formats {
        if format.name.trim().is_empty() {
            anyhow::bail!("Video format name cannot be empty");
        }
        if !names.insert(format.name.as_str()) {
            anyhow::bail!("Duplicate video format name '{}'", format.name);
        }
        if format.crf > MAX_CRF {
            anyhow::bail!(
                "Video format '{}' has CRF {} (maximum {})",
                format.name,
                format.crf,
                MAX_CRF
            );
        }
        if format.extension.trim().is_empty() || format.codec.trim().is_empty() {
            anyhow::bail!("Video format '{}' needs an extension and a codec", format.name);
        }
    }

    for resolution in &videos.resolutions {
        if resolution.width == 0 || resolution.height == 0 {
            anyhow::bail!("Invalid resolution {}", resolution);
        }
    }

    if !videos.output_pattern.contains("{filestem}") {
        anyhow::bail!(
            "Video output pattern '{}' must contain {{filestem}}",
            videos.output_pattern
        );
    }

    if videos.roots.iter().any(|root| root == &videos.output_dir) {
        anyhow::bail!(
            "Video output directory {:?} cannot be an input root",
            videos.output_dir
        );
    }

    Ok(())
}

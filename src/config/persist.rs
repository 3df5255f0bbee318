//! Writing configuration files.

use super::Config;
use anyhow::{Context, Result};
use std::path::Path;

/// Write `config` to a new TOML file.
///
/// Refuses to replace an existing file.
pub fn save_new_config(path: &Path, config: &Config) -> Result<()> {
    if path.exists() {
        anyhow::bail!("Config file already exists: {:?}", path);
    }

    let content = toml::to_string_pretty(config).with_context(|| "Failed to serialize config")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf/mediaprep.toml");

        save_new_config(&path, &Config::default()).unwrap();
        let loaded = load_config(&path).unwrap();

        assert_eq!(loaded.images.target_extension, "webp");
        assert_eq!(loaded.videos.formats, Config::default().videos.formats);
        assert_eq!(loaded.videos.output_pattern, Config::default().videos.output_pattern);
    }

    #[test]
    fn test_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mediaprep.toml");
        std::fs::write(&path, "# mine").unwrap();

        assert!(save_new_config(&path, &Config::default()).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine");
    }
}

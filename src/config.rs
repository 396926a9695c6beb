//! Postdeck configuration.
//!
//! Loaded from `~/.postdeck/config.toml`. A missing file means defaults;
//! only an unreadable or invalid file is an error.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::model::Platform;

/// Postdeck configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Platforms to schedule when `schedule` is given none explicitly.
    #[serde(default)]
    pub default_platforms: Vec<String>,

    /// Override for the state directory (defaults to `~/.postdeck/state`).
    #[serde(default)]
    pub state_dir: Option<PathBuf>,
}

impl Config {
    /// Load config from `~/.postdeck/config.toml`, or defaults when the
    /// file doesn't exist.
    pub fn load() -> Result<Self, String> {
        let Some(path) = Self::path() else {
            return Err("could not determine home directory".to_string());
        };

        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

        toml::from_str(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The configured default platforms, normalized.
    pub fn default_platforms(&self) -> Vec<Platform> {
        self.default_platforms
            .iter()
            .map(|id| Platform::new(id))
            .collect()
    }

    /// The config file path: `~/.postdeck/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".postdeck").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: Config = toml::from_str(
            r#"
            default-platforms = ["X", "instagram"]
            state-dir = "/tmp/postdeck-state"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.default_platforms(),
            [Platform::new("x"), Platform::new("instagram")]
        );
        assert_eq!(
            config.state_dir.as_deref(),
            Some(std::path::Path::new("/tmp/postdeck-state"))
        );
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.default_platforms.is_empty());
        assert!(config.state_dir.is_none());
    }
}

//! Configuration management for Crosspost

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::PlatformCatalog;
use crate::error::{ConfigError, Result};
use crate::types::Platform;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Target platform catalog
    #[serde(default = "default_platforms")]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Initial composer state applied to new sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Platforms selected when a compose session starts
    pub platforms: Vec<String>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            platforms: vec!["facebook".to_string(), "instagram".to_string()],
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Falls back to the built-in defaults when no config file exists.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            return Ok(Self::default_config());
        }
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// The built-in default configuration: the five stock platforms with
    /// Facebook and Instagram pre-selected.
    pub fn default_config() -> Self {
        Self {
            platforms: default_platforms(),
            defaults: DefaultsConfig::default(),
        }
    }

    /// Build the platform catalog from this configuration.
    pub fn catalog(&self) -> PlatformCatalog {
        PlatformCatalog::new(self.platforms.clone())
    }

    /// Check structural invariants: unique ids and positive limits.
    ///
    /// Default selections referring to unknown ids are allowed; they simply
    /// have no effect on limit computation.
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for platform in &self.platforms {
            if platform.id.trim().is_empty() {
                return Err(ConfigError::InvalidPlatform(
                    "platform id cannot be empty".to_string(),
                )
                .into());
            }
            if !seen.insert(platform.id.as_str()) {
                return Err(ConfigError::InvalidPlatform(format!(
                    "duplicate platform id: {}",
                    platform.id
                ))
                .into());
            }
            if platform.char_limit == 0 {
                return Err(ConfigError::InvalidPlatform(format!(
                    "platform {} has a zero character limit",
                    platform.id
                ))
                .into());
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

fn default_platforms() -> Vec<Platform> {
    fn platform(id: &str, name: &str, color: &str, char_limit: usize) -> Platform {
        Platform {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            char_limit,
        }
    }

    vec![
        platform("facebook", "Facebook", "#1877F2", 63_206),
        platform("instagram", "Instagram", "#E4405F", 2_200),
        platform("twitter", "Twitter", "#1DA1F2", 280),
        platform("linkedin", "LinkedIn", "#0A66C2", 3_000),
        platform("tiktok", "TikTok", "#000000", 2_200),
    ]
}

/// Resolve the configuration file path following the XDG Base Directory spec.
///
/// `CROSSPOST_CONFIG` overrides the default location.
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("CROSSPOST_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("crosspost").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_default_config_catalog() {
        let config = Config::default_config();
        let catalog = config.catalog();

        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.get("twitter").unwrap().char_limit, 280);
        assert_eq!(catalog.get("facebook").unwrap().char_limit, 63_206);
        assert_eq!(catalog.get("instagram").unwrap().char_limit, 2_200);
        assert_eq!(catalog.get("linkedin").unwrap().char_limit, 3_000);
        assert_eq!(catalog.get("tiktok").unwrap().char_limit, 2_200);
    }

    #[test]
    fn test_default_selection() {
        let config = Config::default_config();
        assert_eq!(config.defaults.platforms, vec!["facebook", "instagram"]);
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r##"
[[platforms]]
id = "mastodon"
name = "Mastodon"
color = "#6364FF"
char_limit = 500

[defaults]
platforms = ["mastodon"]
"##
        )
        .unwrap();

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.platforms.len(), 1);
        assert_eq!(config.platforms[0].id, "mastodon");
        assert_eq!(config.platforms[0].char_limit, 500);
        assert_eq!(config.defaults.platforms, vec!["mastodon"]);
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let result = Config::load_from_path(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_path_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "platforms = not valid toml").unwrap();

        let result = Config::load_from_path(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let mut config = Config::default_config();
        let duplicate = config.platforms[0].clone();
        config.platforms.push(duplicate);

        let result = config.validate();
        assert!(result.is_err());
        assert!(format!("{}", result.unwrap_err()).contains("duplicate"));
    }

    #[test]
    fn test_validate_rejects_zero_limit() {
        let mut config = Config::default_config();
        config.platforms[0].char_limit = 0;

        let result = config.validate();
        assert!(result.is_err());
        assert!(format!("{}", result.unwrap_err()).contains("zero character limit"));
    }

    #[test]
    fn test_validate_rejects_empty_id() {
        let mut config = Config::default_config();
        config.platforms[0].id = "  ".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_resolve_config_path_env_override() {
        std::env::set_var("CROSSPOST_CONFIG", "/tmp/crosspost-test/config.toml");
        let path = resolve_config_path().unwrap();
        assert_eq!(path, PathBuf::from("/tmp/crosspost-test/config.toml"));
        std::env::remove_var("CROSSPOST_CONFIG");
    }

    #[test]
    #[serial]
    fn test_resolve_config_path_default_location() {
        std::env::remove_var("CROSSPOST_CONFIG");
        let path = resolve_config_path().unwrap();
        assert!(path.ends_with("crosspost/config.toml"));
    }
}

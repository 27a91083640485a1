use crate::error::{FitError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Keys accepted by [`FitConfig::get`] and [`FitConfig::set`].
pub const CONFIG_KEYS: [&str; 2] = ["default-user", "pretty-json"];

/// Configuration for fittrack, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FitConfig {
    /// User id to act as when `--user` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_user: Option<String>,

    /// Write collections as indented JSON
    #[serde(default)]
    pub pretty_json: bool,
}

impl FitConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(FitError::Io)?;
        let config: FitConfig =
            serde_json::from_str(&content).map_err(FitError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(FitError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(FitError::Serialization)?;
        fs::write(config_path, content).map_err(FitError::Io)?;
        Ok(())
    }

    /// Display value of a key, or None if the key is unknown.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default-user" => Some(self.default_user.clone().unwrap_or_default()),
            "pretty-json" => Some(self.pretty_json.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default-user" => {
                let value = value.trim();
                self.default_user = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            "pretty-json" => {
                self.pretty_json = match value.trim().to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    other => {
                        return Err(FitError::Config(format!(
                            "pretty-json expects true or false, got {}",
                            other
                        )))
                    }
                };
            }
            other => return Err(FitError::Config(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FitConfig::default();
        assert_eq!(config.default_user, None);
        assert!(!config.pretty_json);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = FitConfig::load(dir.path()).unwrap();
        assert_eq!(config, FitConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");

        let mut config = FitConfig::default();
        config.set("default-user", "u1").unwrap();
        config.set("pretty-json", "yes").unwrap();
        config.save(&nested).unwrap();

        let loaded = FitConfig::load(&nested).unwrap();
        assert_eq!(loaded.default_user.as_deref(), Some("u1"));
        assert!(loaded.pretty_json);
    }

    #[test]
    fn test_get_known_and_unknown_keys() {
        let config = FitConfig {
            default_user: Some("sam".into()),
            pretty_json: false,
        };
        assert_eq!(config.get("default-user").as_deref(), Some("sam"));
        assert_eq!(config.get("pretty-json").as_deref(), Some("false"));
        assert_eq!(config.get("colour"), None);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = FitConfig::default();
        assert!(config.set("pretty-json", "maybe").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, FitConfig::default());
    }

    #[test]
    fn test_empty_default_user_unsets() {
        let mut config = FitConfig {
            default_user: Some("sam".into()),
            pretty_json: false,
        };
        config.set("default-user", "  ").unwrap();
        assert_eq!(config.default_user, None);
    }
}

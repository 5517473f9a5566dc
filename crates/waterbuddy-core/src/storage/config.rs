//! TOML-based application configuration.
//!
//! Stores display and tip preferences only. Hydration sessions themselves are
//! never written to disk.
//!
//! Configuration is stored at `~/.config/waterbuddy/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::session::Unit;
use crate::tips::TipMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Initial input unit for new sessions.
    #[serde(default)]
    pub unit: Unit,
    /// How many log entries the dashboard shows.
    #[serde(default = "default_recent_log_len")]
    pub recent_log_len: usize,
    #[serde(default = "default_true")]
    pub show_tips: bool,
    #[serde(default = "default_true")]
    pub mascot: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TipsConfig {
    #[serde(default)]
    pub mode: TipMode,
    /// Fixed seed for random tips (optional).
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive. `RUST_LOG` wins if set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/waterbuddy/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub tips: TipsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_recent_log_len() -> usize {
    5
}
fn default_true() -> bool {
    true
}
fn default_log_filter() -> String {
    "warn".into()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            unit: Unit::Ml,
            recent_log_len: default_recent_log_len(),
            show_tips: true,
            mascot: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        if let Some(parent_path) = parent_path {
            for part in parent_path.split('.') {
                current = current.get_mut(part).ok_or_else(unknown)?;
            }
        }

        let obj = current.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(leaf).ok_or_else(unknown)?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
            ),
            // Optional numbers are stored as null until set. "none" clears them;
            // required fields reject the null when the config is rebuilt.
            serde_json::Value::Number(_) | serde_json::Value::Null => {
                if value.eq_ignore_ascii_case("none") || value.is_empty() {
                    serde_json::Value::Null
                } else {
                    value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?
                }
            }
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                return Err(invalid("not a leaf value".into()));
            }
            _ => serde_json::Value::String(value.into()),
        };

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    /// Default location of the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be created.
    pub fn path() -> Result<PathBuf, ConfigError> {
        data_dir()
            .map(|dir| dir.join("config.toml"))
            .map_err(|e| ConfigError::LoadFailed {
                path: PathBuf::from("~/.config/waterbuddy"),
                message: e.to_string(),
            })
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// See [`Config::save`].
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key in memory. Call `save` to persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// field (e.g. `display.unit = litres`).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.display.unit, Unit::Ml);
        assert_eq!(cfg.display.recent_log_len, 5);
        assert!(cfg.display.show_tips);
        assert!(cfg.display.mascot);
        assert_eq!(cfg.tips.mode, TipMode::Stable);
        assert_eq!(cfg.tips.seed, None);
        assert_eq!(cfg.logging.filter, "warn");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: Config = toml::from_str("[display]\nunit = \"cups\"\n").unwrap();
        assert_eq!(cfg.display.unit, Unit::Cups);
        assert_eq!(cfg.display.recent_log_len, 5);
        assert_eq!(cfg.tips.mode, TipMode::Stable);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("display.show_tips").as_deref(), Some("true"));
        assert_eq!(cfg.get("display.recent_log_len").as_deref(), Some("5"));
        assert_eq!(cfg.get("tips.mode").as_deref(), Some("stable"));
        assert_eq!(cfg.get("tips.seed").as_deref(), Some("null"));
        assert!(cfg.get("display.missing_key").is_none());
        assert!(cfg.get("display").is_none());
    }

    #[test]
    fn set_updates_typed_values() {
        let mut cfg = Config::default();
        cfg.set("display.show_tips", "false").unwrap();
        cfg.set("display.recent_log_len", "10").unwrap();
        cfg.set("display.unit", "cups").unwrap();
        cfg.set("tips.mode", "random").unwrap();
        cfg.set("tips.seed", "42").unwrap();
        assert!(!cfg.display.show_tips);
        assert_eq!(cfg.display.recent_log_len, 10);
        assert_eq!(cfg.display.unit, Unit::Cups);
        assert_eq!(cfg.tips.mode, TipMode::Random);
        assert_eq!(cfg.tips.seed, Some(42));

        cfg.set("tips.seed", "none").unwrap();
        assert_eq!(cfg.tips.seed, None);
    }

    #[test]
    fn seed_can_be_cleared_after_being_set() {
        let mut cfg = Config::default();
        cfg.set("tips.seed", "7").unwrap();
        cfg.set("tips.seed", "").unwrap();
        assert_eq!(cfg.tips.seed, None);

        cfg.set("tips.seed", "7").unwrap();
        cfg.set("tips.seed", "NONE").unwrap();
        assert_eq!(cfg.tips.seed, None);
    }

    #[test]
    fn required_numbers_cannot_be_cleared() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("display.recent_log_len", "none"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(cfg.display.recent_log_len, 5);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("display.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.set("nope.key", "1"), Err(ConfigError::UnknownKey(_))));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn set_rejects_invalid_values_without_change() {
        let mut cfg = Config::default();
        assert!(cfg.set("display.mascot", "sometimes").is_err());
        assert!(cfg.set("display.recent_log_len", "-3").is_err());
        assert!(cfg.set("display.unit", "litres").is_err());
        assert!(cfg.set("tips.mode", "weekly").is_err());
        assert!(cfg.set("display", "x").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("logging.filter", "waterbuddy_core=debug").unwrap();
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn load_from_garbage_fails_to_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "display = [[[").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::ParseFailed(_))));
    }
}

//! User configuration (config.toml) loading.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::calculator::{DivisionPolicy, FormatOptions};
use crate::error::ConfigError;

const CONFIG_DIR: &str = "zcalc";
const CONFIG_FILE: &str = "config.toml";

/// Settings read from `config.toml`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Division-by-zero handling (`"ieee"` or `"error"`).
    pub division: DivisionPolicy,

    /// Group integer digits with commas when displaying results.
    pub thousands_separator: bool,

    /// Maximum number of decimals shown before trailing zeros are trimmed.
    pub max_decimals: usize,
}

impl Default for Config {
    fn default() -> Self {
        let format = FormatOptions::default();
        Self {
            division: DivisionPolicy::default(),
            thousands_separator: format.thousands_separator,
            max_decimals: format.max_decimals,
        }
    }
}

impl Config {
    /// `$XDG_CONFIG_HOME/zcalc/config.toml` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load the configuration.
    ///
    /// An explicit path must exist. The default path is optional and falls
    /// back to built-in defaults when absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) => Self::load_or_default(&path),
            None => {
                warn!("no config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Load a configuration from a file path.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_owned(),
            source: e,
        })?;

        Self::from_str(&content, path)
    }

    /// Parse a configuration from a string.
    pub fn from_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_owned(),
            source: e,
        })?;

        config.validate(path)?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        if self.max_decimals > FormatOptions::MAX_DECIMALS {
            return Err(ConfigError::Invalid {
                path: path.to_owned(),
                field: "max_decimals",
                reason: format!(
                    "{} exceeds the maximum of {}",
                    self.max_decimals,
                    FormatOptions::MAX_DECIMALS
                ),
            });
        }
        Ok(())
    }

    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            thousands_separator: self.thousands_separator,
            max_decimals: self.max_decimals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_path() -> PathBuf {
        PathBuf::from("test/config.toml")
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("", &test_path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.division, DivisionPolicy::Ieee);
        assert!(config.thousands_separator);
        assert_eq!(config.max_decimals, 10);
    }

    #[test]
    fn test_full_config() {
        let content = r#"
            division = "error"
            thousands_separator = false
            max_decimals = 4
        "#;

        let config = Config::from_str(content, &test_path()).unwrap();
        assert_eq!(config.division, DivisionPolicy::Error);
        assert_eq!(
            config.format_options(),
            FormatOptions {
                thousands_separator: false,
                max_decimals: 4,
            }
        );
    }

    #[test]
    fn test_bad_policy_is_parse_error() {
        let err = Config::from_str(r#"division = "panic""#, &test_path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("test/config.toml"));
    }

    #[test]
    fn test_unknown_field_is_parse_error() {
        let err = Config::from_str("precision = 3", &test_path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_max_decimals_limit() {
        let config = Config::from_str("max_decimals = 17", &test_path()).unwrap();
        assert_eq!(config.max_decimals, FormatOptions::MAX_DECIMALS);

        let err = Config::from_str("max_decimals = 70000", &test_path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "max_decimals",
                ..
            }
        ));
        assert!(err.to_string().contains("exceeds the maximum of 17"));
    }

    #[test]
    fn test_missing_default_file_uses_defaults() {
        let path = Path::new("/nonexistent/zcalc/config.toml");
        let config = Config::load_or_default(path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_missing_explicit_file() {
        let path = Path::new("/nonexistent/zcalc/config.toml");
        let err = Config::load(Some(path)).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

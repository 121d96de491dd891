//! TUI configuration persistence
//!
//! Saves and loads user preferences such as code length and theme choice.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use gatehouse_core::{DEFAULT_CODE_LENGTH, RESEND_COOLDOWN_SECS};

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Configuration directory under ~/.config
const CONFIG_DIR_NAME: &str = "gatehouse";

/// Shortest code the flow will be instantiated with
const MIN_CODE_LENGTH: usize = 3;
/// Longest code the flow will be instantiated with
const MAX_CODE_LENGTH: usize = 10;

/// TUI configuration that persists across sessions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TuiConfig {
    /// Number of digits in the one-time code
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Seconds enforced between code sends
    #[serde(default = "default_cooldown_secs")]
    pub resend_cooldown_secs: u64,

    /// Use the high-contrast palette
    #[serde(default)]
    pub high_contrast: bool,
}

fn default_code_length() -> usize {
    DEFAULT_CODE_LENGTH
}

fn default_cooldown_secs() -> u64 {
    RESEND_COOLDOWN_SECS
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            code_length: default_code_length(),
            resend_cooldown_secs: default_cooldown_secs(),
            high_contrast: false,
        }
    }
}

impl TuiConfig {
    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        // Try XDG_CONFIG_HOME first, then fall back to ~/.config
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_config).join(CONFIG_DIR_NAME);
            return Some(path);
        }

        dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME))
    }

    /// Get the full config file path
    pub fn config_file_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from disk
    ///
    /// Returns default configuration if file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        let path = match Self::config_file_path() {
            Some(p) => p,
            None => return Self::default(),
        };
        Self::load_from(&path)
    }

    fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file: {}", e);
                Self::default()
            }),
            Err(e) => {
                tracing::warn!("Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_dir = Self::config_dir().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&config_dir.join(CONFIG_FILE_NAME))
    }

    fn save_to(&self, config_file: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = config_file.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| ConfigError::Io(e.to_string()))?;
            }
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(config_file, contents).map_err(|e| ConfigError::Io(e.to_string()))?;

        tracing::debug!("Saved config to {:?}", config_file);
        Ok(())
    }

    /// Clamp values into ranges the flow can actually work with
    #[must_use]
    pub fn normalize(mut self) -> Self {
        self.code_length = self.code_length.clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH);
        if self.resend_cooldown_secs == 0 {
            self.resend_cooldown_secs = default_cooldown_secs();
        }
        self
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert_eq!(config.code_length, 4);
        assert_eq!(config.resend_cooldown_secs, 30);
        assert!(!config.high_contrast);
    }

    #[test]
    fn test_config_serialization() {
        let config = TuiConfig {
            code_length: 6,
            resend_cooldown_secs: 45,
            high_contrast: true,
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, TuiConfig::default());
    }

    #[test]
    fn test_normalize_clamps_out_of_range_values() {
        let config = TuiConfig {
            code_length: 0,
            resend_cooldown_secs: 0,
            high_contrast: false,
        }
        .normalize();

        assert_eq!(config.code_length, MIN_CODE_LENGTH);
        assert_eq!(config.resend_cooldown_secs, 30);

        let config = TuiConfig {
            code_length: 99,
            ..TuiConfig::default()
        }
        .normalize();
        assert_eq!(config.code_length, MAX_CODE_LENGTH);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let config = TuiConfig {
            code_length: 6,
            resend_cooldown_secs: 20,
            high_contrast: true,
        };
        config.save_to(&path).unwrap();

        let loaded = TuiConfig::load_from(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unreadable_config_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "not json").unwrap();

        assert_eq!(TuiConfig::load_from(&path), TuiConfig::default());
    }
}

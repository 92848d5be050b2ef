//! Matcher settings and the per-user locations they are loaded from.

use crate::error::MatcherError;
use crate::normalize::{NormalizationPolicy, DEFAULT_KEPT_PUNCTUATION};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Directory name under the platform config dir
const APP_DIR: &str = "keyword-matcher";

/// Default config file name
const CONFIG_FILE: &str = "config.json";

/// Default keyword table file name
const TABLE_FILE: &str = "keywords.json";

/// User-facing matcher settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatcherConfig {
    /// Whether dashes and other punctuation in commands should be ignored,
    /// to fix issues with modded names. It's recommended to leave this on.
    pub remove_command_punctuation: bool,

    /// Punctuation characters that survive normalization
    pub kept_punctuation: String,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            remove_command_punctuation: true,
            kept_punctuation: DEFAULT_KEPT_PUNCTUATION.to_string(),
        }
    }
}

impl MatcherConfig {
    pub fn policy(&self) -> NormalizationPolicy {
        NormalizationPolicy::new(self.remove_command_punctuation, &self.kept_punctuation)
    }

    /// Load and parse a config file
    pub fn load(path: &Path) -> Result<Self, MatcherError> {
        let content = fs::read_to_string(path).map_err(|e| MatcherError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_json::from_str(&content).map_err(|e| MatcherError::ConfigParse(e.to_string()))
    }

    /// Like [`MatcherConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, MatcherError> {
        if !path.exists() {
            warn!("Config not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        Self::load(path)
    }
}

// ============================================================================
// Default Locations
// ============================================================================

/// Per-user directory holding the config and keyword table
pub fn config_home() -> Result<PathBuf, MatcherError> {
    let base = dirs::config_dir().ok_or(MatcherError::NoConfigDir)?;
    Ok(base.join(APP_DIR))
}

pub fn default_config_path() -> Result<PathBuf, MatcherError> {
    Ok(config_home()?.join(CONFIG_FILE))
}

pub fn default_table_path() -> Result<PathBuf, MatcherError> {
    Ok(config_home()?.join(TABLE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MatcherConfig::default();
        assert!(config.remove_command_punctuation);
        assert_eq!(config.kept_punctuation, "-");
        assert_eq!(config.policy(), NormalizationPolicy::default());
    }

    #[test]
    fn test_missing_fields_default() {
        let config: MatcherConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, MatcherConfig::default());

        let config: MatcherConfig =
            serde_json::from_str(r#"{"removeCommandPunctuation": false}"#).unwrap();
        assert!(!config.remove_command_punctuation);
        assert!(!config.policy().is_enabled());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{"keptPunctuation": "-_"}"#).unwrap();

        let config = MatcherConfig::load(&path).unwrap();
        assert!(config.remove_command_punctuation);
        assert_eq!(config.policy().kept_punctuation(), &['-', '_']);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        assert!(matches!(
            MatcherConfig::load(&path),
            Err(MatcherError::ConfigRead { .. })
        ));
        assert_eq!(
            MatcherConfig::load_or_default(&path).unwrap(),
            MatcherConfig::default()
        );
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{"removeCommandPunctuation": "yes"}"#).unwrap();

        assert!(matches!(
            MatcherConfig::load_or_default(&path),
            Err(MatcherError::ConfigParse(_))
        ));
    }
}

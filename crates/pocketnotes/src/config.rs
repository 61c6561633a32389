//! Configuration management for pocketnotes.
//!
//! Configuration is loaded with figment from defaults, an optional TOML file
//! and `POCKETNOTES_`-prefixed environment variables.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::validation::NameRules;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "pocketnotes";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "notes.db";

/// Key under which the group collection is stored.
pub const DEFAULT_STORAGE_KEY: &str = "pocket_notes_groups_v1";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `POCKETNOTES_`)
/// 2. TOML config file at `~/.config/pocketnotes/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Group naming rules.
    pub groups: GroupsConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/pocketnotes/notes.db`
    pub database_path: Option<PathBuf>,
    /// Key the serialized group collection is written under.
    pub key: String,
    /// Whether an empty collection is written back to storage.
    pub persist_empty: bool,
}

/// Group-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupsConfig {
    /// Minimum trimmed length of a group name.
    pub min_name_length: usize,
    /// Maximum trimmed length of a group name.
    pub max_name_length: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None, // Resolved at runtime
            key: DEFAULT_STORAGE_KEY.to_string(),
            persist_empty: false,
        }
    }
}

impl Default for GroupsConfig {
    fn default() -> Self {
        let rules = NameRules::default();
        Self {
            min_name_length: rules.min,
            max_name_length: rules.max,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("POCKETNOTES_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.storage.key.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "storage key must not be empty".to_string(),
            });
        }

        if self.groups.min_name_length == 0 {
            return Err(Error::ConfigValidation {
                message: "min_name_length must be greater than 0".to_string(),
            });
        }

        if self.groups.min_name_length > self.groups.max_name_length {
            return Err(Error::ConfigValidation {
                message: format!(
                    "min_name_length ({}) cannot be greater than max_name_length ({})",
                    self.groups.min_name_length, self.groups.max_name_length
                ),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Group name rules derived from this configuration.
    #[must_use]
    pub fn name_rules(&self) -> NameRules {
        NameRules {
            min: self.groups.min_name_length,
            max: self.groups.max_name_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.database_path.is_none());
        assert_eq!(config.storage.key, "pocket_notes_groups_v1");
        assert!(!config.storage.persist_empty);
        assert_eq!(config.groups.min_name_length, 2);
        assert_eq!(config.groups.max_name_length, 50);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_key() {
        let mut config = Config::default();
        config.storage.key = "   ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("storage key"));
    }

    #[test]
    fn test_validate_zero_min_length() {
        let mut config = Config::default();
        config.groups.min_name_length = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("min_name_length"));
    }

    #[test]
    fn test_validate_min_greater_than_max() {
        let mut config = Config::default();
        config.groups.min_name_length = 10;
        config.groups.max_name_length = 5;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("cannot be greater than"));
    }

    #[test]
    fn test_database_path_default() {
        let path = Config::default().database_path();
        assert!(path.to_string_lossy().contains("notes.db"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/custom/path/notes.sqlite"));

        assert_eq!(
            config.database_path(),
            PathBuf::from("/custom/path/notes.sqlite")
        );
    }

    #[test]
    fn test_name_rules() {
        let mut config = Config::default();
        config.groups.max_name_length = 20;

        let rules = config.name_rules();
        assert_eq!(rules.min, 2);
        assert_eq!(rules.max, 20);
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("pocketnotes"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[storage]\nkey = \"custom_key\"\npersist_empty = true\n\n[groups]\nmax_name_length = 30\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.storage.key, "custom_key");
        assert!(config.storage.persist_empty);
        assert_eq!(config.groups.max_name_length, 30);
        assert_eq!(config.groups.min_name_length, 2);
    }

    #[test]
    fn test_file_database_path_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage]\ndatabase_path = \"/srv/notes/pocket.db\"\n").unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.database_path(), PathBuf::from("/srv/notes/pocket.db"));
        assert_eq!(config.storage.key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[groups]\nmin_name_length = 0\n").unwrap();

        assert!(Config::load_from(Some(path)).is_err());
    }

    #[test]
    fn test_storage_config_deserialize() {
        let json = r#"{"key": "other"}"#;
        let storage: StorageConfig = serde_json::from_str(json).unwrap();
        assert_eq!(storage.key, "other");
        assert!(!storage.persist_empty);
    }
}

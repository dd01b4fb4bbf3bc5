//! Extension table configuration.
//!
//! This module provides support for extending the built-in extension table
//! via TOML configuration files. Each entry maps an extension string
//! (single or multi-segment) to one of the category folder names.
//!
//! # Configuration File Format
//!
//! Configuration is stored in TOML format with the following structure:
//!
//! ```toml
//! [extensions]
//! "rar" = "archives"
//! "gif" = "images"
//! "tar.zst" = "archives"
//! ```

use crate::file_category::{Category, ExtensionTable};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur during configuration loading.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// An extension was mapped to a category folder that does not exist.
    UnknownCategory {
        /// The extension whose mapping is invalid.
        extension: String,
        /// The unrecognized category name.
        category: String,
    },
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::UnknownCategory {
                extension,
                category,
            } => {
                write!(
                    f,
                    "Extension '{}' is mapped to unknown category '{}' (expected one of: {})",
                    extension,
                    category,
                    Category::ALL.map(|c| c.dir_name()).join(", ")
                )
            }
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Extension mappings loaded from a TOML configuration file.
///
/// These are merged over the built-in table, so an entry can both add a new
/// extension and reroute a built-in one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SortConfig {
    /// Extension string to category folder name.
    #[serde(default)]
    pub extensions: HashMap<String, String>,
}

impl SortConfig {
    /// Load configuration from a file, with fallback to defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.unclutterrc.toml` in the current directory
    /// 3. Look for `~/.config/unclutter/config.toml` in home directory
    /// 4. Fall back to the empty default (built-in table only)
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is explicitly provided but
    /// cannot be read or parsed.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(".unclutterrc.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("unclutter")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if the file does not exist.
    /// Returns `ConfigError::ConfigInvalid` if TOML parsing fails.
    /// Returns `ConfigError::IoError` if the file cannot be read.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Merges the configured mappings into an extension table.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownCategory` if any entry names a category
    /// folder that does not exist.
    pub fn apply(&self, table: &mut ExtensionTable) -> Result<(), ConfigError> {
        for (extension, category_name) in &self.extensions {
            let category = Category::from_dir_name(category_name).ok_or_else(|| {
                ConfigError::UnknownCategory {
                    extension: extension.clone(),
                    category: category_name.clone(),
                }
            })?;
            table.add_mapping(extension, category);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_category::Resolution;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_empty() {
        let config = SortConfig::default();
        assert!(config.extensions.is_empty());
    }

    #[test]
    fn test_apply_adds_mapping() {
        let mut config = SortConfig::default();
        config
            .extensions
            .insert("rar".to_string(), "archives".to_string());

        let mut table = ExtensionTable::default();
        config.apply(&mut table).expect("apply failed");

        assert_eq!(table.category_for("rar"), Some(Category::Archive));
    }

    #[test]
    fn test_apply_compound_extension() {
        let mut config = SortConfig::default();
        config
            .extensions
            .insert("tar.zst".to_string(), "archives".to_string());

        let mut table = ExtensionTable::default();
        config.apply(&mut table).expect("apply failed");

        assert_eq!(
            table.resolve("dump.tar.zst"),
            Resolution::Known {
                extension: "TAR.ZST".to_string(),
                category: Category::Archive,
            }
        );
    }

    #[test]
    fn test_apply_unknown_category_fails() {
        let mut config = SortConfig::default();
        config
            .extensions
            .insert("iso".to_string(), "disk-images".to_string());

        let mut table = ExtensionTable::default();
        let result = config.apply(&mut table);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_explicit_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("config.toml");
        let mut file = fs::File::create(&config_path).expect("Failed to create config");
        writeln!(file, "[extensions]\n\"gif\" = \"images\"").expect("Failed to write config");

        let config = SortConfig::load(Some(&config_path)).expect("load failed");
        assert_eq!(config.extensions.get("gif"), Some(&"images".to_string()));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let result = SortConfig::load(Some(Path::new("/nonexistent/config.toml")));
        assert!(matches!(result, Err(ConfigError::ConfigNotFound(_))));
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "not [ valid toml").expect("Failed to write config");

        let result = SortConfig::load(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::ConfigInvalid(_))));
    }
}

use crate::core::pin_store::{CorruptDataPolicy, DEFAULT_RADIUS_METERS, SAVED_PINS_KEY};
use crate::core::ConfigProvider;
use crate::utils::error::{PinError, Result};
use crate::utils::validation::{validate_path, validate_radius, validate_storage_key, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_STORAGE_DIR: &str = "./map-pins-data";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_directory")]
    pub directory: String,
    #[serde(default = "default_key")]
    pub key: String,
    #[serde(default)]
    pub on_corrupt: CorruptDataPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_radius")]
    pub radius_meters: f64,
}

fn default_directory() -> String {
    DEFAULT_STORAGE_DIR.to_string()
}

fn default_key() -> String {
    SAVED_PINS_KEY.to_string()
}

fn default_radius() -> f64 {
    DEFAULT_RADIUS_METERS
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            key: default_key(),
            on_corrupt: CorruptDataPolicy::default(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            radius_meters: default_radius(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PinError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PinError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HOME})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PinError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn storage_dir(&self) -> &str {
        &self.storage.directory
    }

    fn storage_key(&self) -> &str {
        &self.storage.key
    }

    fn radius_meters(&self) -> f64 {
        self.filter.radius_meters
    }

    fn corrupt_data_policy(&self) -> CorruptDataPolicy {
        self.storage.on_corrupt
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_path("storage.directory", &self.storage.directory)?;
        validate_storage_key("storage.key", &self.storage.key)?;
        validate_radius(self.filter.radius_meters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[storage]
directory = "/var/lib/map-pins"
key = "Trips"
on_corrupt = "fail"

[filter]
radius_meters = 2500.0
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.storage_dir(), "/var/lib/map-pins");
        assert_eq!(config.storage_key(), "Trips");
        assert_eq!(config.corrupt_data_policy(), CorruptDataPolicy::Fail);
        assert_eq!(config.radius_meters(), 2500.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.storage_dir(), DEFAULT_STORAGE_DIR);
        assert_eq!(config.storage_key(), SAVED_PINS_KEY);
        assert_eq!(config.corrupt_data_policy(), CorruptDataPolicy::Backup);
        assert_eq!(config.radius_meters(), DEFAULT_RADIUS_METERS);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MAP_PINS_TEST_DIR", "/tmp/pins-from-env");

        let toml_content = r#"
[storage]
directory = "${MAP_PINS_TEST_DIR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.storage.directory, "/tmp/pins-from-env");

        std::env::remove_var("MAP_PINS_TEST_DIR");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str("[filter]\nradius_meters = -3.0\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[storage]\nkey = \"a/b\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let result = TomlConfig::from_toml_str("[storage]\non_corrupt = \"panic\"\n");
        assert!(matches!(result, Err(PinError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[filter]\nradius_meters = 42.0\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.radius_meters(), 42.0);
    }
}

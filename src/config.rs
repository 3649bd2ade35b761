use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Where and how collections are persisted
    #[serde(default)]
    pub storage: StorageConfig,
    /// Remote recipe API settings
    #[serde(default)]
    pub api: ApiConfig,
}

/// Configuration for the on-device collection storage
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Prefix for every storage key, e.g. "@RecipeApp" gives "@RecipeApp:Library"
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Directory for the file backend. Without it collections live in memory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            data_dir: None,
        }
    }
}

/// Configuration for the remote recipe API
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL, including the trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

// Default value functions
fn default_namespace() -> String {
    "@RecipeApp".to_string()
}

fn default_base_url() -> String {
    "https://www.themealdb.com/api/json/v1/1/".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_APP__ prefix
    /// 2. recipe-app.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_APP__STORAGE__DATA_DIR
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the source priority.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-app").required(false))
        // Use double underscore for nested: RECIPE_APP__API__TIMEOUT
        .add_source(
            Environment::with_prefix("RECIPE_APP")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use std::env;

    #[test]
    fn test_default_values() {
        assert_eq!(default_namespace(), "@RecipeApp");
        assert_eq!(default_base_url(), "https://www.themealdb.com/api/json/v1/1/");
        assert_eq!(default_timeout(), 30);
    }

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.storage.namespace, "@RecipeApp");
        assert!(config.storage.data_dir.is_none());
        assert_eq!(config.api.timeout_duration(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = Config::builder()
            .add_source(File::from_str(
                r#"
                [storage]
                data_dir = "/var/lib/recipe-app"

                [api]
                timeout = 5
                "#,
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.storage.namespace, "@RecipeApp");
        assert_eq!(
            config.storage.data_dir,
            Some(PathBuf::from("/var/lib/recipe-app"))
        );
        assert_eq!(config.api.base_url, "https://www.themealdb.com/api/json/v1/1/");
        assert_eq!(config.api.timeout, 5);
    }

    #[test]
    fn test_empty_source_uses_defaults() {
        let config: AppConfig = Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.storage.namespace, "@RecipeApp");
        assert_eq!(config.api.timeout, 30);
    }

    #[test]
    fn test_environment_overrides_defaults() {
        env::set_var("RECIPE_APP__STORAGE__DATA_DIR", "/tmp/recipe-app-data");
        env::set_var("RECIPE_APP__API__TIMEOUT", "7");

        let result = AppConfig::load();

        env::remove_var("RECIPE_APP__STORAGE__DATA_DIR");
        env::remove_var("RECIPE_APP__API__TIMEOUT");

        let config = result.unwrap();
        assert_eq!(
            config.storage.data_dir,
            Some(PathBuf::from("/tmp/recipe-app-data"))
        );
        assert_eq!(config.api.timeout, 7);
        assert_eq!(config.storage.namespace, "@RecipeApp");
    }
}

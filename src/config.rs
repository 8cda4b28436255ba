use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "FOOD2FORK_API_KEY";

/// Serializes tests that read or change process environment variables
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Client configuration for the recipe search API and favorites storage
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// API key sent with every search request (can also be set via FOOD2FORK_API_KEY)
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL of the search API, without the trailing `/search`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// File holding the persisted favorites
    #[serde(default = "default_favorites_path")]
    pub favorites_path: PathBuf,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout: default_timeout(),
            favorites_path: default_favorites_path(),
        }
    }
}

fn default_base_url() -> String {
    "https://food2fork.com/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_favorites_path() -> PathBuf {
    PathBuf::from("favorites.json")
}

impl SearchConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_SEARCH__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_SEARCH__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// The configured API key, falling back to the FOOD2FORK_API_KEY variable
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Load configuration from file and environment variables
///
/// See [`SearchConfig::load`] for the source priority.
pub fn load_config() -> Result<SearchConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        .add_source(
            Environment::with_prefix("RECIPE_SEARCH")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

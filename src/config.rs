use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Runtime configuration for the browsing engine
#[derive(Debug, Deserialize, Clone)]
pub struct BrowseConfig {
    /// Base URL of the recipe backend API
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Client-side request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Path of the bundled JSON fallback file
    #[serde(default = "default_local_data_path")]
    pub local_data_path: String,
    /// Recipes per grid page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Image shown when a recipe has no usable image
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_ms: default_timeout_ms(),
            local_data_path: default_local_data_path(),
            page_size: default_page_size(),
            placeholder_image: default_placeholder_image(),
        }
    }
}

// Default value functions
fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_local_data_path() -> String {
    "data/recipes_with_local_images.json".to_string()
}

fn default_page_size() -> usize {
    12
}

fn default_placeholder_image() -> String {
    "assets/images/placeholder.jpg".to_string()
}

impl BrowseConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPES__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPES__API_URL
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("RECIPES")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

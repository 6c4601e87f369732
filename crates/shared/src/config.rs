//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Remote API configuration.
    #[serde(default)]
    pub api: ApiConfig,
    /// Client session configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Product form rules.
    #[serde(default)]
    pub product: ProductRules,
}

/// Remote API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL the REST payloads are sent to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl ApiConfig {
    /// Joins `path` onto the base URL with exactly one `/` between them.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Client session configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Key the session snapshot is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_storage_key() -> String {
    "teste-matera:auth".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
        }
    }
}

/// Limits applied to product form uploads.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRules {
    /// Largest accepted image, in bytes.
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,
    /// Accepted image MIME types.
    #[serde(default = "default_allowed_image_types")]
    pub allowed_image_types: Vec<String>,
}

fn default_max_image_bytes() -> u64 {
    5_000_000 // 5 MB
}

fn default_allowed_image_types() -> Vec<String> {
    ["image/jpeg", "image/jpg", "image/png", "image/webp"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for ProductRules {
    fn default() -> Self {
        Self {
            max_image_bytes: default_max_image_bytes(),
            allowed_image_types: default_allowed_image_types(),
        }
    }
}

impl ProductRules {
    /// Returns true if `mime_type` is one of the accepted image types.
    #[must_use]
    pub fn accepts_mime(&self, mime_type: &str) -> bool {
        self.allowed_image_types.iter().any(|t| t == mime_type)
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CADASTRO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

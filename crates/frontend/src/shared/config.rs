use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct FrontendConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend origin; empty means "same host, port 3000"
    pub base_url: String,
    pub timeout_secs: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ImportConfig {
    pub preview_rows: u32,
    pub max_displayed_errors: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub toast_ttl_ms: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: 30,
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            preview_rows: 10,
            max_displayed_errors: 10,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { toast_ttl_ms: 4000 }
    }
}

/// Configuration embedded at build time
const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

static CONFIG: Lazy<FrontendConfig> = Lazy::new(|| load_config(DEFAULT_CONFIG));

/// Parse configuration text, falling back to built-in defaults
pub fn load_config(contents: &str) -> FrontendConfig {
    match toml::from_str(contents) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Invalid frontend config, using defaults: {}", e);
            FrontendConfig::default()
        }
    }
}

pub fn config() -> &'static FrontendConfig {
    &CONFIG
}

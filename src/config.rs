use crate::errors::CatalogError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the configured access token
pub const TOKEN_ENV_VAR: &str = "TMDB_ACCESS_TOKEN";

const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";
const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_image_base_url() -> String {
    DEFAULT_IMAGE_BASE_URL.to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_include_adult() -> bool {
    true
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    /// Bearer token for the catalog service; never defaulted
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_include_adult")]
    pub include_adult: bool,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub trace_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            image_base_url: default_image_base_url(),
            access_token: None,
            language: default_language(),
            include_adult: default_include_adult(),
            request_timeout_secs: default_request_timeout_secs(),
            trace_level: None,
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "moviecatalog", "movie-catalog")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load from the platform config dir, then apply the token override.
    pub fn load() -> Result<Self, anyhow::Error> {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => AppConfig::default(),
        };
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            config.apply_token_override(Some(token));
        }
        Ok(config)
    }

    /// A missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self, anyhow::Error> {
        if !path.exists() {
            return Ok(AppConfig::default());
        }
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), anyhow::Error> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn apply_token_override(&mut self, token: Option<String>) {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.access_token = Some(token);
        }
    }

    pub fn has_token(&self) -> bool {
        self.access_token
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty())
    }

    pub fn require_token(&self) -> Result<&str, CatalogError> {
        self.access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| CatalogError::Config("no access token configured".to_string()))
    }
}

//! Application configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use viewr_client::Timespan;
use viewr_core::AccountFilter;
use viewr_page::ChartTheme;

use crate::error::{AppError, AppResult};

/// Config file used when neither `--config` nor `VIEWR_CONFIG` is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "VIEWR_CONFIG";

/// API endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Site root serving `/api/...`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout (ms). Default: 10,000.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Initial page state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageConfig {
    /// Chart window on first load. Default: 30 days.
    #[serde(default)]
    pub default_timespan: Timespan,
    #[serde(default)]
    pub theme: ChartTheme,
    /// Accounts excluded from the order book on first load.
    #[serde(default)]
    pub excluded_accounts: Vec<String>,
}

impl PageConfig {
    pub fn excluded(&self) -> AccountFilter {
        self.excluded_accounts.iter().collect()
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub page: PageConfig,
}

impl AppConfig {
    /// Resolve and load the config file.
    ///
    /// Path order: `explicit`, then `VIEWR_CONFIG`, then `config/default.toml`.
    /// A missing default file yields built-in defaults; a missing explicit
    /// file is an error.
    pub fn load(explicit: Option<&str>) -> AppResult<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::from_file(&path);
        }

        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)
        } else {
            tracing::warn!(path = DEFAULT_CONFIG_PATH, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config {path}: {e}")))?;
        Self::from_toml(&content)
    }

    /// Parse and validate TOML content.
    pub fn from_toml(content: &str) -> AppResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.api.timeout_ms == 0 {
            return Err(AppError::Config("api.timeout_ms must be positive".to_string()));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::Config("api.base_url must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.api.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.page.default_timespan, Timespan::Days(30));
        assert_eq!(config.page.theme, ChartTheme::Light);
        assert!(config.page.excluded().is_empty());
    }

    #[test]
    fn test_partial_toml() {
        let config = AppConfig::from_toml(
            r#"
            [api]
            base_url = "https://viewr.example.com"

            [page]
            default_timespan = "all"
            theme = "dark"
            excluded_accounts = ["alice", " bob ", "alice"]
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://viewr.example.com");
        assert_eq!(config.api.timeout_ms, 10_000);
        assert_eq!(config.page.default_timespan, Timespan::All);
        assert_eq!(config.page.theme, ChartTheme::Dark);
        assert_eq!(config.page.excluded().accounts(), ["alice", "bob"]);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            AppConfig::from_toml("[page]\ndefault_timespan = \"week\""),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            AppConfig::from_toml("[api]\ntimeout_ms = 0"),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_missing_explicit_file() {
        assert!(matches!(
            AppConfig::load(Some("does/not/exist.toml")),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_config_serialization() {
        let toml_str = toml::to_string(&AppConfig::default()).unwrap();
        assert!(toml_str.contains("base_url"));
        assert!(toml_str.contains("default_timespan = \"30\""));
    }

    #[test]
    fn test_shipped_default_file_parses() {
        let content = include_str!("../../../config/default.toml");
        let config = AppConfig::from_toml(content).unwrap();
        assert_eq!(config.page.default_timespan, Timespan::Days(30));
    }
}

//! Structured logging initialization.
//!
//! Logs go to stderr so the rendered page on stdout stays clean.

use std::str::FromStr;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{AppError, AppResult};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,viewr=debug,viewr_page=debug";

/// Explicit format selection, wins over `RUST_ENV`.
pub const LOG_FORMAT_ENV: &str = "VIEWR_LOG_FORMAT";

/// Output format of the stderr log layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

impl LogFormat {
    /// Pick the format from `VIEWR_LOG_FORMAT`, then `RUST_ENV`
    /// (`production` means JSON). Unknown values fall back to pretty.
    pub fn select(explicit: Option<&str>, rust_env: Option<&str>) -> Self {
        explicit
            .and_then(|value| value.parse().ok())
            .unwrap_or(match rust_env {
                Some("production") => Self::Json,
                _ => Self::Pretty,
            })
    }

    fn from_env() -> Self {
        let explicit = std::env::var(LOG_FORMAT_ENV).ok();
        let rust_env = std::env::var("RUST_ENV").ok();
        Self::select(explicit.as_deref(), rust_env.as_deref())
    }
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(AppError::Logging(format!("unknown log format: {other}"))),
        }
    }
}

/// Initialize logging to stderr. `RUST_LOG` overrides `DEFAULT_LOG_FILTER`.
pub fn init_logging() -> AppResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);
    let layer = fmt::layer().with_writer(std::io::stderr);

    let result = match LogFormat::from_env() {
        LogFormat::Json => registry
            .with(layer.json().with_current_span(true).with_span_list(true))
            .try_init(),
        LogFormat::Compact => registry.with(layer.compact().with_target(false)).try_init(),
        LogFormat::Pretty => registry.with(layer.pretty().with_target(true)).try_init(),
    };

    result.map_err(|e| AppError::Logging(e.to_string()))
}

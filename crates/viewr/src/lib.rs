//! Market Viewr command line client.
//!
//! Loads one token's market page through the HTTP API and prints it:
//! - chart summary for the selected timespan and theme
//! - buy and sell order books, price-sorted, with optional extra header sorts
//! - most active accounts and the current exclusions

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;

pub use app::{token_from_target, Application, SortRequest};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use logging::init_logging;

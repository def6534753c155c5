//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Client error: {0}")]
    Client(#[from] viewr_client::ClientError),

    #[error("Page error: {0}")]
    Page(#[from] viewr_page::PageError),

    #[error("Logging error: {0}")]
    Logging(String),
}

pub type AppResult<T> = Result<T, AppError>;

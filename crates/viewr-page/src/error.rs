//! Page error types.

use thiserror::Error;
use viewr_client::ClientError;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Unable to determine token symbol from {0:?}")]
    TokenNotFound(String),

    #[error("Table not found: {0}")]
    UnknownTable(String),

    #[error("Invalid chart theme: {0}")]
    InvalidTheme(String),

    #[error("API error: {0}")]
    Api(#[from] ClientError),
}

pub type PageResult<T> = Result<T, PageError>;

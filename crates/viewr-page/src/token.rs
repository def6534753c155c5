//! Token symbol resolution.

use crate::error::{PageError, PageResult};

/// Resolve the token the page is about.
///
/// The `token-symbol` meta value wins; otherwise the path segment after
/// `market` is used (`/market/BEE` → `BEE`).
pub fn resolve_token(meta_token: Option<&str>, path: &str) -> PageResult<String> {
    if let Some(token) = meta_token.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(token.to_string());
    }

    let segments: Vec<&str> = path.split('/').collect();
    segments
        .iter()
        .position(|segment| *segment == "market")
        .and_then(|index| segments.get(index + 1))
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
        .ok_or_else(|| PageError::TokenNotFound(path.to_string()))
}

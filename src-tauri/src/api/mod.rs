//! Client for the catalog service's app picks, appstream and quality
//! moderation endpoints.

pub mod catalog;
pub mod client;
pub mod moderation;
pub mod picks;
pub mod types;

pub use client::{CatalogClient, DEFAULT_API_BASE_URL};

use crate::error::AppPicksError;

/// Trim `value` and reject it when empty.
pub(crate) fn require<'a>(what: &str, value: &'a str) -> Result<&'a str, AppPicksError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppPicksError::InvalidInput(format!("{} cannot be empty", what)));
    }
    Ok(trimmed)
}

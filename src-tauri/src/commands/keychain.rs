use keyring::Entry;
use tracing::{info, warn};

use crate::error::AppPicksError;

const KEYRING_USER: &str = "apppicks";

/// Keychain service holding the catalog API token.
pub const CATALOG_TOKEN_SERVICE: &str = "apppicks-catalog-token";

fn entry(service: &str) -> Result<Entry, AppPicksError> {
    Entry::new(service, KEYRING_USER).map_err(|e| {
        warn!("Failed to create keyring entry for {}: {}", service, e);
        AppPicksError::Keychain(e.to_string())
    })
}

/// The stored token for `service`, or `None` when nothing is saved.
pub fn read_token(service: &str) -> Result<Option<String>, AppPicksError> {
    match entry(service)?.get_password() {
        Ok(token) => Ok(Some(token)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => {
            warn!("Failed to read token for {}: {}", service, e);
            Err(AppPicksError::Keychain(e.to_string()))
        }
    }
}

#[tauri::command]
pub fn set_api_token(service: &str, token: &str) -> Result<(), String> {
    info!("Setting API token for service: {}", service);
    let token = token.trim();
    if token.is_empty() {
        return Err(AppPicksError::InvalidInput("token cannot be empty".to_string()).into());
    }
    entry(service)?.set_password(token).map_err(|e| {
        warn!("Failed to set token for {}: {}", service, e);
        AppPicksError::Keychain(e.to_string()).into()
    })
}

#[tauri::command]
pub fn get_api_token(service: &str) -> Result<Option<String>, String> {
    info!("Getting API token for service: {}", service);
    let token = read_token(service)?;
    if token.is_none() {
        info!("No API token found for service: {}", service);
    }
    Ok(token)
}

#[tauri::command]
pub fn delete_api_token(service: &str) -> Result<(), String> {
    info!("Deleting API token for service: {}", service);
    match entry(service)?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => {
            warn!("Failed to delete credential for {}: {}", service, e);
            Err(AppPicksError::Keychain(e.to_string()).into())
        }
    }
}

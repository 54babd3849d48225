use std::path::PathBuf;

use tauri::{AppHandle, Manager};
use tauri_plugin_store::StoreExt;
use tracing::{info, warn};

use super::keychain::{read_token, CATALOG_TOKEN_SERVICE};
use crate::api::catalog::DEFAULT_ELIGIBLE_PAGE_SIZE;
use crate::api::{CatalogClient, DEFAULT_API_BASE_URL};
use crate::error::AppPicksError;
use crate::metadata::{MetadataResolver, CACHE_FILE};

const STORE_FILE: &str = "preferences.json";

pub const API_BASE_URL_KEY: &str = "api_base_url";
pub const ELIGIBLE_PAGE_SIZE_KEY: &str = "eligible_page_size";

fn read_preference(app: &AppHandle, key: &str) -> Result<Option<String>, AppPicksError> {
    let store = app.store(STORE_FILE).map_err(|e| {
        warn!("Failed to open store: {}", e);
        AppPicksError::Config(e.to_string())
    })?;
    Ok(store
        .get(key)
        .and_then(|v| v.as_str().map(|s| s.to_string()))
        .filter(|s| !s.trim().is_empty()))
}

/// Check a preference value before it is written.
fn validate_preference(key: &str, value: &str) -> Result<(), AppPicksError> {
    match key {
        API_BASE_URL_KEY if !value.is_empty() => CatalogClient::new(value, None).map(|_| ()),
        ELIGIBLE_PAGE_SIZE_KEY if !value.is_empty() => match value.parse::<u32>() {
            Ok(n) if n > 0 => Ok(()),
            _ => Err(AppPicksError::InvalidInput(format!(
                "page size must be a positive number, got '{}'",
                value
            ))),
        },
        _ => Ok(()),
    }
}

#[tauri::command]
pub fn get_preference(app: AppHandle, key: &str) -> Result<Option<String>, String> {
    info!("Getting preference: {}", key);
    Ok(read_preference(&app, key)?)
}

#[tauri::command]
pub fn set_preference(app: AppHandle, key: &str, value: &str) -> Result<(), String> {
    info!("Setting preference: {} = {}", key, value);
    let value = value.trim();
    validate_preference(key, value)?;
    let store = app.store(STORE_FILE).map_err(|e| {
        warn!("Failed to open store: {}", e);
        e.to_string()
    })?;
    store.set(key, serde_json::json!(value));
    store.save().map_err(|e| {
        warn!("Failed to save store: {}", e);
        e.to_string()
    })
}

pub fn api_base_url(app: &AppHandle) -> Result<String, AppPicksError> {
    Ok(read_preference(app, API_BASE_URL_KEY)?.unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()))
}

pub fn eligible_page_size(app: &AppHandle) -> Result<u32, AppPicksError> {
    Ok(read_preference(app, ELIGIBLE_PAGE_SIZE_KEY)?
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_ELIGIBLE_PAGE_SIZE))
}

/// Client for the configured catalog, authenticated with the stored token.
pub fn catalog_client(app: &AppHandle) -> Result<CatalogClient, AppPicksError> {
    let base_url = api_base_url(app)?;
    let token = read_token(CATALOG_TOKEN_SERVICE)?;
    CatalogClient::new(&base_url, token)
}

/// Location of the metadata cache, creating the app data directory if needed.
pub fn cache_path(app: &AppHandle) -> Result<PathBuf, AppPicksError> {
    let dir = app
        .path()
        .app_data_dir()
        .map_err(|e| AppPicksError::Config(format!("Failed to resolve app data directory: {}", e)))?;
    std::fs::create_dir_all(&dir)
        .map_err(|e| AppPicksError::Config(format!("Failed to create app data directory: {}", e)))?;
    Ok(dir.join(CACHE_FILE))
}

/// Metadata resolver over the configured client. Falls back to uncached
/// lookups when the data directory is unavailable.
pub fn metadata_resolver(app: &AppHandle, client: CatalogClient) -> MetadataResolver {
    let db_path = match cache_path(app) {
        Ok(path) => Some(path),
        Err(e) => {
            warn!("Metadata cache disabled: {}", e);
            None
        }
    };
    MetadataResolver::new(client, db_path)
}

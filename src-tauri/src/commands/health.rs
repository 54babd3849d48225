use serde::Serialize;
use tauri::AppHandle;
use tracing::{info, warn};

use super::config::{cache_path, catalog_client};
use crate::error::AppPicksError;
use crate::metadata::MetadataCache;

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub api_base_url: String,
    pub api_reachable: bool,
    pub api_token_set: bool,
    pub is_quality_moderator: bool,
    /// Live entries in the metadata cache; `None` if it could not be opened.
    pub cached_apps: Option<usize>,
}

#[tauri::command]
pub async fn run_health_check(app: AppHandle) -> Result<HealthReport, String> {
    info!("Running health check");
    let client = catalog_client(&app)?;
    let api_token_set = client.has_token();

    // Any HTTP answer, even a 401, proves the service is reachable
    let (api_reachable, is_quality_moderator) = match client.user_info().await {
        Ok(user) => (true, user.is_quality_moderator),
        Err(AppPicksError::Transport { message, .. }) => {
            warn!("Catalog API unreachable: {}", message);
            (false, false)
        }
        Err(e) => {
            info!("Catalog API answered with: {}", e);
            (true, false)
        }
    };
    info!(
        "API reachable: {}, token set: {}, moderator: {}",
        api_reachable, api_token_set, is_quality_moderator
    );

    let cached_apps = match cache_path(&app) {
        Ok(path) => tokio::task::spawn_blocking(move || MetadataCache::new(&path)?.live_count())
            .await
            .map_err(|e| AppPicksError::Cache(e.to_string()))
            .and_then(|r| r)
            .map_err(|e| warn!("Metadata cache unavailable: {}", e))
            .ok(),
        Err(e) => {
            warn!("Metadata cache unavailable: {}", e);
            None
        }
    };

    Ok(HealthReport {
        api_base_url: client.base_url().to_string(),
        api_reachable,
        api_token_set,
        is_quality_moderator,
        cached_apps,
    })
}

/// Drop every cached app summary. Returns how many were removed.
#[tauri::command]
pub async fn clear_metadata_cache(app: AppHandle) -> Result<usize, String> {
    info!("Clearing metadata cache");
    let path = cache_path(&app)?;
    let removed = tokio::task::spawn_blocking(move || MetadataCache::new(&path)?.clear())
        .await
        .map_err(|e| format!("Cache task panicked: {}", e))??;
    Ok(removed)
}

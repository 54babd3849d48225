use tauri::AppHandle;
use tracing::info;

use super::config::catalog_client;
use crate::api::types::GuidelineReport;

#[tauri::command]
pub async fn get_guideline_status(app: AppHandle, app_id: String) -> Result<GuidelineReport, String> {
    info!("get_guideline_status called for {}", app_id);
    let client = catalog_client(&app)?;
    Ok(client.guideline_report(&app_id).await?)
}

#[tauri::command]
pub async fn set_guideline_status(
    app: AppHandle,
    app_id: String,
    guideline_id: String,
    passed: bool,
) -> Result<(), String> {
    let client = catalog_client(&app)?;
    client.set_guideline(&app_id, &guideline_id, passed).await?;
    Ok(())
}

/// Mark each listed guideline as passed, one request at a time. Stops at the
/// first failure; returns how many were set.
#[tauri::command]
pub async fn pass_all_guidelines(
    app: AppHandle,
    app_id: String,
    guideline_ids: Vec<String>,
) -> Result<usize, String> {
    info!("Passing {} guidelines for {}", guideline_ids.len(), app_id);
    let client = catalog_client(&app)?;
    for (done, guideline_id) in guideline_ids.iter().enumerate() {
        client
            .set_guideline(&app_id, guideline_id, true)
            .await
            .map_err(|e| format!("{} (after {} of {} guidelines)", e, done, guideline_ids.len()))?;
    }
    Ok(guideline_ids.len())
}

#[tauri::command]
pub async fn set_fullscreen_app(app: AppHandle, app_id: String, is_fullscreen_app: bool) -> Result<(), String> {
    let client = catalog_client(&app)?;
    client.set_fullscreen_app(&app_id, is_fullscreen_app).await?;
    Ok(())
}

#[tauri::command]
pub async fn dismiss_review_request(app: AppHandle, app_id: String) -> Result<(), String> {
    let client = catalog_client(&app)?;
    client.delete_review_request(&app_id).await?;
    Ok(())
}

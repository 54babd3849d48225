use tauri::AppHandle;
use tracing::{info, warn};

use super::config::catalog_client;
use crate::api::types::UserInfo;

/// The signed-in user. Without a token, or with one the service rejects,
/// this is an anonymous user with no moderator rights.
#[tauri::command]
pub async fn get_user_info(app: AppHandle) -> Result<UserInfo, String> {
    let client = catalog_client(&app)?;
    if !client.has_token() {
        info!("No API token configured, treating user as anonymous");
        return Ok(UserInfo {
            display_name: None,
            is_quality_moderator: false,
        });
    }
    match client.user_info().await {
        Ok(user) => Ok(user.into()),
        Err(e) if e.is_unauthorized() => {
            warn!("API token rejected: {}", e);
            Ok(UserInfo {
                display_name: None,
                is_quality_moderator: false,
            })
        }
        Err(e) => Err(e.into()),
    }
}

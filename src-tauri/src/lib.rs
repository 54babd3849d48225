pub mod api;
mod commands;
pub mod error;
pub mod metadata;
pub mod week;

pub use api::CatalogClient;
pub use error::AppPicksError;

pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tauri::Builder::default()
        .plugin(tauri_plugin_store::Builder::new().build())
        .invoke_handler(tauri::generate_handler![
            commands::keychain::set_api_token,
            commands::keychain::get_api_token,
            commands::keychain::delete_api_token,
            commands::config::get_preference,
            commands::config::set_preference,
            commands::health::run_health_check,
            commands::health::clear_metadata_cache,
            commands::session::get_user_info,
            commands::picks::get_week_picks,
            commands::picks::set_week_pick,
            commands::picks::set_day_pick,
            commands::picks::list_eligible_apps,
            commands::picks::get_app_summary,
            commands::moderation::get_guideline_status,
            commands::moderation::set_guideline_status,
            commands::moderation::pass_all_guidelines,
            commands::moderation::set_fullscreen_app,
            commands::moderation::dismiss_review_request,
        ])
        .setup(|app| {
            // Drop stale metadata left over from earlier sessions
            let handle = app.handle().clone();
            tauri::async_runtime::spawn_blocking(move || {
                let path = match commands::config::cache_path(&handle) {
                    Ok(path) => path,
                    Err(e) => {
                        tracing::warn!("Skipping metadata cache cleanup: {}", e);
                        return;
                    }
                };
                if let Err(e) = metadata::MetadataCache::new(&path).and_then(|c| c.clear_expired()) {
                    tracing::warn!("Metadata cache cleanup failed: {}", e);
                }
            });
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

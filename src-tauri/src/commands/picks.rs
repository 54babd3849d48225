use chrono::NaiveDate;
use tauri::AppHandle;
use tokio::task::JoinSet;
use tracing::{info, warn};

use super::config::{catalog_client, eligible_page_size, metadata_resolver};
use crate::api::picks::WEEK_POSITIONS;
use crate::api::types::{AppSummary, DayPick, WeekPick, WeekPicks};
use crate::api::CatalogClient;
use crate::error::AppPicksError;
use crate::week::WeekRange;

/// Stand-in for an assigned app whose metadata could not be fetched.
fn unresolved(app_id: &str) -> AppSummary {
    AppSummary {
        id: app_id.to_string(),
        name: app_id.to_string(),
        subtitle: None,
        icon: None,
    }
}

/// The app of the day for each of the week's seven days, Monday first.
async fn days_of_week(client: &CatalogClient, week: WeekRange) -> Result<Vec<(u8, NaiveDate, String)>, AppPicksError> {
    let mut tasks = JoinSet::new();
    for (offset, date) in week.days().enumerate() {
        let client = client.clone();
        tasks.spawn(async move {
            let app_id = client.app_of_the_day(date).await?;
            Ok::<_, AppPicksError>(app_id.map(|id| (offset as u8, date, id)))
        });
    }

    let mut days = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let day = joined.map_err(|e| AppPicksError::Transport {
            url: "app-of-the-day".to_string(),
            message: e.to_string(),
        })??;
        days.extend(day);
    }
    days.sort_by_key(|(offset, _, _)| *offset);
    Ok(days)
}

/// Everything assigned to the ISO week containing `date` (YYYY-MM-DD).
#[tauri::command]
pub async fn get_week_picks(app: AppHandle, date: String) -> Result<WeekPicks, String> {
    info!("get_week_picks called for {}", date);
    let week = WeekRange::parse(&date)?;
    let client = catalog_client(&app)?;

    let listed = client.apps_of_the_week(week.monday).await?;
    let days = days_of_week(&client, week).await?;

    let mut weekly: Vec<(u8, String)> = Vec::new();
    for pick in listed.apps {
        if (1..=WEEK_POSITIONS).contains(&pick.position) {
            weekly.push((pick.position, pick.app_id));
        } else {
            warn!("Ignoring app {} at unknown position {}", pick.app_id, pick.position);
        }
    }
    weekly.sort_by_key(|(position, _)| *position);
    weekly.dedup_by_key(|(position, _)| *position);

    let ids: Vec<String> = weekly
        .iter()
        .map(|(_, id)| id.clone())
        .chain(days.iter().map(|(_, _, id)| id.clone()))
        .collect();
    let resolved = metadata_resolver(&app, client).resolve(&ids).await;
    let summary = |id: &str| resolved.get(id).cloned().unwrap_or_else(|| unresolved(id));

    let picks = WeekPicks {
        year: week.year(),
        week: week.number(),
        apps_of_the_week: weekly
            .iter()
            .map(|(position, id)| WeekPick {
                position: *position,
                app: summary(id),
            })
            .collect(),
        apps_of_the_day: days
            .iter()
            .map(|(day, date, id)| DayPick {
                day: *day,
                date: date.to_string(),
                app: summary(id),
            })
            .collect(),
    };
    info!(
        "Week {}/{}: {} featured, {} daily",
        picks.year,
        picks.week,
        picks.apps_of_the_week.len(),
        picks.apps_of_the_day.len()
    );
    Ok(picks)
}

#[tauri::command]
pub async fn set_week_pick(
    app: AppHandle,
    app_id: String,
    week_number: u32,
    year: i32,
    position: u8,
) -> Result<(), String> {
    let client = catalog_client(&app)?;
    client.set_app_of_the_week(&app_id, week_number, year, position).await?;
    Ok(())
}

#[tauri::command]
pub async fn set_day_pick(app: AppHandle, app_id: String, day: String) -> Result<(), String> {
    let date = NaiveDate::parse_from_str(day.trim(), "%Y-%m-%d")
        .map_err(|e| AppPicksError::InvalidInput(format!("'{}' is not a date: {}", day, e)))?;
    let client = catalog_client(&app)?;
    client.set_app_of_the_day(&app_id, date).await?;
    Ok(())
}

/// Apps passing quality moderation, in server order, with metadata resolved.
#[tauri::command]
pub async fn list_eligible_apps(app: AppHandle) -> Result<Vec<AppSummary>, String> {
    info!("list_eligible_apps called");
    let client = catalog_client(&app)?;
    let ids = client.passing_app_ids(eligible_page_size(&app)?).await?;
    let mut resolved = metadata_resolver(&app, client).resolve(&ids).await;

    let apps: Vec<AppSummary> = ids.iter().filter_map(|id| resolved.remove(id)).collect();
    if apps.len() < ids.len() {
        warn!("{} eligible apps had no metadata", ids.len() - apps.len());
    }
    Ok(apps)
}

#[tauri::command]
pub async fn get_app_summary(app: AppHandle, app_id: String) -> Result<AppSummary, String> {
    info!("get_app_summary called for {}", app_id);
    let client = catalog_client(&app)?;
    Ok(metadata_resolver(&app, client).resolve_one(app_id.trim()).await?)
}

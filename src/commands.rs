use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

// -- Arg structs for serialization --

#[derive(Serialize)]
struct ServiceArgs {
    service: String,
}

#[derive(Serialize)]
struct SetTokenArgs {
    service: String,
    token: String,
}

#[derive(Serialize)]
struct GetPreferenceArgs {
    key: String,
}

#[derive(Serialize)]
struct SetPreferenceArgs {
    key: String,
    value: String,
}

#[derive(Serialize)]
struct WeekPicksArgs {
    date: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SetWeekPickArgs {
    app_id: String,
    week_number: u32,
    year: i32,
    position: u8,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SetDayPickArgs {
    app_id: String,
    day: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AppArgs {
    app_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SetGuidelineArgs {
    app_id: String,
    guideline_id: String,
    passed: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PassAllArgs {
    app_id: String,
    guideline_ids: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SetFullscreenArgs {
    app_id: String,
    is_fullscreen_app: bool,
}

// -- Catalog types matching backend structs --

/// A selectable app. Two summaries refer to the same app when their ids match;
/// summaries are re-fetched on every sync so never compare them structurally.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl AppSummary {
    pub fn same_app(&self, other: &AppSummary) -> bool {
        self.id == other.id
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WeekPick {
    pub position: u8,
    pub app: AppSummary,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DayPick {
    pub day: u8,
    pub date: String,
    pub app: AppSummary,
}

/// Everything assigned to one ISO week: featured positions and days.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct WeekPicks {
    pub year: i32,
    pub week: u32,
    #[serde(default)]
    pub apps_of_the_week: Vec<WeekPick>,
    #[serde(default)]
    pub apps_of_the_day: Vec<DayPick>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GuidelineStatus {
    pub guideline_id: String,
    pub category: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub passed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct GuidelineReport {
    pub guidelines: Vec<GuidelineStatus>,
    #[serde(default)]
    pub review_requested_at: Option<String>,
    #[serde(default)]
    pub is_fullscreen_app: bool,
    #[serde(default)]
    pub branding: Option<AppBranding>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct AppBranding {
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub primary_light: Option<String>,
    #[serde(default)]
    pub primary_dark: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct UserInfo {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub is_quality_moderator: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthReport {
    pub api_base_url: String,
    pub api_reachable: bool,
    pub api_token_set: bool,
    pub is_quality_moderator: bool,
    pub cached_apps: Option<usize>,
}

fn js_error(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| "Unknown error".to_string())
}

async fn call<A: Serialize, T: for<'de> Deserialize<'de>>(cmd: &str, args: &A) -> Result<T, String> {
    let args = serde_wasm_bindgen::to_value(args).map_err(|e| e.to_string())?;
    let result = invoke(cmd, args).await.map_err(js_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

async fn call_unit<A: Serialize>(cmd: &str, args: &A) -> Result<(), String> {
    let args = serde_wasm_bindgen::to_value(args).map_err(|e| e.to_string())?;
    invoke(cmd, args).await.map(|_| ()).map_err(js_error)
}

// -- Credentials and preferences --

pub async fn set_api_token(service: &str, token: &str) -> Result<(), String> {
    call_unit(
        "set_api_token",
        &SetTokenArgs {
            service: service.to_string(),
            token: token.to_string(),
        },
    )
    .await
}

pub async fn get_api_token(service: &str) -> Result<Option<String>, String> {
    call(
        "get_api_token",
        &ServiceArgs {
            service: service.to_string(),
        },
    )
    .await
}

pub async fn delete_api_token(service: &str) -> Result<(), String> {
    call_unit(
        "delete_api_token",
        &ServiceArgs {
            service: service.to_string(),
        },
    )
    .await
}

pub async fn get_preference(key: &str) -> Result<Option<String>, String> {
    call("get_preference", &GetPreferenceArgs { key: key.to_string() }).await
}

pub async fn set_preference(key: &str, value: &str) -> Result<(), String> {
    call_unit(
        "set_preference",
        &SetPreferenceArgs {
            key: key.to_string(),
            value: value.to_string(),
        },
    )
    .await
}

pub async fn run_health_check() -> Result<HealthReport, String> {
    call("run_health_check", &serde_json::json!({})).await
}

pub async fn clear_metadata_cache() -> Result<usize, String> {
    call("clear_metadata_cache", &serde_json::json!({})).await
}

pub async fn get_user_info() -> Result<UserInfo, String> {
    call("get_user_info", &serde_json::json!({})).await
}

// -- App picks --

/// Fetch the picks of the ISO week containing `date` (YYYY-MM-DD).
pub async fn get_week_picks(date: &str) -> Result<WeekPicks, String> {
    call("get_week_picks", &WeekPicksArgs { date: date.to_string() }).await
}

pub async fn set_week_pick(app_id: &str, week_number: u32, year: i32, position: u8) -> Result<(), String> {
    call_unit(
        "set_week_pick",
        &SetWeekPickArgs {
            app_id: app_id.to_string(),
            week_number,
            year,
            position,
        },
    )
    .await
}

pub async fn set_day_pick(app_id: &str, day: &str) -> Result<(), String> {
    call_unit(
        "set_day_pick",
        &SetDayPickArgs {
            app_id: app_id.to_string(),
            day: day.to_string(),
        },
    )
    .await
}

/// Apps currently passing quality moderation, with metadata resolved.
pub async fn list_eligible_apps() -> Result<Vec<AppSummary>, String> {
    call("list_eligible_apps", &serde_json::json!({})).await
}

pub async fn get_app_summary(app_id: &str) -> Result<AppSummary, String> {
    call(
        "get_app_summary",
        &AppArgs {
            app_id: app_id.to_string(),
        },
    )
    .await
}

// -- Quality moderation --

pub async fn get_guideline_status(app_id: &str) -> Result<GuidelineReport, String> {
    call(
        "get_guideline_status",
        &AppArgs {
            app_id: app_id.to_string(),
        },
    )
    .await
}

pub async fn set_guideline_status(app_id: &str, guideline_id: &str, passed: bool) -> Result<(), String> {
    call_unit(
        "set_guideline_status",
        &SetGuidelineArgs {
            app_id: app_id.to_string(),
            guideline_id: guideline_id.to_string(),
            passed,
        },
    )
    .await
}

/// Mark the given guidelines of an app as passed. Returns how many were set.
pub async fn pass_all_guidelines(app_id: &str, guideline_ids: Vec<String>) -> Result<usize, String> {
    call(
        "pass_all_guidelines",
        &PassAllArgs {
            app_id: app_id.to_string(),
            guideline_ids,
        },
    )
    .await
}

pub async fn set_fullscreen_app(app_id: &str, is_fullscreen_app: bool) -> Result<(), String> {
    call_unit(
        "set_fullscreen_app",
        &SetFullscreenArgs {
            app_id: app_id.to_string(),
            is_fullscreen_app,
        },
    )
    .await
}

pub async fn dismiss_review_request(app_id: &str) -> Result<(), String> {
    call_unit(
        "dismiss_review_request",
        &AppArgs {
            app_id: app_id.to_string(),
        },
    )
    .await
}

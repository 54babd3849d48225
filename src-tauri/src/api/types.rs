//! Wire types for the catalog service and the shapes handed to the frontend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// -- Catalog service responses and request bodies --

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppsOfTheWeek {
    #[serde(default)]
    pub apps: Vec<AppOfTheWeek>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppOfTheWeek {
    pub app_id: String,
    pub position: u8,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppOfTheDay {
    #[serde(default)]
    pub app_id: Option<String>,
    pub day: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetAppOfTheWeek<'a> {
    pub app_id: &'a str,
    #[serde(rename = "weekNumber")]
    pub week_number: u32,
    pub year: i32,
    pub position: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetAppOfTheDay<'a> {
    pub app_id: &'a str,
    pub day: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QualityStatusPage {
    #[serde(default)]
    pub apps: Vec<QualityStatusEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QualityStatusEntry {
    pub id: String,
    pub quality_moderation_status: QualityModerationStatus,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QualityModerationStatus {
    pub passes: bool,
    #[serde(default)]
    pub unrated: u32,
    #[serde(default)]
    pub failed: u32,
    #[serde(default)]
    pub review_requested_at: Option<String>,
}

/// The subset of an app's appstream metadata the console shows.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Appstream {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub summary: Option<String>,
    /// Some catalog responses carry `subtitle` instead of, or next to, `summary`.
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub branding: Vec<BrandingColor>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BrandingColor {
    pub value: String,
    #[serde(default)]
    pub scheme_preference: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl Appstream {
    /// The primary brand color declared for `scheme` ("light" or "dark").
    pub fn primary_color(&self, scheme: &str) -> Option<String> {
        self.branding
            .iter()
            .find(|b| b.kind.as_deref() == Some("primary") && b.scheme_preference.as_deref() == Some(scheme))
            .map(|b| b.value.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModerationReport {
    #[serde(default)]
    pub guidelines: Vec<GuidelineEntry>,
    #[serde(default)]
    pub is_fullscreen_app: bool,
    #[serde(default)]
    pub review_requested_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GuidelineEntry {
    pub guideline_id: String,
    pub guideline: Guideline,
    #[serde(default)]
    pub passed: Option<bool>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub updated_by: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Guideline {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub read_only: bool,
    pub category: String,
    #[serde(default)]
    pub needed_to_pass_since: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetGuideline<'a> {
    pub guideline_id: &'a str,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteUserInfo {
    #[serde(default)]
    pub displayname: Option<String>,
    #[serde(default)]
    pub is_quality_moderator: bool,
}

// -- Shapes returned to the frontend --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSummary {
    pub id: String,
    pub name: String,
    pub subtitle: Option<String>,
    pub icon: Option<String>,
}

impl From<Appstream> for AppSummary {
    fn from(a: Appstream) -> Self {
        Self {
            id: a.id,
            name: a.name,
            subtitle: a.summary.or(a.subtitle),
            icon: a.icon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekPick {
    pub position: u8,
    pub app: AppSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPick {
    /// 0 for Monday through 6 for Sunday.
    pub day: u8,
    pub date: String,
    pub app: AppSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekPicks {
    pub year: i32,
    pub week: u32,
    pub apps_of_the_week: Vec<WeekPick>,
    pub apps_of_the_day: Vec<DayPick>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuidelineStatus {
    pub guideline_id: String,
    pub category: String,
    pub url: Option<String>,
    pub read_only: bool,
    pub passed: Option<bool>,
}

/// Icon and primary brand colors for previewing an app's icon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppBranding {
    pub icon: Option<String>,
    pub primary_light: Option<String>,
    pub primary_dark: Option<String>,
}

impl From<&Appstream> for AppBranding {
    fn from(a: &Appstream) -> Self {
        Self {
            icon: a.icon.clone(),
            primary_light: a.primary_color("light"),
            primary_dark: a.primary_color("dark"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuidelineReport {
    pub guidelines: Vec<GuidelineStatus>,
    pub review_requested_at: Option<String>,
    pub is_fullscreen_app: bool,
    /// Absent when the app's metadata could not be fetched.
    pub branding: Option<AppBranding>,
}

impl From<ModerationReport> for GuidelineReport {
    fn from(r: ModerationReport) -> Self {
        Self {
            guidelines: r
                .guidelines
                .into_iter()
                .map(|g| GuidelineStatus {
                    guideline_id: g.guideline_id,
                    category: g.guideline.category,
                    url: g.guideline.url,
                    read_only: g.guideline.read_only,
                    passed: g.passed,
                })
                .collect(),
            review_requested_at: r.review_requested_at,
            is_fullscreen_app: r.is_fullscreen_app,
            branding: None,
        }
    }
}

impl GuidelineReport {
    pub fn with_branding(mut self, branding: Option<AppBranding>) -> Self {
        self.branding = branding;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserInfo {
    pub display_name: Option<String>,
    pub is_quality_moderator: bool,
}

impl From<RemoteUserInfo> for UserInfo {
    fn from(u: RemoteUserInfo) -> Self {
        Self {
            display_name: u.displayname,
            is_quality_moderator: u.is_quality_moderator,
        }
    }
}

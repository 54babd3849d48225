use tracing::{info, warn};

use super::types::{AppBranding, GuidelineReport, ModerationReport, SetGuideline};
use super::{require, CatalogClient};
use crate::error::AppPicksError;

impl CatalogClient {
    pub async fn moderation_report(&self, app_id: &str) -> Result<ModerationReport, AppPicksError> {
        let app_id = require("app id", app_id)?;
        let url = self.endpoint(&["quality-moderation", app_id])?;
        self.get_json(url).await
    }

    /// The moderation report plus the app's icon and brand colors. Missing
    /// metadata only drops the icon preview, never the report.
    pub async fn guideline_report(&self, app_id: &str) -> Result<GuidelineReport, AppPicksError> {
        let (report, appstream) = tokio::join!(self.moderation_report(app_id), self.appstream(app_id));
        let branding = match appstream {
            Ok(appstream) => Some(AppBranding::from(&appstream)),
            Err(e) => {
                warn!("No branding for {}: {}", app_id, e);
                None
            }
        };
        Ok(GuidelineReport::from(report?).with_branding(branding))
    }

    pub async fn set_guideline(&self, app_id: &str, guideline_id: &str, passed: bool) -> Result<(), AppPicksError> {
        let app_id = require("app id", app_id)?;
        let guideline_id = require("guideline id", guideline_id)?;
        info!("Setting {} of {} to passed={}", guideline_id, app_id, passed);
        let url = self.endpoint(&["quality-moderation", app_id])?;
        self.post_json(url, &SetGuideline { guideline_id, passed }).await
    }

    pub async fn set_fullscreen_app(&self, app_id: &str, is_fullscreen_app: bool) -> Result<(), AppPicksError> {
        let app_id = require("app id", app_id)?;
        info!("Setting fullscreen flag of {} to {}", app_id, is_fullscreen_app);
        let mut url = self.endpoint(&["quality-moderation", app_id, "fullscreen"])?;
        url.query_pairs_mut()
            .append_pair("is_fullscreen_app", if is_fullscreen_app { "true" } else { "false" });
        self.post_empty(url).await
    }

    pub async fn delete_review_request(&self, app_id: &str) -> Result<(), AppPicksError> {
        let app_id = require("app id", app_id)?;
        info!("Dismissing review request for {}", app_id);
        let url = self.endpoint(&["quality-moderation", app_id, "request-review"])?;
        self.delete(url).await
    }
}

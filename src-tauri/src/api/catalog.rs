use tracing::info;

use super::types::{Appstream, QualityStatusPage, RemoteUserInfo};
use super::{require, CatalogClient};
use crate::error::AppPicksError;

pub const DEFAULT_ELIGIBLE_PAGE_SIZE: u32 = 10_000;

impl CatalogClient {
    /// Ids of apps currently passing quality moderation, in server order.
    ///
    /// Only the first page is read; `page_size` is expected to cover the
    /// whole catalog.
    pub async fn passing_app_ids(&self, page_size: u32) -> Result<Vec<String>, AppPicksError> {
        let mut url = self.endpoint(&["quality-moderation", "status"])?;
        url.query_pairs_mut()
            .append_pair("page", "1")
            .append_pair("page_size", &page_size.max(1).to_string())
            .append_pair("filter", "passing");

        let page: QualityStatusPage = self.get_json(url).await?;
        let total = page.apps.len();
        // The filter is advisory on older servers
        let ids: Vec<String> = page
            .apps
            .into_iter()
            .filter(|app| app.quality_moderation_status.passes)
            .map(|app| app.id)
            .collect();
        info!("{} of {} listed apps pass quality moderation", ids.len(), total);
        Ok(ids)
    }

    pub async fn appstream(&self, app_id: &str) -> Result<Appstream, AppPicksError> {
        let app_id = require("app id", app_id)?;
        let url = self.endpoint(&["appstream", app_id])?;
        self.get_json(url).await
    }

    pub async fn user_info(&self) -> Result<RemoteUserInfo, AppPicksError> {
        let url = self.endpoint(&["auth", "userinfo"])?;
        self.get_json(url).await
    }
}

use chrono::NaiveDate;
use tracing::info;

use super::types::{AppOfTheDay, AppsOfTheWeek, SetAppOfTheDay, SetAppOfTheWeek};
use super::{require, CatalogClient};
use crate::error::AppPicksError;
use crate::week::validate_week;

/// Featured positions run from 1 to this.
pub const WEEK_POSITIONS: u8 = 5;

impl CatalogClient {
    /// Apps of the week for the ISO week containing `date`.
    pub async fn apps_of_the_week(&self, date: NaiveDate) -> Result<AppsOfTheWeek, AppPicksError> {
        let url = self.endpoint(&["app-picks", "apps-of-the-week", &date.to_string()])?;
        self.get_json(url).await
    }

    /// App of the day for `date`, if one has been chosen.
    pub async fn app_of_the_day(&self, date: NaiveDate) -> Result<Option<String>, AppPicksError> {
        let url = self.endpoint(&["app-picks", "app-of-the-day", &date.to_string()])?;
        let day: Option<AppOfTheDay> = self.get_optional_json(url).await?;
        Ok(day.and_then(|d| d.app_id).filter(|id| !id.is_empty()))
    }

    pub async fn set_app_of_the_week(
        &self,
        app_id: &str,
        week_number: u32,
        year: i32,
        position: u8,
    ) -> Result<(), AppPicksError> {
        let app_id = require("app id", app_id)?;
        if !(1..=WEEK_POSITIONS).contains(&position) {
            return Err(AppPicksError::InvalidInput(format!(
                "position must be between 1 and {}, got {}",
                WEEK_POSITIONS, position
            )));
        }
        validate_week(year, week_number)?;

        info!("Setting app of the week {}/{} position {} to {}", year, week_number, position, app_id);
        let url = self.endpoint(&["app-picks", "app-of-the-week"])?;
        self.post_json(
            url,
            &SetAppOfTheWeek {
                app_id,
                week_number,
                year,
                position,
            },
        )
        .await
    }

    pub async fn set_app_of_the_day(&self, app_id: &str, day: NaiveDate) -> Result<(), AppPicksError> {
        let app_id = require("app id", app_id)?;
        info!("Setting app of the day {} to {}", day, app_id);
        let url = self.endpoint(&["app-picks", "app-of-the-day"])?;
        self.post_json(url, &SetAppOfTheDay { app_id, day }).await
    }
}

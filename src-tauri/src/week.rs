//! ISO week arithmetic for the picks endpoints.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::AppPicksError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekRange {
    pub monday: NaiveDate,
}

impl WeekRange {
    pub fn containing(date: NaiveDate) -> Self {
        let offset = date.weekday().num_days_from_monday() as i64;
        Self {
            monday: date - Duration::days(offset),
        }
    }

    /// Parse a `YYYY-MM-DD` date and return the ISO week it falls in.
    pub fn parse(date: &str) -> Result<Self, AppPicksError> {
        let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|e| AppPicksError::InvalidInput(format!("'{}' is not a date: {}", date, e)))?;
        Ok(Self::containing(day))
    }

    pub fn year(&self) -> i32 {
        self.monday.iso_week().year()
    }

    pub fn number(&self) -> u32 {
        self.monday.iso_week().week()
    }

    /// Monday through Sunday.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..7).map(move |i| self.monday + Duration::days(i))
    }
}

/// Reject anything that is not a real ISO week of `year`.
pub fn validate_week(year: i32, week: u32) -> Result<(), AppPicksError> {
    if NaiveDate::from_isoywd_opt(year, week, chrono::Weekday::Mon).is_none() {
        return Err(AppPicksError::InvalidInput(format!(
            "week {} does not exist in {}",
            week, year
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containing_snaps_to_monday() {
        let week = WeekRange::parse("2026-10-22").unwrap();
        assert_eq!(week.monday, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        assert_eq!(week.number(), 43);
    }

    #[test]
    fn test_year_boundaries() {
        let first = WeekRange::parse("2026-01-01").unwrap();
        assert_eq!((first.year(), first.number()), (2026, 1));

        let last = WeekRange::parse("2027-01-01").unwrap();
        assert_eq!((last.year(), last.number()), (2026, 53));
    }

    #[test]
    fn test_days_cover_monday_to_sunday() {
        let week = WeekRange::parse("2026-10-19").unwrap();
        let days: Vec<String> = week.days().map(|d| d.to_string()).collect();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], "2026-10-19");
        assert_eq!(days[6], "2026-10-25");
    }

    #[test]
    fn test_invalid_input() {
        assert!(WeekRange::parse("yesterday").is_err());
        assert!(validate_week(2026, 53).is_ok());
        assert!(validate_week(2025, 53).is_err());
        assert!(validate_week(2026, 0).is_err());
    }
}

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// An ISO week, anchored on its Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IsoWeek {
    monday: NaiveDate,
}

impl IsoWeek {
    pub fn containing(date: NaiveDate) -> Self {
        let offset = date.weekday().num_days_from_monday() as i64;
        Self {
            monday: date - Duration::days(offset),
        }
    }

    /// The week containing the browser's current local date.
    pub fn current() -> Self {
        let now = js_sys::Date::new_0();
        let today = NaiveDate::from_ymd_opt(
            now.get_full_year() as i32,
            now.get_month() + 1,
            now.get_date(),
        )
        .unwrap_or_default();
        Self::containing(today)
    }

    /// ISO week-numbering year, which differs from the calendar year around New Year.
    pub fn year(&self) -> i32 {
        self.monday.iso_week().year()
    }

    pub fn number(&self) -> u32 {
        self.monday.iso_week().week()
    }

    pub fn start(&self) -> NaiveDate {
        self.monday
    }

    pub fn end(&self) -> NaiveDate {
        self.monday + Duration::days(6)
    }

    /// Date of day `offset` (0 = Monday) within this week.
    pub fn day(&self, offset: u8) -> NaiveDate {
        self.monday + Duration::days(offset as i64)
    }

    pub fn previous(&self) -> Self {
        Self {
            monday: self.monday - Duration::days(7),
        }
    }

    pub fn next(&self) -> Self {
        Self {
            monday: self.monday + Duration::days(7),
        }
    }

    pub fn title(&self) -> String {
        format!("Week {} of {}", self.number(), self.year())
    }

    pub fn range_label(&self) -> String {
        format!(
            "{} to {}",
            self.start().format("%a %b %d %Y"),
            self.end().format("%a %b %d %Y")
        )
    }
}

pub fn day_label(date: NaiveDate) -> String {
    let name = match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    };
    format!("{} {}", name, date.format("%b %d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_starts_on_monday() {
        let week = IsoWeek::containing(date(2026, 10, 15));
        assert_eq!(week.start(), date(2026, 10, 12));
        assert_eq!(week.end(), date(2026, 10, 18));
        assert_eq!(week.number(), 42);
        assert_eq!(week.year(), 2026);
    }

    #[test]
    fn test_sunday_belongs_to_preceding_monday() {
        let week = IsoWeek::containing(date(2026, 10, 18));
        assert_eq!(week.start(), date(2026, 10, 12));
    }

    #[test]
    fn test_iso_year_at_year_boundary() {
        let first = IsoWeek::containing(date(2026, 1, 1));
        assert_eq!(first.number(), 1);
        assert_eq!(first.year(), 2026);
        assert_eq!(first.start(), date(2025, 12, 29));

        let last = IsoWeek::containing(date(2027, 1, 1));
        assert_eq!(last.number(), 53);
        assert_eq!(last.year(), 2026);
    }

    #[test]
    fn test_navigation_is_symmetric() {
        let week = IsoWeek::containing(date(2026, 3, 4));
        assert_eq!(week.next().previous(), week);
        assert_eq!(week.next().start(), date(2026, 3, 9));
        assert_eq!(week.previous().start(), date(2026, 2, 23));
    }

    #[test]
    fn test_day_offsets() {
        let week = IsoWeek::containing(date(2026, 10, 19));
        assert_eq!(week.day(0), date(2026, 10, 19));
        assert_eq!(week.day(6), date(2026, 10, 25));
        assert_eq!(day_label(week.day(2)), "Wednesday Oct 21");
    }
}

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone};
use serde::Serialize;

/// Month in which a new season starts. Seasons run August through May and are
/// named after their starting year.
pub const SEASON_START_MONTH: u32 = 8;

/// The calendar week a sync run covers, plus the season it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncWindow {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub season_year: i32,
}

impl SyncWindow {
    /// Sunday-to-Saturday week containing `now`, measured on `now`'s local calendar.
    pub fn for_instant<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self::for_date(now.date_naive())
    }

    pub fn for_date(today: NaiveDate) -> Self {
        let days_since_sunday = today.weekday().num_days_from_sunday() as i64;
        let week_start = today - Duration::days(days_since_sunday);

        Self {
            week_start,
            week_end: week_start + Duration::days(6),
            season_year: season_year(today),
        }
    }

    /// `from` query value, `YYYY-MM-DD`.
    pub fn from_date(&self) -> String {
        format_date(self.week_start)
    }

    /// `to` query value, `YYYY-MM-DD`.
    pub fn to_date(&self) -> String {
        format_date(self.week_end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.week_start <= date && date <= self.week_end
    }
}

pub fn season_year(date: NaiveDate) -> i32 {
    if date.month() >= SEASON_START_MONTH {
        date.year()
    } else {
        date.year() - 1
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

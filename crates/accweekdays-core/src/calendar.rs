use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Weekday};

use crate::error::AccWeekdaysError;

pub const SECONDS_PER_DAY: i64 = 86_400;
pub const DAYS_PER_WEEK: i64 = 7;
pub const WEEKEND_DAYS_PER_WEEK: i64 = 2;

/// The local calendar day a timestamp falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub weekday: Weekday,
}

impl CalendarDay {
    /// Resolve the day containing `ts` (epoch seconds) in `tz`.
    pub fn of<Tz: TimeZone>(ts: i64, tz: &Tz) -> Result<Self, AccWeekdaysError> {
        let local = DateTime::from_timestamp(ts, 0)
            .ok_or(AccWeekdaysError::TimestampOutOfRange(ts))?
            .with_timezone(tz);
        Ok(Self {
            date: local.date_naive(),
            weekday: local.weekday(),
        })
    }

    pub fn is_weekend(&self) -> bool {
        is_weekend(self.weekday)
    }

    /// Day-of-week ordinal with Sunday=1 through Saturday=7.
    pub fn ordinal(&self) -> u32 {
        self.weekday.number_from_sunday()
    }
}

pub fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

/// Epoch seconds of local midnight on `date` in `tz`.
///
/// When midnight occurs twice (clocks set back at 00:00) the earlier instant
/// is used. Fails when midnight is skipped by a forward DST jump.
pub fn midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Result<i64, AccWeekdaysError> {
    tz.from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .map(|dt| dt.timestamp())
        .ok_or(AccWeekdaysError::NoMidnight { date })
}

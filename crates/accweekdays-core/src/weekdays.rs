use chrono::{Duration, NaiveDate, TimeZone, Weekday};
use tracing::{debug, warn};

use crate::calendar::{self, CalendarDay, DAYS_PER_WEEK, SECONDS_PER_DAY, WEEKEND_DAYS_PER_WEEK};
use crate::error::AccWeekdaysError;

/// Which end of the interval a timestamp is snapped as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Start,
    End,
}

/// Seconds in `[start, end]` that fall on Monday to Friday in `tz`.
///
/// Returns `None` when either argument is null, when `start > end`, or when a
/// timestamp cannot be placed on the calendar. This mirrors the SQL contract:
/// bad rows produce null and never fail the query.
pub fn accweekdays<Tz: TimeZone>(start: Option<i64>, end: Option<i64>, tz: &Tz) -> Option<i64> {
    let (start, end) = (start?, end?);
    match weekday_seconds(start, end, tz) {
        Ok(seconds) => Some(seconds),
        Err(e) => {
            debug!(start, end, error = %e, "accweekdays yields null");
            None
        }
    }
}

/// Checked form of [`accweekdays`] that reports why no result was produced.
pub fn weekday_seconds<Tz: TimeZone>(
    start: i64,
    end: i64,
    tz: &Tz,
) -> Result<i64, AccWeekdaysError> {
    if start > end {
        return Err(AccWeekdaysError::StartAfterEnd { start, end });
    }
    calculate(start, end, tz)
}

fn calculate<Tz: TimeZone>(start: i64, end: i64, tz: &Tz) -> Result<i64, AccWeekdaysError> {
    debug_assert!(start <= end, "start {start} is after end {end}");

    let adj_start = snap(start, Boundary::Start, tz)?;
    let adj_end = snap(end, Boundary::End, tz)?;

    // Both endpoints inside the same weekend.
    if adj_start > adj_end {
        return Ok(0);
    }

    let total = adj_end - adj_start;
    let days = total / SECONDS_PER_DAY;
    let weeks = days / DAYS_PER_WEEK;

    let start_dow = CalendarDay::of(adj_start, tz)?.ordinal();
    let end_dow = CalendarDay::of(adj_end, tz)?.ordinal();

    let weekends = if start_dow <= end_dow { weeks } else { weeks + 1 };
    let seconds = total - SECONDS_PER_DAY * WEEKEND_DAYS_PER_WEEK * weekends;

    // A 47-hour DST weekend can still push the subtraction below zero.
    Ok(seconds.max(0))
}

/// Move a weekend timestamp onto the nearest weekday boundary.
///
/// A start on Saturday or Sunday moves forward to local midnight on Monday; an
/// end moves back to local midnight on Saturday, the instant Friday ends.
/// Weekday timestamps are returned unchanged.
pub fn snap<Tz: TimeZone>(
    ts: i64,
    boundary: Boundary,
    tz: &Tz,
) -> Result<i64, AccWeekdaysError> {
    let day = CalendarDay::of(ts, tz)?;
    if !day.is_weekend() {
        return Ok(ts);
    }

    let sunday = day.weekday == Weekday::Sun;
    let shift_days: i64 = match (boundary, sunday) {
        (Boundary::Start, true) => 1,
        (Boundary::Start, false) => 2,
        (Boundary::End, true) => -1,
        (Boundary::End, false) => 0,
    };

    let target = day
        .date
        .checked_add_signed(Duration::days(shift_days))
        .ok_or(AccWeekdaysError::TimestampOutOfRange(ts))?;

    Ok(midnight_or(target, ts + shift_days * SECONDS_PER_DAY, tz))
}

/// Local midnight of `date`, or `fallback` when that midnight does not exist.
fn midnight_or<Tz: TimeZone>(date: NaiveDate, fallback: i64, tz: &Tz) -> i64 {
    calendar::midnight(date, tz).unwrap_or_else(|e| {
        warn!(%date, fallback, error = %e, "treating timestamp as day-aligned");
        fallback
    })
}

//! Business-day arithmetic at calendar-date granularity.
//!
//! A business day is Monday through Friday. No holiday calendar is modeled.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::BurndownError;

/// Days from Monday, with Saturday and Sunday both clamped to 5.
///
/// This is the number of weekdays in the date's week that come strictly
/// before it.
fn weekday_offset(date: NaiveDate) -> i64 {
    i64::from(date.weekday().num_days_from_monday().min(5))
}

/// Absolute day number of the Monday that starts `date`'s week.
fn week_start(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - i64::from(date.weekday().num_days_from_monday())
}

#[must_use]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Count business days elapsed from `start` up to `end`.
///
/// Counts the weekdays in `[start, end)`: `start` itself counts when it is a
/// weekday, `end` does not. The whole weeks between the end of `start`'s week
/// and the beginning of `end`'s week are scaled by 5/7, then the partial
/// first and last weeks are added back from each date's weekday offset.
///
/// # Errors
///
/// Returns [`BurndownError::InvalidDateOrder`] when `start` is after `end`.
pub fn elapsed_business_days(start: NaiveDate, end: NaiveDate) -> Result<f64, BurndownError> {
    if start > end {
        return Err(BurndownError::InvalidDateOrder { start, end });
    }

    let first_anchor = week_start(start) + 7;
    let last_anchor = week_start(end);
    // Always a multiple of 7 (negative when both dates share a week).
    let whole_weeks = (last_anchor - first_anchor) * 5 / 7;

    let head = 5 - weekday_offset(start);
    let tail = weekday_offset(end);

    #[allow(clippy::cast_precision_loss)]
    let elapsed = (head + whole_weeks + tail) as f64;
    Ok(elapsed)
}

/// Advance `date` by `count` business days.
///
/// Steps one calendar day at a time and decrements the remaining count only
/// when the day landed on is a weekday, stopping once the remainder is
/// `<= 0`. A fractional count therefore rounds up to the next whole business
/// day. Zero or negative counts return `date` unchanged.
///
/// # Errors
///
/// Returns [`BurndownError::NonFiniteOffset`] for NaN or infinite counts and
/// [`BurndownError::DateOutOfRange`] if the walk runs past the last
/// representable date.
pub fn add_business_days(date: NaiveDate, count: f64) -> Result<NaiveDate, BurndownError> {
    if !count.is_finite() {
        return Err(BurndownError::NonFiniteOffset(count));
    }

    // Business days never outnumber calendar days, so a count larger than the
    // room left in the calendar cannot land.
    #[allow(clippy::cast_precision_loss)]
    let room = (NaiveDate::MAX - date).num_days() as f64;
    if count > room {
        return Err(BurndownError::DateOutOfRange(date));
    }

    let mut current = date;
    let mut remaining = count;
    while remaining > 0.0 {
        current = current
            .succ_opt()
            .ok_or(BurndownError::DateOutOfRange(date))?;
        if !is_weekend(current) {
            remaining -= 1.0;
        }
    }

    Ok(current)
}

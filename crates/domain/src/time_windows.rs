// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar window calculation for dashboard aggregates.
//!
//! ## Invariants
//!
//! - Windows are calendar-month-aligned in local time
//! - Windows are half-open intervals `[start, next_month_start)`
//! - Boundaries are converted to UTC for storage comparison
//!
//! This logic is used by the quick-stats day boundary and the monthly
//! trend series.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveTime, TimeZone, Utc};

/// A calendar-month window with a short display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthWindow {
    /// Short month name, e.g. `Jan`.
    pub label: String,
    /// Inclusive window start (UTC).
    pub start: DateTime<Utc>,
    /// Exclusive window end (UTC).
    pub end: DateTime<Utc>,
}

/// Converts a local calendar date's midnight to a UTC instant.
///
/// When local midnight does not exist (DST gap), the earliest valid local
/// time is used; as a last resort the naive time is interpreted as UTC.
fn local_midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    Local.from_local_datetime(&naive).earliest().map_or_else(
        || Utc.from_utc_datetime(&naive),
        |dt| dt.with_timezone(&Utc),
    )
}

/// Returns the UTC instant of the start of the current local day.
#[must_use]
pub fn start_of_local_day(now: DateTime<Utc>) -> DateTime<Utc> {
    local_midnight_utc(now.with_timezone(&Local).date_naive())
}

/// Returns `count` calendar-month windows ending with the current local
/// month, oldest first.
///
/// Each window runs from local midnight on the first of the month to
/// local midnight on the first of the following month, exclusive.
#[must_use]
pub fn recent_month_windows(now: DateTime<Utc>, count: u32) -> Vec<MonthWindow> {
    let today: NaiveDate = now.with_timezone(&Local).date_naive();
    let anchor: i32 = today.year() * 12 + i32::try_from(today.month0()).unwrap_or(0);

    let mut windows: Vec<MonthWindow> = Vec::with_capacity(count as usize);
    for back in (0..i32::try_from(count).unwrap_or(0)).rev() {
        let index: i32 = anchor - back;
        let year: i32 = index.div_euclid(12);
        let month: u32 = u32::try_from(index.rem_euclid(12)).unwrap_or(0) + 1;

        // month is always in 1..=12, so the first of the month exists
        let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
            continue;
        };
        let next: i32 = index + 1;
        let Some(next_first) = NaiveDate::from_ymd_opt(
            next.div_euclid(12),
            u32::try_from(next.rem_euclid(12)).unwrap_or(0) + 1,
            1,
        ) else {
            continue;
        };

        windows.push(MonthWindow {
            label: first.format("%b").to_string(),
            start: local_midnight_utc(first),
            end: local_midnight_utc(next_first),
        });
    }

    windows
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_recent_month_windows_count_and_order() {
        let now: DateTime<Utc> = Utc::now();
        let windows: Vec<MonthWindow> = recent_month_windows(now, 7);

        assert_eq!(windows.len(), 7);
        for pair in windows.windows(2) {
            // Adjacent windows share a boundary: half-open intervals
            assert_eq!(pair[0].end, pair[1].start);
            assert!(pair[0].start < pair[1].start);
        }
    }

    #[test]
    fn test_current_month_window_contains_now() {
        let now: DateTime<Utc> = Utc::now();
        let windows: Vec<MonthWindow> = recent_month_windows(now, 7);
        let current: &MonthWindow = windows.last().unwrap();

        assert!(current.start <= now);
        assert!(now < current.end);
    }

    #[test]
    fn test_month_labels_are_short_names() {
        let now: DateTime<Utc> = Utc::now();
        for window in recent_month_windows(now, 7) {
            assert_eq!(window.label.len(), 3);
        }
    }

    #[test]
    fn test_start_of_local_day_is_at_or_before_now() {
        let now: DateTime<Utc> = Utc::now();
        let start: DateTime<Utc> = start_of_local_day(now);

        assert!(start <= now);
        // 25h accounts for the long DST fall-back day
        assert!(now.signed_duration_since(start).num_hours() <= 25);
    }
}

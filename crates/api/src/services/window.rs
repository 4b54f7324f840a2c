//! Half-open UTC time windows for record queries.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

/// `from <= recorded_at < to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// The `days` days ending at `now`. Non-positive values yield an empty window.
pub fn trailing_window(now: DateTime<Utc>, days: i64) -> TimeWindow {
    TimeWindow {
        from: now - Duration::days(days.max(0)),
        to: now,
    }
}

/// One UTC calendar day.
pub fn day_window(day: NaiveDate) -> TimeWindow {
    let from = Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN));
    TimeWindow {
        from,
        to: from + Duration::days(1),
    }
}

/// From the start of `first_day` to `now`.
pub fn since_day(first_day: NaiveDate, now: DateTime<Utc>) -> TimeWindow {
    TimeWindow {
        from: day_window(first_day).from,
        to: now,
    }
}

/// Window covering inclusive `start..=end` dates.
///
/// A missing end means up to `now`; a missing start means `default_days`
/// before the end.
pub fn date_range_window(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    now: DateTime<Utc>,
    default_days: i64,
) -> TimeWindow {
    let to = end.map(|day| day_window(day).to).unwrap_or(now);
    let from = start
        .map(|day| day_window(day).from)
        .unwrap_or_else(|| to - Duration::days(default_days.max(0)));
    TimeWindow { from, to }
}

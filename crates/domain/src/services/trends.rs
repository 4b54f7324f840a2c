//! Violation trends over weekly or monthly buckets.

use chrono::{Datelike, Duration, Months, NaiveDate};
use std::collections::BTreeMap;

use crate::models::{ActivePpeItems, ComplianceRecord, TrendDataPoint, TrendPeriod};

/// How a trend series is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendOptions {
    pub period: TrendPeriod,
    /// Number of buckets, the last one containing the end date.
    pub buckets: usize,
    /// Fill empty buckets with deterministic sample values.
    pub demo_mode: bool,
}

/// Start of the bucket containing `day`: Monday for weeks, the 1st for months.
pub fn bucket_start(day: NaiveDate, period: TrendPeriod) -> NaiveDate {
    match period {
        TrendPeriod::Week => day - Duration::days(day.weekday().num_days_from_monday() as i64),
        TrendPeriod::Month => day.with_day(1).unwrap_or(day),
    }
}

fn next_start(start: NaiveDate, period: TrendPeriod) -> NaiveDate {
    match period {
        TrendPeriod::Week => start + Duration::days(7),
        TrendPeriod::Month => start
            .checked_add_months(Months::new(1))
            .unwrap_or(NaiveDate::MAX),
    }
}

/// Bucket start dates ending with the bucket that contains `end`, oldest first.
pub fn bucket_starts(end: NaiveDate, period: TrendPeriod, buckets: usize) -> Vec<NaiveDate> {
    let last = bucket_start(end, period);
    let mut starts: Vec<NaiveDate> = (0..buckets)
        .filter_map(|back| match period {
            TrendPeriod::Week => last.checked_sub_signed(Duration::weeks(back as i64)),
            TrendPeriod::Month => last.checked_sub_months(Months::new(back as u32)),
        })
        .collect();
    starts.reverse();
    starts
}

/// First day covered by a series ending at `end`.
pub fn range_start(end: NaiveDate, period: TrendPeriod, buckets: usize) -> NaiveDate {
    bucket_starts(end, period, buckets.max(1))
        .first()
        .copied()
        .unwrap_or(end)
}

fn label(start: NaiveDate, period: TrendPeriod) -> String {
    match period {
        TrendPeriod::Week => start.format("%b %d").to_string(),
        TrendPeriod::Month => start.format("%b %Y").to_string(),
    }
}

/// Counts violations of each active item per bucket.
///
/// A record adds one to an item's count when it reports that item as `No`.
/// Records outside the series are ignored.
pub fn build_trends(
    records: &[ComplianceRecord],
    active: &ActivePpeItems,
    end: NaiveDate,
    options: &TrendOptions,
) -> Vec<TrendDataPoint> {
    let starts = bucket_starts(end, options.period, options.buckets);
    let Some(&last) = starts.last() else {
        return Vec::new();
    };
    let series_end = next_start(last, options.period);

    let empty: BTreeMap<String, u64> = active
        .iter()
        .map(|item| (item.display_name().to_string(), 0))
        .collect();
    let mut counts: Vec<BTreeMap<String, u64>> = vec![empty; starts.len()];

    for record in records {
        let day = record.timestamp.date_naive();
        if day >= series_end {
            continue;
        }
        let slot = starts.partition_point(|start| *start <= day);
        if slot == 0 {
            continue;
        }
        for item in record.violated_items(active) {
            if let Some(count) = counts[slot - 1].get_mut(item.display_name()) {
                *count += 1;
            }
        }
    }

    let total = starts.len();
    starts
        .into_iter()
        .zip(counts)
        .enumerate()
        .map(|(index, (start, mut bucket))| {
            let synthetic = options.demo_mode && bucket.values().all(|c| *c == 0);
            if synthetic {
                fill_sample(&mut bucket, active, (total - index) as u64);
            }
            TrendDataPoint {
                label: label(start, options.period),
                date: start,
                counts: bucket,
                synthetic,
            }
        })
        .collect()
}

/// Decreasing towards the present, distinct per item.
fn fill_sample(bucket: &mut BTreeMap<String, u64>, active: &ActivePpeItems, age: u64) {
    for (position, item) in active.iter().enumerate() {
        bucket.insert(item.display_name().to_string(), age * (3 + position as u64));
    }
}

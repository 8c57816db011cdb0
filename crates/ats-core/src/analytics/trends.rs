use chrono::{Datelike, NaiveDateTime};

use super::views::TrendBucket;

/// Number of calendar months covered by a trend series, current month included.
pub const TREND_WINDOW_MONTHS: i32 = 6;

/// Buckets the timestamps into the trailing window ending at `now`'s month.
///
/// Always returns exactly [`TREND_WINDOW_MONTHS`] buckets in ascending order;
/// months without records have a zero count and timestamps after `now` are ignored.
pub fn monthly_buckets(
    timestamps: impl IntoIterator<Item = NaiveDateTime>,
    now: NaiveDateTime,
) -> Vec<TrendBucket> {
    let last = month_index(now);
    let first = last - (TREND_WINDOW_MONTHS - 1);

    let mut buckets: Vec<TrendBucket> = (first..=last)
        .map(|index| {
            let (year, month) = from_month_index(index);
            TrendBucket {
                month,
                year,
                count: 0,
            }
        })
        .collect();

    for timestamp in timestamps {
        if timestamp > now {
            continue;
        }
        let index = month_index(timestamp);
        if index < first {
            continue;
        }
        if let Some(bucket) = usize::try_from(index - first)
            .ok()
            .and_then(|offset| buckets.get_mut(offset))
        {
            bucket.count += 1;
        }
    }

    buckets
}

fn month_index(timestamp: NaiveDateTime) -> i32 {
    timestamp.year() * 12 + timestamp.month0() as i32
}

fn from_month_index(index: i32) -> (i32, u32) {
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

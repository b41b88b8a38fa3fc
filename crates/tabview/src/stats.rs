//! Dashboard metrics over record collections.
//!
//! Small derived numbers the analytics screens chart next to the tables:
//! completion rates, period-over-period growth, monthly averages and
//! per-category counts. Like the rest of the crate these read records
//! through a field accessor and never fail.

use std::collections::BTreeMap;

use chrono::Datelike;
use indexmap::IndexMap;

use crate::value::Value;

/// Percentage of `completed` out of `total`; 0 for an empty total.
pub fn completion_rate(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    completed as f64 / total as f64 * 100.0
}

/// Percentage change from `previous` to `current`.
///
/// `None` when `previous` is zero: growth from nothing has no percentage.
pub fn growth_percent(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous.abs() * 100.0)
}

/// Aggregate of one calendar month (UTC).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyBucket {
    pub year: i32,
    /// 1-based month.
    pub month: u32,
    pub count: usize,
    pub total: f64,
}

impl MonthlyBucket {
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total / self.count as f64
        }
    }
}

/// Groups records by the month of `date_field` and sums `value_field`.
///
/// Buckets come out in chronological order. Records with a missing date,
/// a date out of calendar range, or a missing or NaN value are skipped.
///
/// ```
/// use tabview::{monthly_average, Timestamp, Value};
///
/// fn accessor<'a>(p: &'a (i64, f64), field: &str) -> Value<'a> {
///     match field {
///         "paid_at" => Value::Date(Timestamp::from_secs(p.0)),
///         "amount" => Value::number(p.1),
///         _ => Value::Null,
///     }
/// }
///
/// // two payments in January 1970, one in February
/// let payments = vec![(0, 10.0), (86_400, 30.0), (2_678_400, 5.0)];
/// let buckets = monthly_average(&payments, "paid_at", "amount", accessor);
///
/// assert_eq!(buckets.len(), 2);
/// assert_eq!((buckets[0].month, buckets[0].average()), (1, 20.0));
/// assert_eq!((buckets[1].month, buckets[1].average()), (2, 5.0));
/// ```
pub fn monthly_average<'a, T, I, F>(
    records: I,
    date_field: &str,
    value_field: &str,
    accessor: F,
) -> Vec<MonthlyBucket>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
{
    let mut months: BTreeMap<(i32, u32), (usize, f64)> = BTreeMap::new();

    for record in records {
        let Some(date) = accessor(record, date_field)
            .as_date()
            .and_then(|ts| ts.to_datetime())
        else {
            continue;
        };
        let Some(value) = accessor(record, value_field).as_number().map(|n| n.to_f64()) else {
            continue;
        };
        if value.is_nan() {
            continue;
        }

        let entry = months.entry((date.year(), date.month())).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += value;
    }

    months
        .into_iter()
        .map(|((year, month), (count, total))| MonthlyBucket {
            year,
            month,
            count,
            total,
        })
        .collect()
}

/// Counts records per distinct value of `field`, in first-seen order.
///
/// Values are keyed by their display text; records missing the field are
/// not counted.
pub fn count_by<'a, T, I, F>(records: I, field: &str, accessor: F) -> Vec<(String, usize)>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
{
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for record in records {
        if let Some(text) = accessor(record, field).display_text() {
            *counts.entry(text.into_owned()).or_insert(0) += 1;
        }
    }
    counts.into_iter().collect()
}

//! Sorting of matched records.
//!
//! Provides [`Dir`] and [`SortSpec`] plus the value comparison rules:
//! numbers numerically, text case-insensitively by code point, dates
//! chronologically, `false < true`. Nulls always sort last, whatever the
//! direction.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// The opposite direction.
    pub fn flip(self) -> Dir {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The active sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub dir: Dir,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        SortSpec {
            field: field.into(),
            dir,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        SortSpec::new(field, Dir::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        SortSpec::new(field, Dir::Desc)
    }

    /// Column-header click: the same column flips direction, another
    /// column starts ascending.
    pub fn toggled(current: Option<&SortSpec>, field: &str) -> SortSpec {
        match current {
            Some(spec) if spec.field == field => SortSpec::new(field, spec.dir.flip()),
            _ => SortSpec::asc(field),
        }
    }

    /// Compares two field values under this spec. Total: never fails.
    pub fn compare(&self, a: &Value<'_>, b: &Value<'_>) -> Ordering {
        match (a.is_null(), b.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.dir.apply(total_cmp(a, b)),
        }
    }
}

/// Compares two values of the same kind.
///
/// Returns `None` if the kinds differ or a NaN is involved. Nulls compare
/// greater than any other value.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
    match (a, b) {
        (Value::Text(a), Value::Text(b)) => Some(cmp_text_folded(a, b)),
        (Value::Number(a), Value::Number(b)) => a.compare(*b),
        (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),

        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Null, _) => Some(Ordering::Greater),
        (_, Value::Null) => Some(Ordering::Less),

        _ => None,
    }
}

/// Case-insensitive, locale-independent comparison by lower-cased code point.
fn cmp_text_folded(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Total order used for sorting.
///
/// Same-kind values use [`compare_values`]; NaNs fall back to
/// [`f64::total_cmp`]; different kinds group by kind rank so a column with
/// mixed content still sorts consistently.
fn total_cmp(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    if let Some(ordering) = compare_values(a, b) {
        return ordering;
    }
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.to_f64().total_cmp(&y.to_f64()),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(value: &Value<'_>) -> u8 {
    match value {
        Value::Number(_) => 0,
        Value::Date(_) => 1,
        Value::Text(_) => 2,
        Value::Bool(_) => 3,
        Value::Null => 4,
    }
}

/// Orders records by `sort`, stably. `None` keeps the input order.
///
/// Each record's sort key is read once.
pub fn apply_sort<'a, T, I, F>(records: I, sort: Option<&SortSpec>, accessor: F) -> Vec<&'a T>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
{
    let Some(spec) = sort else {
        return records.into_iter().collect();
    };

    let mut keyed: Vec<(Value<'a>, &'a T)> = records
        .into_iter()
        .map(|record| (accessor(record, &spec.field), record))
        .collect();

    // slice::sort_by is stable
    keyed.sort_by(|(a, _), (b, _)| spec.compare(a, b));

    keyed.into_iter().map(|(_, record)| record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Number, Timestamp};

    #[test]
    fn dir_apply() {
        assert_eq!(Dir::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Dir::Asc.apply(Ordering::Equal), Ordering::Equal);
        assert_eq!(Dir::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Dir::Desc.apply(Ordering::Greater), Ordering::Less);
        assert_eq!(Dir::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn dir_display_and_flip() {
        assert_eq!(Dir::Asc.to_string(), "asc");
        assert_eq!(Dir::Desc.to_string(), "desc");
        assert_eq!(Dir::Asc.flip(), Dir::Desc);
        assert!(Dir::default().is_asc());
    }

    #[test]
    fn toggled_header_click() {
        let first = SortSpec::toggled(None, "price");
        assert_eq!(first, SortSpec::asc("price"));

        let second = SortSpec::toggled(Some(&first), "price");
        assert_eq!(second, SortSpec::desc("price"));

        let other = SortSpec::toggled(Some(&second), "title");
        assert_eq!(other, SortSpec::asc("title"));
    }

    #[test]
    fn text_is_case_insensitive() {
        assert_eq!(
            compare_values(&Value::text("apple"), &Value::text("Banana")),
            Some(Ordering::Less)
        );
        assert_eq!(
            compare_values(&Value::text("ZEBRA"), &Value::text("apple")),
            Some(Ordering::Greater)
        );
        assert_eq!(
            compare_values(&Value::text("Dell"), &Value::text("dELL")),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn numbers_and_dates() {
        assert_eq!(
            compare_values(&Value::number(10), &Value::number(9.5)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            compare_values(&Value::Date(Timestamp(1)), &Value::Date(Timestamp(2))),
            Some(Ordering::Less)
        );
        assert_eq!(
            compare_values(&Value::Bool(false), &Value::Bool(true)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn mismatch_and_nan_are_incomparable() {
        assert_eq!(compare_values(&Value::text("1"), &Value::number(1)), None);
        let nan = Value::Number(Number::F64(f64::NAN));
        assert_eq!(compare_values(&nan, &Value::number(1.0)), None);
    }

    #[test]
    fn nulls_last_in_both_directions() {
        let asc = SortSpec::asc("x");
        let desc = SortSpec::desc("x");
        let null = Value::Null;
        let one = Value::number(1);

        assert_eq!(asc.compare(&null, &one), Ordering::Greater);
        assert_eq!(desc.compare(&null, &one), Ordering::Greater);
        assert_eq!(desc.compare(&one, &null), Ordering::Less);
        assert_eq!(asc.compare(&null, &null), Ordering::Equal);
    }

    fn number_accessor<'a>(n: &'a Number, _field: &str) -> Value<'a> {
        Value::Number(*n)
    }

    #[test]
    fn apply_sort_mixed_numbers_past_f64_precision() {
        let big = 1i64 << 53;
        let numbers = vec![
            Number::I64(big + 1),
            Number::F64(big as f64),
            Number::U64(big as u64 + 2),
            Number::I64(big),
        ];
        let sorted = apply_sort(&numbers, Some(&SortSpec::asc("n")), number_accessor);
        assert_eq!(
            sorted,
            vec![&numbers[1], &numbers[3], &numbers[0], &numbers[2]]
        );
    }

    fn price_accessor<'a>(price: &'a Option<i64>, _field: &str) -> Value<'a> {
        Value::optional(price.map(Number::I64))
    }

    #[test]
    fn apply_sort_directions() {
        let prices = vec![Some(799), None, Some(49), Some(699)];

        let asc = apply_sort(&prices, Some(&SortSpec::asc("price")), price_accessor);
        let asc: Vec<Option<i64>> = asc.into_iter().copied().collect();
        assert_eq!(asc, vec![Some(49), Some(699), Some(799), None]);

        let desc = apply_sort(&prices, Some(&SortSpec::desc("price")), price_accessor);
        let desc: Vec<Option<i64>> = desc.into_iter().copied().collect();
        assert_eq!(desc, vec![Some(799), Some(699), Some(49), None]);
    }

    #[test]
    fn apply_sort_without_spec_keeps_order() {
        let prices = vec![Some(3), Some(1), Some(2)];
        let out = apply_sort(&prices, None, price_accessor);
        assert!(out.iter().zip(prices.iter()).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn mixed_kinds_group_by_kind() {
        fn accessor<'a>(v: &'a (u8, &'static str), _field: &str) -> Value<'a> {
            match v.0 {
                0 => Value::number(v.1.len()),
                _ => Value::text(v.1),
            }
        }
        let items = vec![(1, "b"), (0, "xxx"), (1, "a"), (0, "x")];
        let sorted = apply_sort(&items, Some(&SortSpec::asc("v")), accessor);
        let names: Vec<&str> = sorted.iter().map(|v| v.1).collect();
        assert_eq!(names, vec!["x", "xxx", "a", "b"]);
    }
}

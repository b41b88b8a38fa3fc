//! Runtime value types for field comparison.
//!
//! The [`Value`] enum is what a field accessor returns for one field of one
//! record: text, a number, a date, a boolean, or [`Value::Null`] when the
//! field is missing or unknown.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

/// Runtime value of a record field.
///
/// Text is a [`Cow`] so accessors can either borrow straight from the record
/// or project a computed value (a joined name, a formatted code) without the
/// engine caring which.
///
/// # Example
///
/// ```
/// use tabview::{Value, Number};
///
/// struct Course {
///     title: String,
///     lessons: Vec<u32>,
/// }
///
/// fn accessor<'a>(course: &'a Course, field: &str) -> Value<'a> {
///     match field {
///         "title" => Value::text(&course.title),
///         // computed: total duration of all lessons
///         "duration" => Value::Number(Number::from(course.lessons.iter().sum::<u32>())),
///         _ => Value::Null,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// Text value, borrowed or owned.
    Text(Cow<'a, str>),
    /// Numeric value.
    Number(Number),
    /// Date value (milliseconds since Unix epoch).
    Date(Timestamp),
    /// Boolean value.
    Bool(bool),
    /// Field not present, null, or unknown.
    Null,
}

impl<'a> Value<'a> {
    /// Borrowed text value.
    pub fn text(s: &'a str) -> Self {
        Value::Text(Cow::Borrowed(s))
    }

    /// Owned text value, for computed projections.
    pub fn owned_text(s: impl Into<String>) -> Self {
        Value::Text(Cow::Owned(s.into()))
    }

    /// Numeric value from any primitive number.
    pub fn number(n: impl Into<Number>) -> Self {
        Value::Number(n.into())
    }

    /// Wraps an optional value, mapping `None` to [`Value::Null`].
    pub fn optional<V: Into<Value<'a>>>(v: Option<V>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_date(&self) -> bool {
        matches!(self, Value::Date(_))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Extracts the text, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the date, if present.
    pub fn as_date(&self) -> Option<Timestamp> {
        match self {
            Value::Date(t) => Some(*t),
            _ => None,
        }
    }

    /// Extracts the boolean, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Default string representation used by free-text matching.
    ///
    /// Returns `None` for [`Value::Null`]: a missing field never contains
    /// any text, not even the empty string.
    pub fn display_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Text(s) => Some(Cow::Borrowed(s.as_ref())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Date(t) => Some(Cow::Owned(t.to_string())),
            Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Value::Null => None,
        }
    }

    /// Case-insensitive substring test against [`Value::display_text`].
    ///
    /// `needle` must already be lower-cased.
    pub(crate) fn contains_folded(&self, needle: &str) -> bool {
        self.display_text()
            .map(|text| text.to_lowercase().contains(needle))
            .unwrap_or(false)
    }

    /// Name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Number(_) => "number",
            Value::Date(_) => "date",
            Value::Bool(_) => "bool",
            Value::Null => "null",
        }
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::text(s)
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(s: &'a String) -> Self {
        Value::text(s)
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::Text(Cow::Owned(s))
    }
}

impl From<Number> for Value<'_> {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<Timestamp> for Value<'_> {
    fn from(t: Timestamp) -> Self {
        Value::Date(t)
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Numeric value supporting all common numeric types.
///
/// Numbers keep their original flavor to preserve precision:
/// - `I64` for signed integers
/// - `U64` for unsigned integers
/// - `F64` for floating point
///
/// Comparisons between different flavors convert to a common type.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Number {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl Number {
    /// Converts the number to f64.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    ///
    /// Returns `None` only when a NaN is involved.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            // A negative signed value is below every unsigned one
            (Number::I64(a), Number::U64(b)) => Some(compare_signed_unsigned(a, b)),
            (Number::U64(a), Number::I64(b)) => Some(compare_signed_unsigned(b, a).reverse()),
            (Number::I64(a), Number::F64(b)) => compare_integer_float(a.into(), b),
            (Number::U64(a), Number::F64(b)) => compare_integer_float(a.into(), b),
            (Number::F64(a), Number::I64(b)) => compare_integer_float(b.into(), a).map(Ordering::reverse),
            (Number::F64(a), Number::U64(b)) => compare_integer_float(b.into(), a).map(Ordering::reverse),
        }
    }

    /// Numeric equality across flavors (`I64(5) == F64(5.0)`).
    pub fn same_as(self, other: Number) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

/// Exact comparison of an integer with a float; casting the integer to
/// `f64` would round above 2^53.
fn compare_integer_float(a: i128, b: f64) -> Option<Ordering> {
    if b.is_nan() {
        return None;
    }
    // No i64 or u64 reaches past these
    if b >= 18_446_744_073_709_551_616.0 {
        return Some(Ordering::Less);
    }
    if b < -9_223_372_036_854_775_808.0 {
        return Some(Ordering::Greater);
    }
    let whole = b.trunc();
    match a.cmp(&(whole as i128)) {
        Ordering::Equal => whole.partial_cmp(&b),
        ordering => Some(ordering),
    }
}

fn compare_signed_unsigned(a: i64, b: u64) -> Ordering {
    if a < 0 {
        Ordering::Less
    } else {
        (a as u64).cmp(&b)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{}", n),
            Number::U64(n) => write!(f, "{}", n),
            Number::F64(n) => write!(f, "{}", n),
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($src:ty),*) => {
        $(
            impl From<$src> for Number {
                fn from(n: $src) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )*
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

/// Date value represented as milliseconds since the Unix epoch.
///
/// Timezone-agnostic, totally ordered. Convert from your datetime type of
/// choice through [`crate::IntoTimestamp`] or the `From` impls.
///
/// ```
/// use tabview::Timestamp;
///
/// assert!(Timestamp(1000) < Timestamp(2000));
/// assert_eq!(Timestamp::from_secs(0).to_string(), "1970-01-01T00:00:00.000Z");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    pub fn from_secs(secs: i64) -> Self {
        Timestamp(secs.saturating_mul(1000))
    }

    pub fn as_millis(self) -> i64 {
        self.0
    }

    pub fn as_secs(self) -> i64 {
        self.0.div_euclid(1000)
    }

    /// Converts to a UTC datetime. `None` if out of chrono's range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp(dt.timestamp_millis())
    }
}

impl fmt::Display for Timestamp {
    /// RFC 3339 in UTC with millisecond precision; raw millis when out of range.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => write!(f, "{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_type_checks() {
        assert!(Value::text("test").is_text());
        assert!(Value::Number(Number::I64(42)).is_number());
        assert!(Value::Date(Timestamp(0)).is_date());
        assert!(Value::Bool(true).is_bool());
        assert!(Value::Null.is_null());
    }

    #[test]
    fn value_extractors() {
        assert_eq!(Value::text("hello").as_str(), Some("hello"));
        assert_eq!(Value::owned_text("hi").as_str(), Some("hi"));
        assert_eq!(
            Value::Number(Number::I64(42)).as_number(),
            Some(Number::I64(42))
        );
        assert_eq!(
            Value::Date(Timestamp(1000)).as_date(),
            Some(Timestamp(1000))
        );
        assert_eq!(Value::Bool(true).as_bool(), Some(true));

        assert_eq!(Value::text("test").as_number(), None);
        assert_eq!(Value::Number(Number::I64(1)).as_str(), None);
    }

    #[test]
    fn optional_maps_none_to_null() {
        assert_eq!(Value::optional::<bool>(None), Value::Null);
        assert_eq!(Value::optional(Some(true)), Value::Bool(true));
    }

    #[test]
    fn display_text_per_kind() {
        assert_eq!(Value::text("Dell").display_text().unwrap(), "Dell");
        assert_eq!(Value::number(799).display_text().unwrap(), "799");
        assert_eq!(Value::number(49.5).display_text().unwrap(), "49.5");
        assert_eq!(Value::number(49.0).display_text().unwrap(), "49");
        assert_eq!(Value::Bool(false).display_text().unwrap(), "false");
        assert_eq!(
            Value::Date(Timestamp::from_secs(86_400)).display_text().unwrap(),
            "1970-01-02T00:00:00.000Z"
        );
        assert!(Value::Null.display_text().is_none());
    }

    #[test]
    fn contains_folded_is_case_insensitive() {
        assert!(Value::text("Dell Inspiron").contains_folded("dell"));
        assert!(Value::number(2024).contains_folded("02"));
        assert!(!Value::Null.contains_folded(""));
    }

    #[test]
    fn number_comparisons_same_type() {
        assert_eq!(
            Number::I64(5).compare(Number::I64(10)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::U64(5).compare(Number::U64(10)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::F64(10.0).compare(Number::F64(5.0)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn number_comparisons_exact_past_f64_precision() {
        let big = 1i64 << 53;
        let a = Number::I64(big + 1);
        let b = Number::F64(big as f64);
        let c = Number::I64(big);

        assert_eq!(a.compare(b), Some(Ordering::Greater));
        assert_eq!(b.compare(a), Some(Ordering::Less));
        assert_eq!(b.compare(c), Some(Ordering::Equal));
        assert_eq!(a.compare(c), Some(Ordering::Greater));

        assert_eq!(
            Number::U64(u64::MAX).compare(Number::F64(u64::MAX as f64)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::I64(i64::MIN).compare(Number::F64(f64::NEG_INFINITY)),
            Some(Ordering::Greater)
        );
        assert_eq!(Number::I64(-3).compare(Number::F64(-2.5)), Some(Ordering::Less));
        assert_eq!(Number::F64(2.5).compare(Number::U64(2)), Some(Ordering::Greater));
        assert_eq!(Number::I64(0).compare(Number::F64(-0.0)), Some(Ordering::Equal));
        assert_eq!(Number::I64(1).compare(Number::F64(f64::NAN)), None);
    }

    #[test]
    fn number_comparisons_mixed_types() {
        assert_eq!(
            Number::I64(5).compare(Number::U64(10)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::I64(-1).compare(Number::U64(u64::MAX)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::U64(3).compare(Number::I64(-3)),
            Some(Ordering::Greater)
        );
        assert!(Number::I64(5).same_as(Number::F64(5.0)));
        assert_eq!(
            Number::U64(10).compare(Number::F64(5.5)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn number_nan_comparison() {
        assert_eq!(Number::F64(f64::NAN).compare(Number::F64(1.0)), None);
        assert!(!Number::F64(f64::NAN).same_as(Number::F64(f64::NAN)));
    }

    #[test]
    fn number_conversions() {
        assert_eq!(Number::from(42i32), Number::I64(42));
        assert_eq!(Number::from(42u32), Number::U64(42));
        assert_eq!(Number::from(42usize), Number::U64(42));
        assert_eq!(Number::from(42.5f64), Number::F64(42.5));
    }

    #[test]
    fn timestamp_conversions() {
        assert_eq!(Timestamp::from_secs(1).as_millis(), 1000);
        assert_eq!(Timestamp::from_millis(5000).as_secs(), 5);
        assert_eq!(Timestamp(-1).as_secs(), -1);

        let dt = DateTime::from_timestamp(1_706_500_000, 0).unwrap();
        assert_eq!(Timestamp::from(dt), Timestamp(1_706_500_000_000));
    }
}

//! Per-field filter predicates.
//!
//! A [`FilterSpec`] constrains one field of a record. Several specs combine
//! with AND; the allowed values of a single [`FilterKind::OneOf`] combine
//! with OR.
//!
//! A filter that carries no constraint (empty allowed set, unset range,
//! blank text) is *vacuous* and passes every record, including records that
//! lack the field entirely. This is how a cleared "All categories" chip is
//! represented. Any other filter on a missing or unknown field fails.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpecError};
use crate::ordering::compare_values;
use crate::value::{Number, Timestamp, Value};

/// Owned operand stored in a filter.
///
/// Unlike [`Value`], which borrows from the record, a `Scalar` owns its data
/// so it can live in a spec and be serialized with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scalar {
    Text(String),
    Number(Number),
    Date(Timestamp),
    Bool(bool),
}

impl Scalar {
    /// Borrowed [`Value`] view of this scalar.
    pub fn as_value(&self) -> Value<'_> {
        match self {
            Scalar::Text(s) => Value::text(s),
            Scalar::Number(n) => Value::Number(*n),
            Scalar::Date(t) => Value::Date(*t),
            Scalar::Bool(b) => Value::Bool(*b),
        }
    }

    /// Exact match against a field value. Numbers compare across flavors.
    pub fn matches(&self, value: &Value<'_>) -> bool {
        match (self, value) {
            (Scalar::Text(s), Value::Text(v)) => s.as_str() == &**v,
            (Scalar::Number(n), Value::Number(v)) => n.same_as(*v),
            (Scalar::Date(t), Value::Date(v)) => t == v,
            (Scalar::Bool(b), Value::Bool(v)) => b == v,
            _ => false,
        }
    }

    pub fn kind(&self) -> &'static str {
        self.as_value().kind()
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<Number> for Scalar {
    fn from(n: Number) -> Self {
        Scalar::Number(n)
    }
}

impl From<Timestamp> for Scalar {
    fn from(t: Timestamp) -> Self {
        Scalar::Date(t)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

macro_rules! scalar_from_number {
    ($($src:ty),*) => {
        $(
            impl From<$src> for Scalar {
                fn from(n: $src) -> Self {
                    Scalar::Number(Number::from(n))
                }
            }
        )*
    };
}

scalar_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// The predicate a filter applies to its field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Field equals any of the allowed values. Empty set = no constraint.
    OneOf(Vec<Scalar>),
    /// Field lies in the inclusive range. Both bounds unset = no constraint.
    Range {
        #[serde(default)]
        min: Option<Scalar>,
        #[serde(default)]
        max: Option<Scalar>,
    },
    /// Field's text contains this, ignoring case. Blank = no constraint.
    Contains(String),
    /// Boolean field equals this flag.
    Flag(bool),
}

/// A constraint on one named field.
///
/// # Example
///
/// ```
/// use tabview::{FilterSpec, Value, Number};
///
/// let laptops = FilterSpec::one_of("category", ["laptops"]);
/// let affordable = FilterSpec::between("price", 0, 750);
///
/// assert!(laptops.matches(&Value::text("laptops")));
/// assert!(!affordable.matches(&Value::Number(Number::I64(799))));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub field: String,
    pub kind: FilterKind,
}

impl FilterSpec {
    pub fn new(field: impl Into<String>, kind: FilterKind) -> Self {
        FilterSpec {
            field: field.into(),
            kind,
        }
    }

    /// Exact match against any of `allowed`.
    pub fn one_of<I, S>(field: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Scalar>,
    {
        let allowed = allowed.into_iter().map(Into::into).collect();
        FilterSpec::new(field, FilterKind::OneOf(allowed))
    }

    /// Single-select chip or dropdown value.
    ///
    /// An empty selection or the literal `"all"` (any case) both become an
    /// empty allowed set, the engine's only "no constraint" sentinel.
    pub fn choice(field: impl Into<String>, choice: &str) -> Self {
        let choice = choice.trim();
        if choice.is_empty() || choice.eq_ignore_ascii_case("all") {
            FilterSpec::new(field, FilterKind::OneOf(Vec::new()))
        } else {
            FilterSpec::one_of(field, [choice])
        }
    }

    /// Inclusive range with optional bounds.
    pub fn range(field: impl Into<String>, min: Option<Scalar>, max: Option<Scalar>) -> Self {
        FilterSpec::new(field, FilterKind::Range { min, max })
    }

    /// Inclusive range with both bounds set.
    pub fn between(field: impl Into<String>, min: impl Into<Scalar>, max: impl Into<Scalar>) -> Self {
        FilterSpec::range(field, Some(min.into()), Some(max.into()))
    }

    pub fn at_least(field: impl Into<String>, min: impl Into<Scalar>) -> Self {
        FilterSpec::range(field, Some(min.into()), None)
    }

    pub fn at_most(field: impl Into<String>, max: impl Into<Scalar>) -> Self {
        FilterSpec::range(field, None, Some(max.into()))
    }

    /// Case-insensitive substring match.
    pub fn contains(field: impl Into<String>, text: impl Into<String>) -> Self {
        FilterSpec::new(field, FilterKind::Contains(text.into()))
    }

    pub fn flag(field: impl Into<String>, flag: bool) -> Self {
        FilterSpec::new(field, FilterKind::Flag(flag))
    }

    /// Returns `true` if this filter constrains nothing.
    pub fn is_vacuous(&self) -> bool {
        match &self.kind {
            FilterKind::OneOf(allowed) => allowed.is_empty(),
            FilterKind::Range { min, max } => min.is_none() && max.is_none(),
            FilterKind::Contains(text) => text.trim().is_empty(),
            FilterKind::Flag(_) => false,
        }
    }

    /// Evaluates this filter against the field value of one record.
    pub fn matches(&self, value: &Value<'_>) -> bool {
        if self.is_vacuous() {
            return true;
        }
        if value.is_null() {
            return false;
        }
        match &self.kind {
            FilterKind::OneOf(allowed) => allowed.iter().any(|s| s.matches(value)),
            FilterKind::Range { min, max } => {
                let above_min = min
                    .as_ref()
                    .map_or(true, |m| bound_holds(value, m, Ordering::Less));
                let below_max = max
                    .as_ref()
                    .map_or(true, |m| bound_holds(value, m, Ordering::Greater));
                above_min && below_max
            }
            FilterKind::Contains(text) => value.contains_folded(&text.trim().to_lowercase()),
            FilterKind::Flag(flag) => value.as_bool() == Some(*flag),
        }
    }

    /// Evaluates this filter against a record through `accessor`.
    pub fn matches_record<T, F>(&self, record: &T, accessor: &F) -> bool
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        // Vacuous filters pass before the field is even looked up
        self.is_vacuous() || self.matches(&accessor(record, &self.field))
    }

    /// Checks the caller contract: range bounds are numbers or dates of one
    /// kind, with `min <= max`.
    pub fn validate(&self) -> Result<()> {
        let FilterKind::Range { min, max } = &self.kind else {
            return Ok(());
        };
        for bound in [min, max].into_iter().flatten() {
            if !matches!(bound, Scalar::Number(_) | Scalar::Date(_)) {
                return Err(SpecError::UnorderedRangeBound {
                    field: self.field.clone(),
                    kind: bound.kind(),
                });
            }
        }
        if let (Some(min), Some(max)) = (min, max) {
            if std::mem::discriminant(min) != std::mem::discriminant(max) {
                return Err(SpecError::MixedRangeBounds {
                    field: self.field.clone(),
                    min: min.kind(),
                    max: max.kind(),
                });
            }
            if compare_values(&min.as_value(), &max.as_value()) == Some(Ordering::Greater) {
                return Err(SpecError::InvertedRange {
                    field: self.field.clone(),
                });
            }
        }
        Ok(())
    }
}

/// `value` is not on the `outside` side of `bound`. Incomparable kinds fail.
fn bound_holds(value: &Value<'_>, bound: &Scalar, outside: Ordering) -> bool {
    match compare_values(value, &bound.as_value()) {
        Some(ordering) => ordering != outside,
        None => false,
    }
}

/// Keeps the records that satisfy every filter, in input order.
///
/// # Example
///
/// ```
/// use tabview::{apply_filters, FilterSpec, Value};
///
/// fn accessor<'a>(category: &'a String, _field: &str) -> Value<'a> {
///     Value::text(category)
/// }
///
/// let categories: Vec<String> = vec!["laptops".into(), "accessories".into(), "laptops".into()];
/// let filters = [FilterSpec::one_of("category", ["laptops"])];
///
/// let matched = apply_filters(&categories, &filters, accessor);
/// assert_eq!(matched.len(), 2);
/// ```
pub fn apply_filters<'a, T, I, F>(records: I, filters: &[FilterSpec], accessor: F) -> Vec<&'a T>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
{
    let active: Vec<&FilterSpec> = filters.iter().filter(|f| !f.is_vacuous()).collect();
    records
        .into_iter()
        .filter(|record| active.iter().all(|f| f.matches_record(*record, &accessor)))
        .collect()
}

//! The [`Record`] trait and timestamp conversion helper.
//!
//! Engine functions take any accessor closure; implementing [`Record`] (by
//! hand or with `#[derive(Record)]` from `tabview-macros`) gives a type a
//! ready-made one.

use crate::value::{Timestamp, Value};

/// A type whose fields can be read by name.
///
/// # Manual Implementation
///
/// ```
/// use tabview::{Record, Value, Number};
///
/// struct Teacher {
///     name: String,
///     rating: f32,
/// }
///
/// impl Record for Teacher {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "name" => Value::text(&self.name),
///             "rating" => Value::number(self.rating),
///             _ => Value::Null,
///         }
///     }
/// }
///
/// let t = Teacher { name: "Ada".into(), rating: 4.5 };
/// assert_eq!(Teacher::accessor(&t, "name"), Value::text("Ada"));
/// assert_eq!(t.field_value("email"), Value::Null);
/// ```
///
/// # Derive Usage
///
/// ```ignore
/// use tabview_macros::Record;
///
/// #[derive(Record)]
/// struct Course {
///     #[field(Text)]
///     title: String,
///     #[field(Number)]
///     price: u32,
///     #[field(Bool, rename = "published")]
///     is_published: bool,
/// }
///
/// assert_eq!(Course::PUBLISHED, "published");
/// ```
pub trait Record {
    /// Returns the value of `field`, or [`Value::Null`] for unknown fields.
    fn field_value(&self, field: &str) -> Value<'_>;

    /// Function-pointer form of [`Record::field_value`], usable wherever
    /// the engine expects an accessor.
    fn accessor<'a>(item: &'a Self, field: &str) -> Value<'a>
    where
        Self: Sized,
    {
        item.field_value(field)
    }
}

/// Conversion of datetime-like field types into [`Timestamp`].
///
/// Used by `#[field(Date)]` in the derive macro.
///
/// ```
/// use tabview::{IntoTimestamp, Timestamp};
///
/// struct EnrolledAt(i64);
///
/// impl IntoTimestamp for EnrolledAt {
///     fn to_timestamp(&self) -> Timestamp {
///         Timestamp::from_secs(self.0)
///     }
/// }
/// ```
pub trait IntoTimestamp {
    fn to_timestamp(&self) -> Timestamp;
}

impl IntoTimestamp for Timestamp {
    fn to_timestamp(&self) -> Timestamp {
        *self
    }
}

/// Raw integers are read as milliseconds since the epoch.
impl IntoTimestamp for i64 {
    fn to_timestamp(&self) -> Timestamp {
        Timestamp::from_millis(*self)
    }
}

impl IntoTimestamp for u64 {
    fn to_timestamp(&self) -> Timestamp {
        Timestamp::from_millis(i64::try_from(*self).unwrap_or(i64::MAX))
    }
}

impl<Tz: chrono::TimeZone> IntoTimestamp for chrono::DateTime<Tz> {
    fn to_timestamp(&self) -> Timestamp {
        Timestamp::from_millis(self.timestamp_millis())
    }
}

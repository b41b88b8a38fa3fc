//! Proc macros for Tabview.
//!
//! # Available Macros
//!
//! - [`Record`] - Generate a field accessor and field-name constants
//!
//! The generated code refers to `::tabview`, so the crate using the derive
//! must depend on `tabview` under that name.

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `tabview::Record` for structs with named fields.
///
/// Only fields carrying a kind are exposed; everything else reads as
/// `Value::Null`, like any unknown field.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `Text` | Any `AsRef<str>` field (aliases: `String`) |
/// | `Number` | Any `Copy` primitive number |
/// | `Date` | Any `IntoTimestamp` field (aliases: `Timestamp`) |
/// | `Bool` | `bool` field |
/// | `optional` | The field is an `Option<_>` of the kind; `None` is null |
/// | `skip` | Exclude this field |
/// | `rename = "..."` | Use a custom name in specs |
///
/// # Generated Code
///
/// 1. Field name constants (e.g., `Course::TITLE`, `Course::PRICE`)
/// 2. Implementation of `Record::field_value()`
///
/// # Example
///
/// ```ignore
/// use tabview::{compute_view, FilterSpec, Record, ViewSpec};
/// use tabview_macros::Record;
///
/// #[derive(Record)]
/// struct Course {
///     #[field(Text)]
///     title: String,
///
///     #[field(Number)]
///     price: u32,
///
///     #[field(Number, optional)]
///     rating: Option<f32>,
///
///     #[field(Bool, rename = "published")]
///     is_published: bool,
///
///     #[field(skip)]
///     draft_notes: String,
/// }
///
/// let spec = ViewSpec {
///     filters: vec![FilterSpec::flag(Course::PUBLISHED, true)],
///     ..ViewSpec::default()
/// };
/// let view = compute_view(&courses, &spec, Course::accessor);
/// ```
#[proc_macro_derive(Record, attributes(field))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

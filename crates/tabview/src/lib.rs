//! Tabview - client-side tabular view engine.
//!
//! Tabview turns an in-memory collection plus a declarative view spec into
//! the page a table screen shows. The same engine serves any record shape
//! (courses, teachers, users, payments) because it only reads records
//! through a field accessor. It supports:
//!
//! - Per-field filters: exact match against a set, inclusive ranges,
//!   case-insensitive substring, boolean flags
//! - Free-text search across several fields
//! - Stable single-column sorting with nulls last
//! - Pagination with out-of-range page clamping
//! - Row selection that survives filtering and paging
//! - Dashboard metrics over the same records
//!
//! # Quick Start
//!
//! ```rust
//! use tabview::{compute_view, FilterSpec, PageSpec, SortSpec, Value, Number, ViewSpec};
//!
//! struct Product {
//!     id: u32,
//!     category: String,
//!     price: u32,
//! }
//!
//! fn accessor<'a>(p: &'a Product, field: &str) -> Value<'a> {
//!     match field {
//!         "category" => Value::text(&p.category),
//!         "price" => Value::Number(Number::from(p.price)),
//!         _ => Value::Null,
//!     }
//! }
//!
//! let products = vec![
//!     Product { id: 1, category: "laptops".into(), price: 799 },
//!     Product { id: 2, category: "accessories".into(), price: 49 },
//!     Product { id: 3, category: "laptops".into(), price: 699 },
//! ];
//!
//! let spec = ViewSpec {
//!     filters: vec![FilterSpec::one_of("category", ["laptops"])],
//!     sort: Some(SortSpec::asc("price")),
//!     page: PageSpec::new(0, 1),
//!     ..ViewSpec::default()
//! };
//!
//! let view = compute_view(&products, &spec, accessor);
//! assert_eq!(view.records[0].id, 3);
//! assert_eq!(view.total_matched, 2);
//! assert_eq!(view.total_pages, 2);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! records -> filter (AND) -> search (ANY field) -> sort (stable) -> paginate
//! ```
//!
//! Every stage is total. Vacuous filters pass everything, filters on
//! unknown fields match nothing, out-of-range pages clamp to the last page.
//! Malformed specs (an inverted range, a zero page size) are the caller's
//! to reject with [`ViewSpec::validate`].
//!
//! # Field Types
//!
//! | Kind | Sort order | Search text |
//! |------|------------|-------------|
//! | Text | case-insensitive, by code point | as is |
//! | Number | numeric | `Display` |
//! | Date | chronological | RFC 3339, UTC |
//! | Bool | `false < true` | `true` / `false` |
//! | Null | always last | never matches |

mod error;
mod filter;
mod ordering;
mod page;
mod record;
mod search;
mod selection;
mod stats;
mod value;
mod view;

pub use error::{Result, SpecError};
pub use filter::{apply_filters, FilterKind, FilterSpec, Scalar};
pub use ordering::{apply_sort, compare_values, Dir, SortSpec};
pub use page::{paginate, Page, PageSpec, DEFAULT_PAGE_SIZE};
pub use record::{IntoTimestamp, Record};
pub use search::{apply_search, SearchSpec};
pub use selection::{Selection, SelectionSummary};
pub use stats::{completion_rate, count_by, growth_percent, monthly_average, MonthlyBucket};
pub use value::{Number, Timestamp, Value};
pub use view::{compute_view, TabularViewEngine, ViewResult, ViewSnapshot, ViewSpec};

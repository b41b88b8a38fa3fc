//! Error types for spec validation and parsing.
//!
//! The engine functions themselves never fail; these errors only come out of
//! the optional validation step a host runs on user-provided specs.

use thiserror::Error;

/// Errors found while validating or parsing view specs.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Page size must be at least one.
    #[error("page size must be positive")]
    ZeroPageSize,

    /// Range filter with `min > max`.
    #[error("range filter on '{field}' has min greater than max")]
    InvertedRange { field: String },

    /// Range filter whose bounds are of different kinds.
    #[error("range filter on '{field}' mixes {min} and {max} bounds")]
    MixedRangeBounds {
        field: String,
        min: &'static str,
        max: &'static str,
    },

    /// Range bound that is not a number or a date.
    #[error("range filter on '{field}' has a {kind} bound; expected number or date")]
    UnorderedRangeBound { field: String, kind: &'static str },

    /// Malformed JSON view spec.
    #[error("invalid view spec: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for spec validation.
pub type Result<T> = std::result::Result<T, SpecError>;

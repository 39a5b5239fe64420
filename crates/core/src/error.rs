//! Error types for the concur consensus engine.
//!
//! The engine has no recoverable-error taxonomy: well-formed input always
//! produces a status. Everything here describes malformed input, and every
//! variant names the offending field.

use thiserror::Error;

/// Rejected input, identified by the path of the offending field
/// (e.g. `contributions[1].annotations[0].boundingBox.width`).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field}: expected a finite number, got {value}")]
    NonFinite { field: String, value: f64 },

    #[error("{field}: must not be negative, got {value}")]
    Negative { field: String, value: f64 },

    #[error("{field}: missing bounding box")]
    MissingBoundingBox { field: String },

    #[error("{field}: label must not be empty")]
    EmptyLabel { field: String },

    #[error("{field}: similarity threshold must lie within [0, 1], got {value}")]
    ThresholdOutOfRange { field: String, value: f64 },

    #[error("{field}: too many annotations to index ({count})")]
    TooManyAnnotations { field: String, count: usize },

    #[error("{field}: contribution belongs to image {got}, expected {expected}")]
    ImageMismatch {
        field: String,
        expected: String,
        got: String,
    },

    #[error("{field}: contribution {id} already recorded")]
    DuplicateContribution { field: String, id: String },
}

impl ValidationError {
    /// Path of the field that failed validation.
    pub fn field(&self) -> &str {
        match self {
            Self::NonFinite { field, .. }
            | Self::Negative { field, .. }
            | Self::MissingBoundingBox { field }
            | Self::EmptyLabel { field }
            | Self::ThresholdOutOfRange { field, .. }
            | Self::TooManyAnnotations { field, .. }
            | Self::ImageMismatch { field, .. }
            | Self::DuplicateContribution { field, .. } => field,
        }
    }
}

/// Convenience Result type alias for ValidationError.
pub type Result<T> = std::result::Result<T, ValidationError>;

//! Tuple descriptor error types
//!
//! Error codes:
//! - TD_INDEX_OUT_OF_RANGE
//! - TD_NO_SUCH_FIELD
//! - TD_INVALID_SCHEMA
//! - TD_INVALID_CONFIG
//!
//! Every error is a caller contract violation. Nothing is retried and no
//! operation leaves partial state behind.

use thiserror::Error;

/// Result type for descriptor operations
pub type DescResult<T> = Result<T, DescError>;

/// Tuple descriptor errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescError {
    /// Positional index outside `[0, field_count)`
    #[error("field index {index} out of range for descriptor with {field_count} fields")]
    IndexOutOfRange { index: usize, field_count: usize },

    /// Name lookup found no field
    #[error("no field named '{0}'")]
    NoSuchField(String),

    /// Construction input rejected
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// Type layout configuration rejected
    #[error("invalid type layout: {0}")]
    InvalidConfig(String),
}

impl DescError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            DescError::IndexOutOfRange { .. } => "TD_INDEX_OUT_OF_RANGE",
            DescError::NoSuchField(_) => "TD_NO_SUCH_FIELD",
            DescError::InvalidSchema(_) => "TD_INVALID_SCHEMA",
            DescError::InvalidConfig(_) => "TD_INVALID_CONFIG",
        }
    }

    pub(crate) fn index_out_of_range(index: usize, field_count: usize) -> Self {
        DescError::IndexOutOfRange { index, field_count }
    }

    pub(crate) fn no_such_field(name: impl Into<String>) -> Self {
        DescError::NoSuchField(name.into())
    }

    pub(crate) fn length_mismatch(types: usize, names: usize) -> Self {
        DescError::InvalidSchema(format!(
            "{} types but {} names; lengths must match",
            types, names
        ))
    }

    pub(crate) fn empty() -> Self {
        DescError::InvalidSchema("descriptor must contain at least one field".into())
    }
}

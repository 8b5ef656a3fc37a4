//! Domain Error Types
//!
//! Pure record-level errors that don't depend on file I/O.

use thiserror::Error;

/// Reason a single delimited line was rejected.
///
/// A rejection is an expected outcome: callers skip the line and keep going.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Line split into fewer fields than the record needs
    #[error("expected at least {expected} fields, found {found}")]
    TooFewFields { expected: usize, found: usize },

    /// A numeric field did not parse as its expected type
    #[error("field '{field}' is not a valid number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// Document type other than CC or TI
    #[error("unknown document type: {0:?}")]
    UnknownDocumentType(String),

    /// Product price below zero
    #[error("price must not be negative (got {0})")]
    NegativePrice(String),

    /// Product identifiers start at 1
    #[error("product id must be positive")]
    ZeroProductId,

    /// Line bytes are not valid UTF-8
    #[error("line is not valid UTF-8")]
    InvalidEncoding,
}

impl RecordError {
    pub fn invalid_number(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            field,
            value: value.into(),
        }
    }
}

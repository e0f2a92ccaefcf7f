//! # Error Types
//!
//! Structured error types for layout_core. The engine degrades gracefully on
//! degenerate geometry (an empty roof simply yields an empty layout), so these
//! errors only surface for contract violations and session file problems.
//!
//! ## Example
//!
//! ```rust
//! use layout_core::errors::{LayoutError, LayoutResult};
//!
//! fn validate_gap(gap_m: f64) -> LayoutResult<()> {
//!     if gap_m < 0.0 {
//!         return Err(LayoutError::InvalidInput {
//!             field: "inter_panel_gap_m".to_string(),
//!             value: gap_m.to_string(),
//!             reason: "Gap cannot be negative".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for layout_core operations
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Structured error type for engine operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum LayoutError {
    /// An input value violates the engine contract (non-positive panel size,
    /// zero wattage, zero panels per string, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl LayoutError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        LayoutError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        LayoutError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        LayoutError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            LayoutError::InvalidInput { .. } => "INVALID_INPUT",
            LayoutError::FileError { .. } => "FILE_ERROR",
            LayoutError::SerializationError { .. } => "SERIALIZATION_ERROR",
            LayoutError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

/// Reject a value that must be strictly positive and finite.
pub(crate) fn require_positive(field: &str, value: f64) -> LayoutResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(LayoutError::invalid_input(field, value.to_string(), "Must be a positive number"));
    }
    Ok(())
}

/// Reject a value that must be zero or positive and finite.
pub(crate) fn require_non_negative(field: &str, value: f64) -> LayoutResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(LayoutError::invalid_input(field, value.to_string(), "Cannot be negative"));
    }
    Ok(())
}

//! Custom error types for Trendline
//!
//! This module defines the error hierarchy for the reporting engine using
//! thiserror for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Trendline operations
#[derive(Error, Debug)]
pub enum ReportError {
    /// Malformed dates, `start > end`, or a non-positive month span
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// A query that must return exactly one row returned another shape
    #[error("Ambiguous store result for {query}: {detail}")]
    AmbiguousStoreResult { query: &'static str, detail: String },

    /// Failures raised by the underlying store driver
    #[error("Store error: {0}")]
    Store(String),

    /// Caller supplied arguments that cannot be reported on
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl ReportError {
    /// Create an ambiguous-result error for a named query shape
    pub fn ambiguous(query: &'static str, detail: impl Into<String>) -> Self {
        Self::AmbiguousStoreResult {
            query,
            detail: detail.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for subcategories
    pub fn subcategory_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Subcategory",
            identifier: identifier.into(),
        }
    }

    /// Check if this is an invalid range error
    pub fn is_invalid_range(&self) -> bool {
        matches!(self, Self::InvalidRange(_))
    }

    /// Check if this is an ambiguous store result
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::AmbiguousStoreResult { .. })
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<rusqlite::Error> for ReportError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Store(err.to_string())
    }
}

/// Result type alias for Trendline operations
pub type ReportResult<T> = Result<T, ReportError>;

//! # Edge AI Platform Error Handling
//!
//! This crate provides a unified error type for the Edge AI inventory
//! platform. It uses `thiserror` for ergonomic error definitions and keeps
//! feature-gated conversions for the libraries the platform crates lean on
//! (csv, reqwest, rust_xlsxwriter).
//!
//! ## Usage
//!
//! ```rust
//! use edgeai_error::{EdgeError, Result};
//!
//! fn operation() -> Result<String> {
//!     Err(EdgeError::network("device endpoint unreachable"))
//! }
//!
//! assert!(operation().unwrap_err().is_retriable());
//! ```

use thiserror::Error;

/// The main error type for the Edge AI inventory platform.
///
/// Covers the error categories that can occur across the ingestion,
/// normalization, and export pipeline. Implements `std::error::Error`
/// via thiserror.
#[derive(Error, Debug)]
pub enum EdgeError {
    /// Configuration-related errors (invalid config, missing fields, etc.)
    #[error("configuration error: {0}")]
    Config(String),

    /// IO errors (file operations, network IO, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors (JSON, CSV, etc.)
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Network errors (connection failures, bad upstream status, etc.)
    #[error("network error: {0}")]
    Network(String),

    /// Timeout errors (operation deadlines exceeded)
    #[error("timeout: {0}")]
    Timeout(String),

    /// Resource not found errors
    #[error("{resource_type} not found: {resource_id}")]
    NotFound {
        resource_type: String,
        resource_id: String,
    },

    /// Invalid input validation errors
    #[error("invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    /// Report encoding errors (spreadsheet, delimited text, document)
    #[error("export error: {0}")]
    Export(String),

    /// Internal errors (bugs, unexpected states, etc.)
    #[error("internal error: {0}")]
    Internal(String),

    /// Unknown/uncategorized errors
    #[error("unknown error: {0}")]
    Unknown(String),
}

/// Type alias for Results using EdgeError
pub type Result<T> = std::result::Result<T, EdgeError>;

// Conversion from serde_json::Error
impl From<serde_json::Error> for EdgeError {
    fn from(err: serde_json::Error) -> Self {
        EdgeError::Serialization(err.to_string())
    }
}

// Optional feature: CSV encoding errors
#[cfg(feature = "csv")]
impl From<csv::Error> for EdgeError {
    fn from(err: csv::Error) -> Self {
        EdgeError::Serialization(format!("CSV error: {err}"))
    }
}

// Optional feature: HTTP client errors
#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for EdgeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EdgeError::Timeout(err.to_string())
        } else if err.is_connect() {
            EdgeError::Network(format!("connection error: {err}"))
        } else {
            EdgeError::Network(err.to_string())
        }
    }
}

// Optional feature: spreadsheet writer errors
#[cfg(feature = "xlsx")]
impl From<rust_xlsxwriter::XlsxError> for EdgeError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        EdgeError::Export(format!("XLSX error: {err}"))
    }
}

impl EdgeError {
    /// Determines if this error is retriable.
    ///
    /// Retriable errors are transient failures that may succeed on retry,
    /// such as network errors or timeouts. A failed device fetch falls in
    /// this category and is surfaced to the caller with a retry affordance.
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        matches!(self, EdgeError::Network(_) | EdgeError::Timeout(_) | EdgeError::Io(_))
    }

    /// Determines if this error is a client error (4xx-equivalent).
    ///
    /// Client errors indicate that the request was invalid and should not
    /// be retried without modification.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            EdgeError::Config(_)
                | EdgeError::InvalidInput { .. }
                | EdgeError::NotFound { .. }
                | EdgeError::Serialization(_)
        )
    }

    // ==========================================
    // Convenience constructors
    // ==========================================

    /// Creates a not found error
    #[must_use]
    pub fn not_found(resource_type: impl Into<String>, resource_id: impl Into<String>) -> Self {
        EdgeError::NotFound {
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
        }
    }

    /// Creates an invalid input error
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        EdgeError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a configuration error
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        EdgeError::Config(msg.into())
    }

    /// Creates a serialization error
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        EdgeError::Serialization(msg.into())
    }

    /// Creates a network error
    #[must_use]
    pub fn network(msg: impl Into<String>) -> Self {
        EdgeError::Network(msg.into())
    }

    /// Creates a timeout error
    #[must_use]
    pub fn timeout(msg: impl Into<String>) -> Self {
        EdgeError::Timeout(msg.into())
    }

    /// Creates an export error
    #[must_use]
    pub fn export(msg: impl Into<String>) -> Self {
        EdgeError::Export(msg.into())
    }

    /// Creates an internal error
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        EdgeError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_implements_std_error() {
        let err = EdgeError::Internal("test".to_string());
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<EdgeError>();
        assert_sync::<EdgeError>();
    }

    #[test]
    fn test_result_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }
        assert!(returns_result().is_ok());
    }

    #[test]
    fn test_retriable_errors() {
        assert!(EdgeError::network("connection refused").is_retriable());
        assert!(EdgeError::timeout("deadline").is_retriable());
        assert!(!EdgeError::export("bad cell").is_retriable());
    }

    #[test]
    fn test_client_errors() {
        assert!(EdgeError::not_found("device", "device-123").is_client_error());
        assert!(EdgeError::invalid_input("sort", "unknown mode").is_client_error());
        assert!(!EdgeError::internal("bug").is_client_error());
    }

    #[test]
    fn test_json_conversion() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("not json");
        let err: EdgeError = parse.unwrap_err().into();
        assert!(matches!(err, EdgeError::Serialization(_)));
    }
}

//! Error handling for the inventory core.

pub use edgeai_error::{EdgeError, Result};

/// Extension trait for inventory-specific error construction
pub trait InventoryErrorExt {
    /// Creates an ingestion failure error. Ingestion failures are the only
    /// condition that propagates to the caller; they stay retriable.
    fn fetch_failed(reason: impl Into<String>) -> EdgeError {
        EdgeError::network(format!("device fetch failed: {}", reason.into()))
    }

    /// Creates a parse error for malformed upstream payloads
    fn parse_error(reason: impl Into<String>) -> EdgeError {
        EdgeError::serialization(format!("parse error: {}", reason.into()))
    }

    /// Creates a report encoding error
    fn export_error(reason: impl Into<String>) -> EdgeError {
        EdgeError::export(reason)
    }

    /// Creates an invalid preference blob error
    fn invalid_preferences(reason: impl Into<String>) -> EdgeError {
        EdgeError::invalid_input("preferences", reason)
    }
}

impl InventoryErrorExt for EdgeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failed_is_retriable() {
        let err = EdgeError::fetch_failed("connection refused");
        assert!(err.to_string().contains("device fetch failed"));
        assert!(err.is_retriable());
    }

    #[test]
    fn test_parse_error() {
        let err = EdgeError::parse_error("unexpected token");
        assert!(err.to_string().contains("parse error"));
        assert!(!err.is_retriable());
    }

    #[test]
    fn test_export_error() {
        let err = EdgeError::export_error("bad cell value");
        assert!(err.to_string().contains("export error"));
    }

    #[test]
    fn test_invalid_preferences() {
        let err = EdgeError::invalid_preferences("not a JSON object");
        assert!(err.to_string().contains("preferences"));
    }
}

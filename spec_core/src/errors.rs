//! # Error Types
//!
//! Structured error types for spec_core. Every variant carries enough context
//! for a caller (human or program) to see what went wrong and where.
//!
//! Two classes matter most to callers:
//!
//! - [`SpecError::Configuration`] is a user-fixable problem with the bridge
//!   description (for example a segment with no haul truck). It is registered
//!   with the status center before it is returned and is recoverable.
//! - [`SpecError::ContractViolation`] means the caller asked a question that
//!   has no answer for the given inputs (for example a generic compression
//!   coefficient at the lifting interval). These are defects in the caller.
//!
//! ## Example
//!
//! ```rust
//! use spec_core::errors::{SpecError, SpecResult};
//!
//! fn validate_fc(fc: f64) -> SpecResult<()> {
//!     if fc <= 0.0 {
//!         return Err(SpecError::invalid_input("fc", fc.to_string(), "Concrete strength must be positive"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_fc(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Result type alias for spec_core operations
pub type SpecResult<T> = Result<T, SpecError>;

/// Structured error type for rules-engine operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum SpecError {
    /// An input value is invalid (out of range, negative coefficient, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// The bridge description is incomplete. The problem has been posted to
    /// the status center under `status_item`.
    #[error("{message} See Status Center for details.")]
    Configuration {
        message: String,
        status_item: Option<Uuid>,
    },

    /// A precondition of the requested operation does not hold
    #[error("Contract violation in {operation}: {reason}")]
    ContractViolation { operation: String, reason: String },

    /// A named library entry, girder entry, or model element does not exist
    #[error("{what} not found: {name}")]
    NotFound { what: String, name: String },

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

impl SpecError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        SpecError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a Configuration error tied to a status center item
    pub fn configuration(message: impl Into<String>, status_item: Option<Uuid>) -> Self {
        SpecError::Configuration {
            message: message.into(),
            status_item,
        }
    }

    /// Create a ContractViolation error
    pub fn contract_violation(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        SpecError::ContractViolation {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(what: impl Into<String>, name: impl Into<String>) -> Self {
        SpecError::NotFound {
            what: what.into(),
            name: name.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        SpecError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Configuration problems abort the current check but the user can fix
    /// them and try again.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SpecError::Configuration { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SpecError::InvalidInput { .. } => "INVALID_INPUT",
            SpecError::Configuration { .. } => "CONFIGURATION",
            SpecError::ContractViolation { .. } => "CONTRACT_VIOLATION",
            SpecError::NotFound { .. } => "NOT_FOUND",
            SpecError::FileError { .. } => "FILE_ERROR",
            SpecError::SerializationError { .. } => "SERIALIZATION_ERROR",
            SpecError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for SpecError {
    fn from(err: serde_json::Error) -> Self {
        SpecError::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = SpecError::contract_violation("segment_compression_coefficient", "lifting interval");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: SpecError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
        assert!(json.contains("ContractViolation"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(SpecError::not_found("girder entry", "W74G").error_code(), "NOT_FOUND");
        assert_eq!(SpecError::configuration("No haul truck", None).error_code(), "CONFIGURATION");
    }

    #[test]
    fn test_only_configuration_is_recoverable() {
        assert!(SpecError::configuration("No haul truck", Some(Uuid::new_v4())).is_recoverable());
        assert!(!SpecError::contract_violation("op", "why").is_recoverable());
        assert!(!SpecError::invalid_input("fc", "-1", "negative").is_recoverable());
    }

    #[test]
    fn test_configuration_message_points_to_status_center() {
        let msg = SpecError::configuration("Segment 1 has no haul truck.", None).to_string();
        assert!(msg.contains("Status Center"));
    }
}

//! Custom error types for adhesion-cli
//!
//! This module defines the error hierarchy for the application using thiserror.
//! Entity-level validation errors live next to their models and convert into
//! [`AdhesionError`] at the service boundary.

use thiserror::Error;

use crate::models::company::{AlreadyAdhered, CompanyValidationError};
use crate::models::transfer::TransferValidationError;

/// The main error type for adhesion-cli operations
#[derive(Error, Debug)]
pub enum AdhesionError {
    /// Malformed input data; signals a caller defect and is never retried
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation not allowed in the entity's current lifecycle state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Uniqueness constraint violations raised by storage
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
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

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl AdhesionError {
    /// Create a "not found" error for companies
    pub fn company_not_found(tax_id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Company",
            identifier: tax_id.into(),
        }
    }

    /// Create a "duplicate" error for companies
    pub fn duplicate_company(tax_id: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Company",
            identifier: tax_id.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Check if this is an invalid state error
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState(_))
    }
}

impl From<std::io::Error> for AdhesionError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AdhesionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<CompanyValidationError> for AdhesionError {
    fn from(err: CompanyValidationError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

impl From<TransferValidationError> for AdhesionError {
    fn from(err: TransferValidationError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

impl From<AlreadyAdhered> for AdhesionError {
    fn from(err: AlreadyAdhered) -> Self {
        Self::InvalidState(err.to_string())
    }
}

/// Result type alias for adhesion-cli operations
pub type AdhesionResult<T> = Result<T, AdhesionError>;

//! # Error Types
//!
//! Structured error types for calc_core. Engine errors (`DivisionByZero`,
//! `UnsupportedOperation`, `ChainNotStarted`) are terminal: they are surfaced
//! to the caller unchanged and never retried. The remaining variants belong to
//! the service layer and describe bad requests.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//! use calc_core::NumericValue;
//!
//! fn reciprocal(value: NumericValue) -> CalcResult<f64> {
//!     if value.is_zero() {
//!         return Err(CalcError::DivisionByZero);
//!     }
//!     Ok(1.0 / value.as_f64())
//! }
//!
//! let err = reciprocal(NumericValue::from(0)).unwrap_err();
//! assert_eq!(err.error_code(), "DIVISION_BY_ZERO");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::operations::OperationTag;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// The divisor of a division was zero (0, 0.0 or -0.0)
    #[error("Division by zero is not allowed")]
    DivisionByZero,

    /// No operation is registered for the requested tag
    #[error("Unsupported operation: {operation}")]
    UnsupportedOperation { operation: OperationTag },

    /// A chain was used before `start` gave it a value
    #[error("Chain has not been started: call start() before apply() or result()")]
    ChainNotStarted,

    /// A request field is invalid
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A request could not be parsed
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an UnsupportedOperation error
    pub fn unsupported_operation(operation: OperationTag) -> Self {
        CalcError::UnsupportedOperation { operation }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        CalcError::Internal {
            message: message.into(),
        }
    }

    /// Whether the error was caused by the caller's input rather than by the engine itself.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, CalcError::Internal { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::DivisionByZero => "DIVISION_BY_ZERO",
            CalcError::UnsupportedOperation { .. } => "UNSUPPORTED_OPERATION",
            CalcError::ChainNotStarted => "CHAIN_NOT_STARTED",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Client-facing status code carried in the response envelope.
    pub fn status_code(&self) -> &'static str {
        if self.is_client_error() {
            "400"
        } else {
            "500"
        }
    }
}

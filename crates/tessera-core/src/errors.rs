//! Unified error handling for the Tessera registries
//!
//! Every registry operation reports failure synchronously through
//! [`TesseraError`]. Failures are operation-local: an operation validates
//! its inputs and authorization fully before touching state, so a returned
//! error always means nothing was written.

use thiserror::Error;

/// Unified error type shared by all Tessera crates
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TesseraError {
    /// Invalid input or configuration
    #[error("Invalid: {message}")]
    Invalid {
        /// Error message describing the invalid input
        message: String,
    },

    /// Resource not found
    #[error("Not found: {message}")]
    NotFound {
        /// Error message describing what was not found
        message: String,
    },

    /// Caller lacks owner, approved, or delegate standing
    #[error("Permission denied: {message}")]
    PermissionDenied {
        /// Error message describing the missing standing
        message: String,
    },

    /// Consumption amount exceeds the effective (expiry-aware) allowance
    #[error("Allowance exceeded: requested {requested}, effective {available}")]
    AllowanceExceeded {
        /// Amount the consumer attempted to spend
        requested: u128,
        /// Effective allowance at the time of the attempt
        available: u128,
    },

    /// Decrease amount exceeds the effective stored amount
    #[error("Arithmetic underflow: subtracting {requested} from effective {available}")]
    Underflow {
        /// Amount the caller attempted to subtract
        requested: u128,
        /// Effective amount the subtraction was checked against
        available: u128,
    },
}

impl TesseraError {
    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }
}

/// Standard Result type for Tessera operations
pub type TesseraResult<T> = std::result::Result<T, TesseraError>;

//! Expiring Allowance Registry
//!
//! Extends the classic per-(owner, spender) spending-authorization table
//! with an absolute expiration timestamp. An allowance whose expiry has
//! passed behaves exactly like a zero allowance without anyone submitting a
//! revoke: expiry is evaluated lazily, by comparison against the
//! caller-supplied current time, inside every read and consume operation.
//! There is no background sweep and no timer, so every operation is O(1).
//!
//! The registry trusts its `owner` arguments; caller-identity enforcement
//! belongs to the surrounding ownership layer.

#![forbid(unsafe_code)]

/// Registry configuration
pub mod config;

/// Allowance notifications
pub mod events;

/// The allowance table and its operations
pub mod registry;

pub use config::AllowanceConfig;
pub use events::AllowanceExpirationUpdated;
pub use registry::{effective_amount, AllowanceEntry, ExpiringAllowanceRegistry};

pub use tessera_core::{TesseraError, TesseraResult};

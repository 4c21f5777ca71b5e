//! Tessera Core - shared foundation for the registry crates
//!
//! This crate provides the identifier newtypes, the second-granularity time
//! primitives, and the unified error type used by both the expiring
//! allowance registry and the privilege registry. It contains no registry
//! logic of its own: time is always supplied by the caller, and nothing in
//! here performs I/O.

#![forbid(unsafe_code)]

/// Unified error handling
pub mod errors;

/// Principal, token, and privilege-slot identifiers
pub mod identifiers;

/// Timestamps and durations with lazy-expiry comparison semantics
pub mod time;

pub use errors::{TesseraError, TesseraResult};
pub use identifiers::{PrincipalId, PrivilegeId, TokenId};
pub use time::{Duration, Timestamp};

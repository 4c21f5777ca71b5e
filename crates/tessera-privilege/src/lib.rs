//! Privilege Registry
//!
//! Extends a single-owner item registry with a bounded set of auxiliary
//! privilege slots per item. Each slot is independently assignable to a
//! holder with its own expiry; once the expiry passes, control of the slot
//! reverts to the item's plain owner without any revocation transaction.
//! Holders may delegate standing over all their privileges to other
//! principals, and privileges marked cloneable can be duplicated to third
//! parties without displacing the original holder.
//!
//! The base ownership registry (owner lookup, approval checks) is an
//! external collaborator reached through the [`OwnershipView`] seam; time
//! is always supplied by the caller.

#![forbid(unsafe_code)]

/// Registry configuration
pub mod config;

/// Holder-to-delegate standing grants
pub mod delegation;

/// Privilege notifications
pub mod events;

/// Seam to the external base ownership registry
pub mod ownership;

/// The privilege table and its operations
pub mod registry;

pub use config::PrivilegeConfig;
pub use delegation::DelegationTable;
pub use events::PrivilegeEvent;
pub use ownership::{InMemoryOwnership, OwnershipView};
pub use registry::{PrivilegeRegistry, PrivilegeSlot, MAX_PRIVILEGE_TERM};

pub use tessera_core::{TesseraError, TesseraResult};

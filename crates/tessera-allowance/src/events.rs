//! Allowance notifications
//!
//! Events are returned from successful mutations rather than pushed through
//! a channel; delivery to the host's notification surface is the embedder's
//! job. A failed operation returns an error and no event, which keeps event
//! emission inside the same all-or-nothing boundary as the state change.

use serde::{Deserialize, Serialize};
use tessera_core::{PrincipalId, Timestamp};

/// Emitted whenever an allowance row is written with a new amount and expiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceExpirationUpdated {
    /// Principal whose funds the allowance draws on
    pub owner: PrincipalId,
    /// Principal authorized to spend
    pub spender: PrincipalId,
    /// Amount stored by the write
    pub value: u128,
    /// Absolute expiry stored by the write
    pub expires_at: Timestamp,
}

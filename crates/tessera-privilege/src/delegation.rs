//! Holder-to-delegate standing grants
//!
//! A delegation is a flat (holder, delegate) relation, independent of any
//! item or privilege slot: enabling a delegate gives them standing to act
//! on every privilege the holder currently has or later acquires. The
//! relation is kept as its own table rather than embedded in per-item
//! state so a grant is stored once, not once per slot.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tessera_core::PrincipalId;
use tracing::debug;

/// Many-to-many holder → delegate standing table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationTable {
    grants: BTreeSet<(PrincipalId, PrincipalId)>,
}

impl DelegationTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant or revoke a delegate's standing on behalf of `holder`.
    ///
    /// Idempotent; repeating a grant or revoking an absent grant is a
    /// no-op. There are no error conditions.
    pub fn set_delegator(&mut self, holder: PrincipalId, delegate: PrincipalId, enabled: bool) {
        if enabled {
            self.grants.insert((holder, delegate));
        } else {
            self.grants.remove(&(holder, delegate));
        }
        debug!(%holder, %delegate, enabled, "delegation updated");
    }

    /// Whether `delegate` may act on behalf of `holder`
    pub fn is_delegate(&self, holder: PrincipalId, delegate: PrincipalId) -> bool {
        self.grants.contains(&(holder, delegate))
    }
}

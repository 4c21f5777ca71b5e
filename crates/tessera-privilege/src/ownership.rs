//! Seam to the external base ownership registry
//!
//! The privilege registry never stores who owns an item; it asks the base
//! ownership registry through [`OwnershipView`] at decision time. The
//! in-memory implementation exists for tests and for embedders that keep
//! ownership in the same process.

use std::collections::{BTreeMap, BTreeSet};
use tessera_core::{PrincipalId, TesseraError, TesseraResult, TokenId};

/// Read-only view of the base ownership registry
pub trait OwnershipView {
    /// Current owner of an item; `NotFound` for unknown items
    fn owner_of(&self, token_id: TokenId) -> TesseraResult<PrincipalId>;

    /// Whether `principal` is the owner of the item, approved for this
    /// specific item, or an operator approved for all the owner's items
    fn is_approved_or_owner(&self, principal: PrincipalId, token_id: TokenId)
        -> TesseraResult<bool>;
}

/// In-memory ownership table for tests and single-process embedders
#[derive(Debug, Clone, Default)]
pub struct InMemoryOwnership {
    owners: BTreeMap<TokenId, PrincipalId>,
    token_approvals: BTreeMap<TokenId, PrincipalId>,
    operator_approvals: BTreeSet<(PrincipalId, PrincipalId)>,
}

impl InMemoryOwnership {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or transfer) ownership of an item
    pub fn set_owner(&mut self, token_id: TokenId, owner: PrincipalId) {
        self.owners.insert(token_id, owner);
        // A transfer voids the previous owner's per-item approval.
        self.token_approvals.remove(&token_id);
    }

    /// Approve a principal for one specific item
    pub fn approve(&mut self, token_id: TokenId, approved: PrincipalId) {
        self.token_approvals.insert(token_id, approved);
    }

    /// Grant or revoke an operator across all of `owner`'s items
    pub fn set_approval_for_all(&mut self, owner: PrincipalId, operator: PrincipalId, enabled: bool) {
        if enabled {
            self.operator_approvals.insert((owner, operator));
        } else {
            self.operator_approvals.remove(&(owner, operator));
        }
    }
}

impl OwnershipView for InMemoryOwnership {
    fn owner_of(&self, token_id: TokenId) -> TesseraResult<PrincipalId> {
        self.owners
            .get(&token_id)
            .copied()
            .ok_or_else(|| TesseraError::not_found(format!("unknown item {token_id}")))
    }

    fn is_approved_or_owner(
        &self,
        principal: PrincipalId,
        token_id: TokenId,
    ) -> TesseraResult<bool> {
        let owner = self.owner_of(token_id)?;
        Ok(principal == owner
            || self.token_approvals.get(&token_id) == Some(&principal)
            || self.operator_approvals.contains(&(owner, principal)))
    }
}

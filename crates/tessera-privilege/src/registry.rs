//! The privilege table and its operations
//!
//! Slots are keyed by (token, privilege id) and only ever created or
//! overwritten by [`PrivilegeRegistry::set_privilege`]; expiry never
//! removes a row. Authorization for a write is the union of two explicit
//! predicates with different mutation rights:
//!
//! - *item authority* (owner, per-item approved, or operator): may set
//!   both the holder and the expiry;
//! - *holder authority* (current unexpired holder, or a delegate the
//!   holder enabled): may pass the privilege to someone else but cannot
//!   touch the expiry.
//!
//! The predicates are kept separate in code because the asymmetry is the
//! whole point: merging them into one boolean would make it too easy for a
//! later change to let a delegate extend a privilege's lifetime.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tessera_core::{
    Duration, PrincipalId, PrivilegeId, TesseraError, TesseraResult, Timestamp, TokenId,
};
use tracing::{debug, warn};

use crate::config::PrivilegeConfig;
use crate::delegation::DelegationTable;
use crate::events::PrivilegeEvent;
use crate::ownership::OwnershipView;

/// Hard ceiling on how far ahead a privilege expiry may be set
pub const MAX_PRIVILEGE_TERM: Duration = Duration::from_days(30);

/// Stored state of one (token, privilege id) slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivilegeSlot {
    /// Current holder; may differ from the item's owner
    pub holder: PrincipalId,
    /// Absolute expiry; the slot is live while `expires_at >= now`
    pub expires_at: Timestamp,
    /// Third parties holding clones of this assignment
    pub cloned_holders: BTreeSet<PrincipalId>,
}

impl PrivilegeSlot {
    /// Whether the assignment is still live at `now`
    pub fn is_live_at(&self, now: Timestamp) -> bool {
        self.expires_at >= now
    }
}

/// Per-item privilege slots with expiry, delegation, and cloning
#[derive(Debug, Clone)]
pub struct PrivilegeRegistry<O: OwnershipView> {
    ownership: O,
    privilege_total: u32,
    cloneable: BTreeSet<PrivilegeId>,
    slots: BTreeMap<(TokenId, PrivilegeId), PrivilegeSlot>,
    delegations: DelegationTable,
    last_expires: BTreeMap<TokenId, Timestamp>,
}

impl<O: OwnershipView> PrivilegeRegistry<O> {
    /// Create a registry over the given base ownership view
    pub fn new(config: PrivilegeConfig, ownership: O) -> Self {
        Self {
            ownership,
            privilege_total: config.privilege_total,
            cloneable: config.cloneable,
            slots: BTreeMap::new(),
            delegations: DelegationTable::new(),
            last_expires: BTreeMap::new(),
        }
    }

    /// Current bound on assignable slot indices
    pub fn privilege_total(&self) -> u32 {
        self.privilege_total
    }

    /// Shared access to the base ownership view
    pub fn ownership(&self) -> &O {
        &self.ownership
    }

    /// Mutable access to the base ownership view, for embedders that keep
    /// ownership in the same process
    pub fn ownership_mut(&mut self) -> &mut O {
        &mut self.ownership
    }

    /// Assign or transfer a privilege slot.
    ///
    /// Item authority overwrites both holder and expiry and emits
    /// [`PrivilegeEvent::PrivilegeAssigned`]. Holder authority (the current
    /// unexpired holder or one of their delegates) overwrites the holder
    /// only — the stored expiry is retained regardless of the `expires`
    /// argument — and emits [`PrivilegeEvent::PrivilegeTransferred`].
    /// Either way any clones of the previous assignment are dropped.
    pub fn set_privilege(
        &mut self,
        caller: PrincipalId,
        token_id: TokenId,
        privilege_id: PrivilegeId,
        user: PrincipalId,
        expires: Timestamp,
        now: Timestamp,
    ) -> TesseraResult<PrivilegeEvent> {
        self.check_slot_bound(privilege_id)?;
        if expires >= now.saturating_add(MAX_PRIVILEGE_TERM) {
            warn!(%token_id, %privilege_id, %expires, "privilege term beyond ceiling");
            return Err(TesseraError::invalid(format!(
                "expiry {expires} is {MAX_PRIVILEGE_TERM} or more past {now}"
            )));
        }

        if self.ownership.is_approved_or_owner(caller, token_id)? {
            let slot = PrivilegeSlot {
                holder: user,
                expires_at: expires,
                cloned_holders: BTreeSet::new(),
            };
            self.slots.insert((token_id, privilege_id), slot);
            self.raise_watermark(token_id, expires);
            debug!(%caller, %token_id, %privilege_id, %user, %expires, "privilege assigned");
            return Ok(PrivilegeEvent::PrivilegeAssigned {
                token_id,
                privilege_id,
                user,
                expires_at: expires,
            });
        }

        // Holder branch: standing lapses with the slot itself, so an
        // expired holder (and their delegates) cannot transfer anything.
        let slot = self.slots.get_mut(&(token_id, privilege_id));
        match slot {
            Some(slot)
                if slot.is_live_at(now)
                    && (caller == slot.holder
                        || self.delegations.is_delegate(slot.holder, caller)) =>
            {
                let from = slot.holder;
                slot.holder = user;
                slot.cloned_holders.clear();
                debug!(%caller, %token_id, %privilege_id, %from, %user, "privilege transferred");
                Ok(PrivilegeEvent::PrivilegeTransferred {
                    token_id,
                    privilege_id,
                    from,
                    to: user,
                })
            }
            _ => {
                warn!(%caller, %token_id, %privilege_id, "privilege write denied");
                Err(TesseraError::permission_denied(format!(
                    "{caller} has neither item nor holder authority over {token_id}/{privilege_id}"
                )))
            }
        }
    }

    /// Whether `user` currently enjoys a privilege.
    ///
    /// While the slot is live this is a holder (or cloned-holder) check;
    /// once the expiry has passed, control reverts to the item's current
    /// owner, however stale the stored holder may be.
    pub fn has_privilege(
        &self,
        token_id: TokenId,
        privilege_id: PrivilegeId,
        user: PrincipalId,
        now: Timestamp,
    ) -> TesseraResult<bool> {
        self.check_slot_bound(privilege_id)?;
        match self.slots.get(&(token_id, privilege_id)) {
            Some(slot) if slot.is_live_at(now) => {
                Ok(user == slot.holder || slot.cloned_holders.contains(&user))
            }
            _ => Ok(user == self.ownership.owner_of(token_id)?),
        }
    }

    /// Stored expiry of a slot; [`Timestamp::ZERO`] when never set
    pub fn privilege_expires(&self, token_id: TokenId, privilege_id: PrivilegeId) -> Timestamp {
        self.slots
            .get(&(token_id, privilege_id))
            .map(|slot| slot.expires_at)
            .unwrap_or(Timestamp::ZERO)
    }

    /// Highest expiry ever set on any of the item's slots; monitoring aid
    /// only, never consulted for invalidation
    pub fn last_expires_at(&self, token_id: TokenId) -> Timestamp {
        self.last_expires
            .get(&token_id)
            .copied()
            .unwrap_or(Timestamp::ZERO)
    }

    /// Grant or revoke `delegate`'s standing across all of `holder`'s
    /// privileges. Idempotent; no error conditions.
    pub fn set_delegator(&mut self, holder: PrincipalId, delegate: PrincipalId, enabled: bool) {
        self.delegations.set_delegator(holder, delegate, enabled);
    }

    /// Whether `delegate` may act on behalf of `holder`
    pub fn is_delegate(&self, holder: PrincipalId, delegate: PrincipalId) -> bool {
        self.delegations.is_delegate(holder, delegate)
    }

    /// Duplicate a cloneable privilege to the caller without displacing
    /// the original holder. The clone shares the slot's expiry and is
    /// credited to `referrer`.
    pub fn clone_privilege(
        &mut self,
        caller: PrincipalId,
        token_id: TokenId,
        privilege_id: PrivilegeId,
        referrer: PrincipalId,
        now: Timestamp,
    ) -> TesseraResult<PrivilegeEvent> {
        self.check_slot_bound(privilege_id)?;
        if !self.cloneable.contains(&privilege_id) {
            return Err(TesseraError::invalid(format!(
                "{privilege_id} is not cloneable"
            )));
        }
        let slot = self
            .slots
            .get_mut(&(token_id, privilege_id))
            .ok_or_else(|| {
                TesseraError::not_found(format!("no assignment at {token_id}/{privilege_id}"))
            })?;
        if !slot.is_live_at(now) {
            return Err(TesseraError::invalid(format!(
                "assignment at {token_id}/{privilege_id} has expired"
            )));
        }
        if caller == slot.holder || slot.cloned_holders.contains(&caller) {
            return Err(TesseraError::invalid(format!(
                "{caller} already holds {token_id}/{privilege_id}"
            )));
        }

        slot.cloned_holders.insert(caller);
        let expires_at = slot.expires_at;
        debug!(%caller, %token_id, %privilege_id, %referrer, "privilege cloned");
        Ok(PrivilegeEvent::PrivilegeCloned {
            token_id,
            privilege_id,
            recipient: caller,
            referrer,
            expires_at,
        })
    }

    /// Raise the slot bound. Lowering is rejected so populated slots can
    /// never be stranded above the bound.
    pub fn set_privilege_total(&mut self, new_total: u32) -> TesseraResult<PrivilegeEvent> {
        if new_total < self.privilege_total {
            return Err(TesseraError::invalid(format!(
                "privilege total cannot be lowered ({} -> {new_total})",
                self.privilege_total
            )));
        }
        let previous = self.privilege_total;
        self.privilege_total = new_total;
        debug!(previous, current = new_total, "privilege total changed");
        Ok(PrivilegeEvent::PrivilegeTotalChanged {
            previous,
            current: new_total,
        })
    }

    fn check_slot_bound(&self, privilege_id: PrivilegeId) -> TesseraResult<()> {
        if privilege_id.value() >= self.privilege_total {
            return Err(TesseraError::invalid(format!(
                "{privilege_id} is outside [0, {})",
                self.privilege_total
            )));
        }
        Ok(())
    }

    fn raise_watermark(&mut self, token_id: TokenId, expires: Timestamp) {
        let watermark = self.last_expires.entry(token_id).or_insert(Timestamp::ZERO);
        if expires > *watermark {
            *watermark = expires;
        }
    }
}

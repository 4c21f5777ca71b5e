//! The expiring allowance table
//!
//! One row per (owner, spender) pair. Rows are only ever created or
//! overwritten by explicit operations; expiry never removes a row, it just
//! makes the stored amount unusable. Every read and pre-write check goes
//! through [`effective_amount`] so a stale non-zero amount can never leak
//! back into a computation after its expiry has passed.

use std::collections::BTreeMap;

use tessera_core::{Duration, PrincipalId, TesseraError, TesseraResult, Timestamp};
use tracing::{debug, warn};

use crate::config::AllowanceConfig;
use crate::events::AllowanceExpirationUpdated;

/// Stored state for one (owner, spender) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AllowanceEntry {
    /// Raw stored amount; may be stale once `expires_at` has passed
    pub amount: u128,
    /// Absolute expiry of the authorization
    pub expires_at: Timestamp,
}

/// The usable amount of an entry at `now`: the stored amount while the
/// expiry is strictly in the future, zero once `expires_at <= now`.
pub fn effective_amount(entry: &AllowanceEntry, now: Timestamp) -> u128 {
    if entry.expires_at.is_expired_at(now) {
        0
    } else {
        entry.amount
    }
}

/// Per-(owner, spender) spending authorizations with timestamp expiry
#[derive(Debug, Clone, Default)]
pub struct ExpiringAllowanceRegistry {
    config: AllowanceConfig,
    allowances: BTreeMap<(PrincipalId, PrincipalId), AllowanceEntry>,
}

impl ExpiringAllowanceRegistry {
    /// Create a registry with the given configuration
    pub fn new(config: AllowanceConfig) -> Self {
        Self {
            config,
            allowances: BTreeMap::new(),
        }
    }

    /// The fixed period applied when no explicit period is supplied
    pub fn default_expiration(&self) -> Duration {
        self.config.default_expiration
    }

    /// Stored expiry for a pair; [`Timestamp::ZERO`] for never-set pairs
    pub fn allowance_expiration(&self, owner: PrincipalId, spender: PrincipalId) -> Timestamp {
        self.allowances
            .get(&(owner, spender))
            .map(|entry| entry.expires_at)
            .unwrap_or(Timestamp::ZERO)
    }

    /// Effective (expiry-aware) allowance for a pair at `now`
    pub fn allowance(&self, owner: PrincipalId, spender: PrincipalId, now: Timestamp) -> u128 {
        self.allowances
            .get(&(owner, spender))
            .map(|entry| effective_amount(entry, now))
            .unwrap_or(0)
    }

    /// Set an allowance, overwriting any prior value unconditionally.
    ///
    /// The new expiry is `now + period`, falling back to the registry's
    /// default period when none is supplied.
    pub fn approve(
        &mut self,
        owner: PrincipalId,
        spender: PrincipalId,
        amount: u128,
        period: Option<Duration>,
        now: Timestamp,
    ) -> TesseraResult<AllowanceExpirationUpdated> {
        let expires_at = self.expiry_for(period, now);
        self.write_entry(owner, spender, amount, expires_at)
    }

    /// Add to the effective allowance, refreshing the expiry.
    ///
    /// The base of the addition is the effective amount, so value that has
    /// already lapsed is not resurrected by a later top-up.
    pub fn increase_allowance(
        &mut self,
        owner: PrincipalId,
        spender: PrincipalId,
        added_value: u128,
        period: Option<Duration>,
        now: Timestamp,
    ) -> TesseraResult<AllowanceExpirationUpdated> {
        let current = self.allowance(owner, spender, now);
        let amount = current.checked_add(added_value).ok_or_else(|| {
            warn!(%owner, %spender, added_value, "allowance increase overflow");
            TesseraError::invalid("allowance amount overflow")
        })?;
        let expires_at = self.expiry_for(period, now);
        self.write_entry(owner, spender, amount, expires_at)
    }

    /// Subtract from the effective allowance, refreshing the expiry.
    ///
    /// Fails with [`TesseraError::Underflow`] when `subtracted_value`
    /// exceeds the effective amount, even if the raw stored amount would
    /// have permitted the subtraction.
    pub fn decrease_allowance(
        &mut self,
        owner: PrincipalId,
        spender: PrincipalId,
        subtracted_value: u128,
        period: Option<Duration>,
        now: Timestamp,
    ) -> TesseraResult<AllowanceExpirationUpdated> {
        let current = self.allowance(owner, spender, now);
        let amount = current.checked_sub(subtracted_value).ok_or_else(|| {
            warn!(%owner, %spender, subtracted_value, current, "allowance decrease underflow");
            TesseraError::Underflow {
                requested: subtracted_value,
                available: current,
            }
        })?;
        let expires_at = self.expiry_for(period, now);
        self.write_entry(owner, spender, amount, expires_at)
    }

    /// Consume part of an allowance on behalf of a transfer.
    ///
    /// Internal hook for the surrounding transfer layer. Fails with
    /// [`TesseraError::AllowanceExceeded`] when `amount` exceeds the
    /// effective allowance; on success decrements the stored amount and
    /// leaves the expiry untouched.
    pub fn spend_allowance(
        &mut self,
        owner: PrincipalId,
        spender: PrincipalId,
        amount: u128,
        now: Timestamp,
    ) -> TesseraResult<()> {
        let available = self.allowance(owner, spender, now);
        if amount > available {
            warn!(%owner, %spender, amount, available, "allowance spend rejected");
            return Err(TesseraError::AllowanceExceeded {
                requested: amount,
                available,
            });
        }
        // available > 0 implies the entry exists and is unexpired, so the
        // stored amount equals the effective amount here.
        if let Some(entry) = self.allowances.get_mut(&(owner, spender)) {
            entry.amount = available - amount;
        }
        debug!(%owner, %spender, amount, remaining = available - amount, "allowance spent");
        Ok(())
    }

    fn expiry_for(&self, period: Option<Duration>, now: Timestamp) -> Timestamp {
        now.saturating_add(period.unwrap_or(self.config.default_expiration))
    }

    fn write_entry(
        &mut self,
        owner: PrincipalId,
        spender: PrincipalId,
        amount: u128,
        expires_at: Timestamp,
    ) -> TesseraResult<AllowanceExpirationUpdated> {
        self.allowances
            .insert((owner, spender), AllowanceEntry { amount, expires_at });
        debug!(%owner, %spender, amount, %expires_at, "allowance written");
        Ok(AllowanceExpirationUpdated {
            owner,
            spender,
            value: amount,
            expires_at,
        })
    }
}

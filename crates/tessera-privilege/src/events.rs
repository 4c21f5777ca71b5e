//! Privilege notifications
//!
//! Returned from successful mutations; a failed operation returns an error
//! and no event. The wire names keep the source notification spellings,
//! including the historical `PrivilegeTransfered`.

use serde::{Deserialize, Serialize};
use tessera_core::{PrincipalId, PrivilegeId, Timestamp, TokenId};

/// Notification produced by a privilege registry mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrivilegeEvent {
    /// A privilege slot was written by the item's authority
    PrivilegeAssigned {
        /// Item carrying the slot
        token_id: TokenId,
        /// Slot index
        privilege_id: PrivilegeId,
        /// New holder
        user: PrincipalId,
        /// Stored expiry after the write
        expires_at: Timestamp,
    },

    /// A holder (or delegate) passed the privilege to a third party
    #[serde(rename = "PrivilegeTransfered")]
    PrivilegeTransferred {
        /// Item carrying the slot
        token_id: TokenId,
        /// Slot index
        privilege_id: PrivilegeId,
        /// Previous holder
        from: PrincipalId,
        /// New holder; the stored expiry is unchanged
        to: PrincipalId,
    },

    /// The registry's slot bound was raised
    PrivilegeTotalChanged {
        /// Bound before the change
        previous: u32,
        /// Bound after the change
        current: u32,
    },

    /// A cloneable privilege was duplicated to a new recipient
    PrivilegeCloned {
        /// Item carrying the slot
        token_id: TokenId,
        /// Slot index
        privilege_id: PrivilegeId,
        /// Principal receiving the clone
        recipient: PrincipalId,
        /// Principal credited with the referral
        referrer: PrincipalId,
        /// Expiry shared with the original assignment
        expires_at: Timestamp,
    },
}

//! Privilege registry configuration

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tessera_core::PrivilegeId;

/// Construction-time configuration for [`PrivilegeRegistry`]
///
/// `privilege_total` bounds assignable slot indices and can later be raised
/// (never lowered) through the registry's administrative surface. The
/// cloneable set is fixed at construction.
///
/// [`PrivilegeRegistry`]: crate::PrivilegeRegistry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivilegeConfig {
    /// Number of assignable privilege slots per item
    pub privilege_total: u32,
    /// Privilege ids whose assignments may be cloned to third parties
    #[serde(default)]
    pub cloneable: BTreeSet<PrivilegeId>,
}

impl PrivilegeConfig {
    /// Configuration with the given slot bound and nothing cloneable
    pub fn with_total(privilege_total: u32) -> Self {
        Self {
            privilege_total,
            cloneable: BTreeSet::new(),
        }
    }

    /// Mark a privilege id as cloneable
    pub fn cloneable(mut self, privilege_id: PrivilegeId) -> Self {
        self.cloneable.insert(privilege_id);
        self
    }
}

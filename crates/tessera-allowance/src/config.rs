//! Allowance registry configuration

use serde::{Deserialize, Serialize};
use tessera_core::Duration;

/// Construction-time configuration for [`ExpiringAllowanceRegistry`]
///
/// `default_expiration` is the fixed period applied when an approval or
/// adjustment supplies no explicit period. It is queryable through the
/// registry but cannot be changed after construction.
///
/// [`ExpiringAllowanceRegistry`]: crate::ExpiringAllowanceRegistry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceConfig {
    /// Period used when an operation supplies no explicit period
    pub default_expiration: Duration,
}

impl Default for AllowanceConfig {
    fn default() -> Self {
        Self {
            default_expiration: Duration::from_days(7),
        }
    }
}

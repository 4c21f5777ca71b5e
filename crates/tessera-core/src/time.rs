//! Time primitives for lazy expiration
//!
//! Registries never read a clock. Every operation takes the current time as
//! an argument and compares it against stored expiry timestamps, so the
//! whole system stays a pure function of its inputs and is trivially
//! deterministic under test. Granularity is whole seconds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Absolute time in seconds since the Unix epoch
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Sentinel for never-set expirations
    pub const ZERO: Timestamp = Timestamp(0);

    /// Create from seconds since the epoch
    pub fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Get the inner seconds value
    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Add a duration, clamping at the representable maximum
    pub fn saturating_add(self, duration: Duration) -> Self {
        Self(self.0.saturating_add(duration.0))
    }

    /// Lazy-expiry test: an expiry at or before `now` is spent
    pub fn is_expired_at(self, now: Timestamp) -> bool {
        self <= now
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t+{}s", self.0)
    }
}

impl From<u64> for Timestamp {
    fn from(secs: u64) -> Self {
        Self(secs)
    }
}

/// Span of time in whole seconds
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Duration(pub u64);

impl Duration {
    /// Create from seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Create from whole days
    pub const fn from_days(days: u64) -> Self {
        Self(days * 86_400)
    }

    /// Get the inner seconds value
    pub fn as_secs(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

impl From<u64> for Duration {
    fn from(secs: u64) -> Self {
        Self(secs)
    }
}

impl Add<Duration> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Duration) -> Timestamp {
        self.saturating_add(rhs)
    }
}

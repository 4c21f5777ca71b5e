//! Property tests for the lazy-expiration invariants.

use proptest::prelude::*;
use tessera_allowance::{AllowanceConfig, ExpiringAllowanceRegistry, TesseraError};
use tessera_core::{Duration, PrincipalId, Timestamp};

fn registry() -> ExpiringAllowanceRegistry {
    ExpiringAllowanceRegistry::new(AllowanceConfig {
        default_expiration: Duration::from_secs(500),
    })
}

proptest! {
    /// After approve(amount, period) at `now`, the stored expiry is exactly
    /// `now + period` and the effective allowance equals `amount` strictly
    /// before that instant.
    #[test]
    fn approve_fixes_expiry_and_effective_amount(
        amount in 0u128..1_000_000,
        period in 1u64..100_000,
        now in 0u64..1_000_000,
        probe_offset in 0u64..100_000,
    ) {
        let mut reg = registry();
        let owner = PrincipalId::new();
        let spender = PrincipalId::new();

        reg.approve(
            owner,
            spender,
            amount,
            Some(Duration::from_secs(period)),
            Timestamp::from_secs(now),
        )
        .expect("approve");

        let expires = Timestamp::from_secs(now + period);
        prop_assert_eq!(reg.allowance_expiration(owner, spender), expires);

        let probe = Timestamp::from_secs(now + probe_offset);
        let expected = if probe < expires { amount } else { 0 };
        prop_assert_eq!(reg.allowance(owner, spender, probe), expected);
    }

    /// Once `now >= expires_at`, spending any positive amount fails with
    /// allowance-exceeded no matter what the stored amount is.
    #[test]
    fn expired_allowance_spends_nothing(
        amount in 1u128..1_000_000,
        period in 1u64..10_000,
        now in 0u64..1_000_000,
        extra in 0u64..10_000,
        spend in 1u128..1_000_000,
    ) {
        let mut reg = registry();
        let owner = PrincipalId::new();
        let spender = PrincipalId::new();

        reg.approve(
            owner,
            spender,
            amount,
            Some(Duration::from_secs(period)),
            Timestamp::from_secs(now),
        )
        .expect("approve");

        let at_or_past_expiry = Timestamp::from_secs(now + period + extra);
        let result = reg.spend_allowance(owner, spender, spend, at_or_past_expiry);
        prop_assert!(
            matches!(
                result,
                Err(TesseraError::AllowanceExceeded { available: 0, .. })
            ),
            "assertion failed: matches!(result, Err(TesseraError::AllowanceExceeded {{ available: 0, .. }}))"
        );
    }

    /// A decrease larger than the effective amount always underflows, and a
    /// failed decrease leaves the row byte-for-byte intact.
    #[test]
    fn decrease_beyond_effective_underflows(
        amount in 0u128..1_000,
        period in 1u64..10_000,
        now in 0u64..1_000_000,
        excess in 1u128..1_000,
    ) {
        let mut reg = registry();
        let owner = PrincipalId::new();
        let spender = PrincipalId::new();

        reg.approve(
            owner,
            spender,
            amount,
            Some(Duration::from_secs(period)),
            Timestamp::from_secs(now),
        )
        .expect("approve");

        let probe = Timestamp::from_secs(now);
        let before_expiry = reg.allowance_expiration(owner, spender);
        let result = reg.decrease_allowance(owner, spender, amount + excess, None, probe);
        prop_assert!(
            matches!(result, Err(TesseraError::Underflow { .. })),
            "assertion failed: matches!(result, Err(TesseraError::Underflow {{ .. }}))"
        );
        prop_assert_eq!(reg.allowance(owner, spender, probe), amount);
        prop_assert_eq!(reg.allowance_expiration(owner, spender), before_expiry);
    }

    /// Spending never alters the stored expiry.
    #[test]
    fn spend_preserves_expiry(
        amount in 1u128..1_000_000,
        spend_fraction in 0u128..100,
        period in 2u64..10_000,
        now in 0u64..1_000_000,
    ) {
        let mut reg = registry();
        let owner = PrincipalId::new();
        let spender = PrincipalId::new();

        reg.approve(
            owner,
            spender,
            amount,
            Some(Duration::from_secs(period)),
            Timestamp::from_secs(now),
        )
        .expect("approve");

        let spend = amount * spend_fraction / 100;
        let expiry_before = reg.allowance_expiration(owner, spender);
        reg.spend_allowance(owner, spender, spend, Timestamp::from_secs(now + 1))
            .expect("partial spend");
        prop_assert_eq!(reg.allowance_expiration(owner, spender), expiry_before);
        prop_assert_eq!(
            reg.allowance(owner, spender, Timestamp::from_secs(now + 1)),
            amount - spend
        );
    }
}

//! End-to-end privilege scenarios.

use assert_matches::assert_matches;
use tessera_core::{PrincipalId, PrivilegeId, Timestamp, TokenId};
use tessera_privilege::{
    InMemoryOwnership, PrivilegeConfig, PrivilegeEvent, PrivilegeRegistry, TesseraError,
};

fn registry_with_owner(
    config: PrivilegeConfig,
    token: TokenId,
    owner: PrincipalId,
) -> PrivilegeRegistry<InMemoryOwnership> {
    let mut ownership = InMemoryOwnership::new();
    ownership.set_owner(token, owner);
    PrivilegeRegistry::new(config, ownership)
}

#[test]
fn slot_bound_scenario() {
    // privilege_total = 3: slot 0 is assignable, slot 3 is out of range.
    let owner = PrincipalId::new();
    let user_a = PrincipalId::new();
    let token = TokenId::new(7);
    let mut reg = registry_with_owner(PrivilegeConfig::with_total(3), token, owner);
    let now = Timestamp::from_secs(100);

    reg.set_privilege(
        owner,
        token,
        PrivilegeId::new(0),
        user_a,
        Timestamp::from_secs(101),
        now,
    )
    .expect("slot 0 assignable");

    let out_of_range = reg.set_privilege(
        owner,
        token,
        PrivilegeId::new(3),
        user_a,
        Timestamp::from_secs(101),
        now,
    );
    assert_matches!(out_of_range, Err(TesseraError::Invalid { .. }));
}

#[test]
fn expired_privilege_reverts_to_owner() {
    // Slot 0 assigned to userA expiring at t=100 while userB owns the item;
    // at t=150 the owner answers the privilege query, not the stale holder.
    let user_b = PrincipalId::new();
    let user_a = PrincipalId::new();
    let token = TokenId::new(1);
    let mut reg = registry_with_owner(PrivilegeConfig::with_total(1), token, user_b);

    reg.set_privilege(
        user_b,
        token,
        PrivilegeId::new(0),
        user_a,
        Timestamp::from_secs(100),
        Timestamp::from_secs(0),
    )
    .expect("assign");

    let late = Timestamp::from_secs(150);
    assert!(reg
        .has_privilege(token, PrivilegeId::new(0), user_b, late)
        .expect("owner query"));
    assert!(!reg
        .has_privilege(token, PrivilegeId::new(0), user_a, late)
        .expect("holder query"));
}

#[test]
fn operator_approved_for_all_can_extend() {
    let owner = PrincipalId::new();
    let operator = PrincipalId::new();
    let holder = PrincipalId::new();
    let token = TokenId::new(2);
    let mut reg = registry_with_owner(PrivilegeConfig::with_total(1), token, owner);
    reg.ownership_mut()
        .set_approval_for_all(owner, operator, true);

    let now = Timestamp::from_secs(1_000);
    reg.set_privilege(
        owner,
        token,
        PrivilegeId::new(0),
        holder,
        Timestamp::from_secs(1_500),
        now,
    )
    .expect("assign");

    // The operator acts with item authority: both holder and expiry move.
    let event = reg
        .set_privilege(
            operator,
            token,
            PrivilegeId::new(0),
            holder,
            Timestamp::from_secs(2_000),
            now,
        )
        .expect("operator extend");
    assert_matches!(event, PrivilegeEvent::PrivilegeAssigned { .. });
    assert_eq!(
        reg.privilege_expires(token, PrivilegeId::new(0)),
        Timestamp::from_secs(2_000)
    );
}

#[test]
fn clone_flow() {
    let owner = PrincipalId::new();
    let holder = PrincipalId::new();
    let friend = PrincipalId::new();
    let referrer = PrincipalId::new();
    let token = TokenId::new(3);
    let config = PrivilegeConfig::with_total(2).cloneable(PrivilegeId::new(0));
    let mut reg = registry_with_owner(config, token, owner);

    let now = Timestamp::from_secs(100);
    let expires = Timestamp::from_secs(500);
    reg.set_privilege(owner, token, PrivilegeId::new(0), holder, expires, now)
        .expect("assign");

    let event = reg
        .clone_privilege(friend, token, PrivilegeId::new(0), referrer, now)
        .expect("clone");
    assert_matches!(
        event,
        PrivilegeEvent::PrivilegeCloned { recipient, expires_at, .. }
            if recipient == friend && expires_at == expires
    );

    // Both the original holder and the clone recipient pass the check.
    assert!(reg
        .has_privilege(token, PrivilegeId::new(0), holder, now)
        .expect("holder"));
    assert!(reg
        .has_privilege(token, PrivilegeId::new(0), friend, now)
        .expect("clone"));

    // Cloning a slot that was never marked cloneable fails.
    reg.set_privilege(owner, token, PrivilegeId::new(1), holder, expires, now)
        .expect("assign slot 1");
    let not_cloneable = reg.clone_privilege(friend, token, PrivilegeId::new(1), referrer, now);
    assert_matches!(not_cloneable, Err(TesseraError::Invalid { .. }));

    // Cloning an unassigned cloneable slot fails.
    let other_token = TokenId::new(4);
    reg.ownership_mut().set_owner(other_token, owner);
    let missing = reg.clone_privilege(friend, other_token, PrivilegeId::new(0), referrer, now);
    assert_matches!(missing, Err(TesseraError::NotFound { .. }));
}

#[test]
fn clone_lapses_with_the_slot() {
    let owner = PrincipalId::new();
    let holder = PrincipalId::new();
    let friend = PrincipalId::new();
    let token = TokenId::new(5);
    let config = PrivilegeConfig::with_total(1).cloneable(PrivilegeId::new(0));
    let mut reg = registry_with_owner(config, token, owner);

    reg.set_privilege(
        owner,
        token,
        PrivilegeId::new(0),
        holder,
        Timestamp::from_secs(200),
        Timestamp::from_secs(100),
    )
    .expect("assign");
    reg.clone_privilege(
        friend,
        token,
        PrivilegeId::new(0),
        PrincipalId::new(),
        Timestamp::from_secs(100),
    )
    .expect("clone");

    let late = Timestamp::from_secs(201);
    assert!(!reg
        .has_privilege(token, PrivilegeId::new(0), friend, late)
        .expect("clone lapsed"));
    assert!(reg
        .has_privilege(token, PrivilegeId::new(0), owner, late)
        .expect("owner fallback"));
}

#[test]
fn transfer_after_ownership_change() {
    // Privileges are subordinate to ownership: after the item changes
    // hands, the new owner commands expired slots and the old owner loses
    // item authority.
    let seller = PrincipalId::new();
    let buyer = PrincipalId::new();
    let holder = PrincipalId::new();
    let token = TokenId::new(6);
    let mut reg = registry_with_owner(PrivilegeConfig::with_total(1), token, seller);

    reg.set_privilege(
        seller,
        token,
        PrivilegeId::new(0),
        holder,
        Timestamp::from_secs(300),
        Timestamp::from_secs(100),
    )
    .expect("assign");

    reg.ownership_mut().set_owner(token, buyer);

    let late = Timestamp::from_secs(301);
    assert!(reg
        .has_privilege(token, PrivilegeId::new(0), buyer, late)
        .expect("new owner"));

    let denied = reg.set_privilege(
        seller,
        token,
        PrivilegeId::new(0),
        seller,
        Timestamp::from_secs(400),
        late,
    );
    assert_matches!(denied, Err(TesseraError::PermissionDenied { .. }));
}

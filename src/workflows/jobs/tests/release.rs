use crate::workflows::jobs::domain::Role;
use crate::workflows::jobs::release::{can_deliver_vehicle, ReleaseRequest};

fn request(role: Role, balance_cents: i64, override_reason: Option<&str>) -> ReleaseRequest {
    ReleaseRequest {
        role,
        balance_cents,
        release_control_enabled: true,
        override_reason: override_reason.map(str::to_string),
    }
}

#[test]
fn disabled_control_always_allows() {
    let decision = can_deliver_vehicle(&ReleaseRequest {
        release_control_enabled: false,
        ..request(Role::Tech, 100_000, None)
    });

    assert!(decision.allowed);
    assert!(!decision.override_logged);
}

#[test]
fn settled_balance_always_allows() {
    for balance in [0, -2500] {
        let decision = can_deliver_vehicle(&request(Role::Tech, balance, None));
        assert!(decision.allowed);
        assert!(!decision.override_logged);
    }
}

#[test]
fn owner_with_reason_is_allowed_and_logged() {
    let decision = can_deliver_vehicle(&request(
        Role::Owner,
        50_000,
        Some("Customer signed promissory note"),
    ));

    assert!(decision.allowed);
    assert!(decision.override_logged);
}

#[test]
fn owner_without_a_real_reason_is_blocked() {
    for reason in [None, Some(""), Some("   ")] {
        let decision = can_deliver_vehicle(&request(Role::Owner, 50_000, reason));
        assert!(!decision.allowed);
        assert!(!decision.override_logged);
    }
}

#[test]
fn lower_roles_cannot_override() {
    for role in [Role::Tech, Role::Office] {
        let decision = can_deliver_vehicle(&request(role, 50_000, Some("please")));
        assert!(!decision.allowed);
        assert!(!decision.override_logged);
    }
}

use serde::{Deserialize, Serialize};

use super::domain::Role;
use super::money::Cents;

/// A request to hand the vehicle back to the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRequest {
    pub role: Role,
    pub balance_cents: Cents,
    pub release_control_enabled: bool,
    #[serde(default)]
    pub override_reason: Option<String>,
}

/// Structured verdict, never a panic: the caller turns a refusal into a
/// blocking response and must persist an audit entry whenever
/// `override_logged` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseDecision {
    pub allowed: bool,
    pub override_logged: bool,
}

/// Hard gate on vehicle hand-off while a balance is open. Only an Owner with
/// a non-blank override reason gets through; there is no retry path short of
/// re-requesting with a reason.
pub fn can_deliver_vehicle(request: &ReleaseRequest) -> ReleaseDecision {
    if !request.release_control_enabled {
        return ReleaseDecision {
            allowed: true,
            override_logged: false,
        };
    }

    if request.balance_cents <= 0 {
        return ReleaseDecision {
            allowed: true,
            override_logged: false,
        };
    }

    let has_reason = request
        .override_reason
        .as_deref()
        .map_or(false, |reason| !reason.trim().is_empty());

    if request.role == Role::Owner && has_reason {
        return ReleaseDecision {
            allowed: true,
            override_logged: true,
        };
    }

    ReleaseDecision {
        allowed: false,
        override_logged: false,
    }
}

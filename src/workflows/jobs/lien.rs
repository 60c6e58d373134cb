use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::LienStatus;
use super::money::{calendar_days_between, Cents};
use super::policy::LienThresholds;

/// Job facts the risk evaluation runs against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LienRiskInput {
    pub balance_cents: Cents,
    #[serde(default)]
    pub completed_date: Option<NaiveDate>,
    #[serde(default)]
    pub delivered_date: Option<NaiveDate>,
    pub storage_billable_days: i64,
}

/// Why a case moved to `Watch`. The wording feeds lien notices verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LienRiskReason {
    BalanceOverdue,
    StorageBeyondThreshold,
    VehicleNotPickedUp,
}

impl LienRiskReason {
    pub const fn message(self) -> &'static str {
        match self {
            Self::BalanceOverdue => "Balance overdue beyond threshold",
            Self::StorageBeyondThreshold => "Storage accrual beyond threshold",
            Self::VehicleNotPickedUp => "Vehicle not picked up",
        }
    }
}

/// Outcome of an automatic risk pass: only ever `None` or `Watch`. Advancing
/// past `Watch` is an explicit human action, never this evaluator's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LienAssessment {
    pub status: LienStatus,
    #[serde(default)]
    pub reason: Option<LienRiskReason>,
}

impl LienAssessment {
    const fn none() -> Self {
        Self {
            status: LienStatus::None,
            reason: None,
        }
    }

    const fn watch(reason: LienRiskReason) -> Self {
        Self {
            status: LienStatus::Watch,
            reason: Some(reason),
        }
    }
}

/// Deterministic decision tree, first match wins. A settled balance always
/// clears the case regardless of every other input.
pub fn evaluate_lien_risk(
    input: &LienRiskInput,
    thresholds: &LienThresholds,
    today: NaiveDate,
) -> LienAssessment {
    if input.balance_cents <= 0 {
        return LienAssessment::none();
    }

    let overdue_days = input
        .completed_date
        .map(|completed| calendar_days_between(completed, today))
        .unwrap_or(0);

    if overdue_days >= thresholds.overdue_days {
        return LienAssessment::watch(LienRiskReason::BalanceOverdue);
    }

    if input.storage_billable_days >= thresholds.storage_days {
        return LienAssessment::watch(LienRiskReason::StorageBeyondThreshold);
    }

    if input.delivered_date.is_none() && overdue_days >= thresholds.pickup_days {
        return LienAssessment::watch(LienRiskReason::VehicleNotPickedUp);
    }

    LienAssessment::none()
}

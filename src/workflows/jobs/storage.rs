use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::{calendar_days_between, Cents};

/// Inputs to a storage fee computation. `end_date: None` means the vehicle is
/// still on the lot and accrual runs through today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageTerms {
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub grace_days: i64,
    pub daily_rate_cents: Cents,
}

/// Derived accrual figures. Never negative, even when the end date precedes
/// the start date through clock skew or data entry error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageAccrual {
    pub total_days: i64,
    pub billable_days: i64,
    pub total_accrued_cents: Cents,
}

/// Pure function of the terms and today's date; whether the policy applies to
/// a given job at all is the reconciliation workflow's call.
pub fn compute_storage_accrual(terms: &StorageTerms, today: NaiveDate) -> StorageAccrual {
    let end_date = terms.end_date.unwrap_or(today);
    let total_days = calendar_days_between(terms.start_date, end_date).max(0);
    let billable_days = (total_days - terms.grace_days).max(0);

    StorageAccrual {
        total_days,
        billable_days,
        total_accrued_cents: billable_days * terms.daily_rate_cents,
    }
}

use super::common::*;
use crate::workflows::jobs::storage::{compute_storage_accrual, StorageTerms};

#[test]
fn applies_grace_days() {
    let accrual = compute_storage_accrual(
        &StorageTerms {
            start_date: date(2026, 2, 1),
            end_date: Some(date(2026, 2, 11)),
            grace_days: 3,
            daily_rate_cents: 5000,
        },
        date(2026, 3, 1),
    );

    assert_eq!(accrual.total_days, 10);
    assert_eq!(accrual.billable_days, 7);
    assert_eq!(accrual.total_accrued_cents, 35_000);
}

#[test]
fn open_ended_terms_accrue_through_today() {
    let accrual = compute_storage_accrual(
        &StorageTerms {
            start_date: date(2026, 2, 1),
            end_date: None,
            grace_days: 0,
            daily_rate_cents: 6500,
        },
        date(2026, 2, 6),
    );

    assert_eq!(accrual.total_days, 5);
    assert_eq!(accrual.billable_days, 5);
    assert_eq!(accrual.total_accrued_cents, 32_500);
}

#[test]
fn end_before_start_never_goes_negative() {
    let accrual = compute_storage_accrual(
        &StorageTerms {
            start_date: date(2026, 2, 11),
            end_date: Some(date(2026, 2, 1)),
            grace_days: 3,
            daily_rate_cents: 5000,
        },
        date(2026, 3, 1),
    );

    assert_eq!(accrual.total_days, 0);
    assert_eq!(accrual.billable_days, 0);
    assert_eq!(accrual.total_accrued_cents, 0);
}

#[test]
fn grace_longer_than_stay_bills_nothing() {
    let accrual = compute_storage_accrual(
        &StorageTerms {
            start_date: date(2026, 2, 1),
            end_date: Some(date(2026, 2, 3)),
            grace_days: 5,
            daily_rate_cents: 5000,
        },
        date(2026, 3, 1),
    );

    assert_eq!(accrual.total_days, 2);
    assert_eq!(accrual.billable_days, 0);
    assert_eq!(accrual.total_accrued_cents, 0);
}

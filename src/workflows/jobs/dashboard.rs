use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{JobStatus, LienStatus, PaymentEntry};
use super::money::{calendar_days_between, Cents};
use super::receivables::{compute_balance, compute_short_pay, sum_by_payer};

/// Per-job figures the receivables dashboard aggregates over. Built from the
/// same read models the reconciliation workflow consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobFinancials {
    pub status: JobStatus,
    #[serde(default)]
    pub total_written_cents: Cents,
    #[serde(default)]
    pub approved_amount_cents: Option<Cents>,
    #[serde(default)]
    pub claim_date_sent: Option<NaiveDate>,
    #[serde(default)]
    pub payments: Vec<PaymentEntry>,
    #[serde(default)]
    pub storage_accrued_cents: Cents,
    #[serde(default)]
    pub lien_status: Option<LienStatus>,
}

/// Shop-wide receivables roll-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReceivablesKpis {
    pub written_cents: Cents,
    pub approved_cents: Cents,
    pub collected_cents: Cents,
    pub outstanding_insurance_cents: Cents,
    pub outstanding_customer_cents: Cents,
    pub storage_accrued_cents: Cents,
    pub lien_risk_count: usize,
    pub short_pay_cents: Cents,
    pub avg_insurance_lag_days: i64,
}

/// Aggregate the receivables picture across every open and closed job.
///
/// The insurance share of an open balance is whatever the carrier approved
/// but has not yet paid; the remainder falls to the customer.
pub fn summarize_receivables(jobs: &[JobFinancials], today: NaiveDate) -> ReceivablesKpis {
    let mut kpis = ReceivablesKpis::default();
    let mut lag_days: Vec<i64> = Vec::new();

    for job in jobs {
        let paid = sum_by_payer(&job.payments);
        let balance = compute_balance(job.total_written_cents, paid.total_cents);

        kpis.written_cents += job.total_written_cents;
        kpis.approved_cents += job.approved_amount_cents.unwrap_or(0);
        kpis.collected_cents += paid.total_cents;
        kpis.storage_accrued_cents += job.storage_accrued_cents;

        if job.lien_status.map_or(false, LienStatus::is_at_risk) {
            kpis.lien_risk_count += 1;
        }

        if let Some(short_pay) =
            compute_short_pay(job.total_written_cents, job.approved_amount_cents)
        {
            if short_pay > 0 {
                kpis.short_pay_cents += short_pay;
            }
        }

        if let (Some(sent), Some(_)) = (job.claim_date_sent, job.approved_amount_cents) {
            lag_days.push(calendar_days_between(sent, today));
        }

        if balance > 0 {
            let insurance_share =
                (job.approved_amount_cents.unwrap_or(0) - paid.insurance_cents).max(0);
            let insurance_share = insurance_share.min(balance);
            kpis.outstanding_insurance_cents += insurance_share;
            kpis.outstanding_customer_cents += balance - insurance_share;
        }
    }

    if !lag_days.is_empty() {
        let total: i64 = lag_days.iter().sum();
        let count = lag_days.len() as i64;
        // Round-half-up average, matching the report the office staff sees.
        kpis.avg_insurance_lag_days = (total + count / 2) / count;
    }

    kpis
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{AgingBucket, PayerType, PaymentEntry};
use super::money::{calendar_days_between, Cents};

/// Written total minus collected. Negative means overpayment and is
/// deliberately not clamped.
pub fn compute_balance(total_written_cents: Cents, paid_cents: Cents) -> Cents {
    total_written_cents - paid_cents
}

/// Ledger totals split by payer. Order-independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PayerTotals {
    pub insurance_cents: Cents,
    pub customer_cents: Cents,
    pub total_cents: Cents,
}

pub fn sum_by_payer(entries: &[PaymentEntry]) -> PayerTotals {
    entries
        .iter()
        .fold(PayerTotals::default(), |mut totals, entry| {
            match entry.payer {
                PayerType::Insurance => totals.insurance_cents += entry.amount_cents,
                PayerType::Customer => totals.customer_cents += entry.amount_cents,
            }
            totals.total_cents += entry.amount_cents;
            totals
        })
}

/// The date a balance's age is measured from: the claim's date-sent when one
/// exists, else the job's completion date, else today.
pub fn determine_aging_anchor(
    completed_date: Option<NaiveDate>,
    claim_date_sent: Option<NaiveDate>,
    today: NaiveDate,
) -> NaiveDate {
    claim_date_sent.or(completed_date).unwrap_or(today)
}

/// Calendar-day aging with inclusive boundaries at 15/30/60. An anchor in the
/// future clamps to zero days rather than going negative.
pub fn compute_aging_bucket(anchor: NaiveDate, today: NaiveDate) -> AgingBucket {
    let days = calendar_days_between(anchor, today).max(0);
    if days <= 15 {
        AgingBucket::Days0To15
    } else if days <= 30 {
        AgingBucket::Days16To30
    } else if days <= 60 {
        AgingBucket::Days31To60
    } else {
        AgingBucket::Over60
    }
}

/// Gap between the written estimate and the insurer's approved amount.
/// `None` until the carrier has approved anything.
pub fn compute_short_pay(
    total_written_cents: Cents,
    approved_amount_cents: Option<Cents>,
) -> Option<Cents> {
    approved_amount_cents.map(|approved| total_written_cents - approved)
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::{round_cents, Cents};

/// Identifier wrapper for repair jobs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

/// How the job is expected to be paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    Insurance,
    CustomerPay,
    Mixed,
    TowStorage,
}

/// Lifecycle of a repair engagement from intake through closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Draft,
    EstimateReady,
    SentToInsurance,
    WaitingApproval,
    Approved,
    InRepair,
    Complete,
    Delivered,
    Closed,
}

/// A job is in collections territory once work is done but the vehicle may
/// still be on the lot or the balance open.
pub fn is_job_closed_for_collections(status: JobStatus) -> bool {
    matches!(status, JobStatus::Complete | JobStatus::Delivered)
}

/// Unpaid means finished work with a positive balance still owed.
pub fn is_unpaid_job(status: JobStatus, balance_cents: Cents) -> bool {
    balance_cents > 0 && is_job_closed_for_collections(status)
}

/// Staff roles, lowest privilege first. Only [`Role::Owner`] can override the
/// release gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Tech,
    Office,
    Owner,
}

/// Labor departments with distinct hourly rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaborType {
    Body,
    Paint,
    Mech,
    Detail,
}

impl LaborType {
    pub const fn ordered() -> [Self; 4] {
        [Self::Body, Self::Paint, Self::Mech, Self::Detail]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Body => "Body",
            Self::Paint => "Paint",
            Self::Mech => "Mechanical",
            Self::Detail => "Detail",
        }
    }
}

/// Quantity-times-unit amount shared by the non-labor line variants.
///
/// Price wins over cost when both are present; a line with neither prices at
/// zero rather than erroring, matching how estimates are drafted in practice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitAmount {
    pub quantity: f64,
    #[serde(default)]
    pub unit_price_cents: Option<Cents>,
    #[serde(default)]
    pub unit_cost_cents: Option<Cents>,
}

impl UnitAmount {
    pub fn raw_total_cents(&self) -> Cents {
        let quantity = if self.quantity.is_finite() {
            self.quantity
        } else {
            0.0
        };
        let unit = self.unit_price_cents.or(self.unit_cost_cents).unwrap_or(0);
        round_cents(quantity * unit as f64)
    }
}

/// One priced row of an estimate. Closed set of categories so the pricing
/// engine matches exhaustively; adding a category is a compile-time event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum EstimateLine {
    Labor {
        #[serde(default)]
        labor_type: Option<LaborType>,
        #[serde(default)]
        hours: Option<f64>,
        quantity: f64,
    },
    Parts(UnitAmount),
    Sublet(UnitAmount),
    Materials(UnitAmount),
    Fee(UnitAmount),
    Storage(UnitAmount),
    Discount(UnitAmount),
    /// Manually entered tax, carried into the totals as-is and excluded from
    /// the automatic tax base.
    ManualTax(UnitAmount),
}

/// Who paid an entry in the payment ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayerType {
    Insurance,
    Customer,
}

/// Immutable ledger entry once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentEntry {
    pub payer: PayerType,
    pub amount_cents: Cents,
}

/// Age of a receivable measured from its anchor date, inclusive boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgingBucket {
    Days0To15,
    Days16To30,
    Days31To60,
    Over60,
}

impl AgingBucket {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Days0To15 => "0-15",
            Self::Days16To30 => "16-30",
            Self::Days31To60 => "31-60",
            Self::Over60 => "60+",
        }
    }
}

/// Lien case lifecycle. Automatic reconciliation only ever produces
/// `None` or `Watch`; the later states are explicit human actions taken when
/// notices are generated and filed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LienStatus {
    None,
    Watch,
    NoticeReady,
    NoticeSent,
    FileReady,
    Filed,
}

impl LienStatus {
    /// Anything past `None` counts toward the shop's lien-risk exposure.
    pub fn is_at_risk(self) -> bool {
        self >= Self::Watch
    }
}

/// Insurance claim fields the engine cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSnapshot {
    pub carrier_name: String,
    pub claim_number: String,
    #[serde(default)]
    pub date_sent: Option<NaiveDate>,
    #[serde(default)]
    pub approved_amount_cents: Option<Cents>,
}

/// Read model of a job as the reconciliation workflow sees it: plain data,
/// no persistence handles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub id: JobId,
    pub job_type: JobType,
    pub status: JobStatus,
    /// Grand total of the last saved estimate; zero when none exists yet.
    #[serde(default)]
    pub total_written_cents: Cents,
    #[serde(default)]
    pub payments: Vec<PaymentEntry>,
    #[serde(default)]
    pub claim: Option<ClaimSnapshot>,
    #[serde(default)]
    pub completed_date: Option<NaiveDate>,
    #[serde(default)]
    pub delivered_date: Option<NaiveDate>,
    #[serde(default)]
    pub storage_start_date: Option<NaiveDate>,
}

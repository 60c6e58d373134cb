//! Repair-job financial engine: estimate pricing, receivables aging, storage
//! accrual, lien-risk classification, the vehicle release gate, and the
//! reconciliation workflow that keeps the derived records consistent.
//!
//! Everything except [`reconcile`] is pure and synchronous; the workflow's
//! only side effects are the two upserts behind [`repository::JobRepository`].

pub mod dashboard;
pub mod domain;
pub mod estimate;
pub mod lien;
pub mod money;
pub mod policy;
pub mod receivables;
pub mod reconcile;
pub mod release;
pub mod repository;
pub mod storage;

#[cfg(test)]
mod tests;

pub use dashboard::{summarize_receivables, JobFinancials, ReceivablesKpis};
pub use domain::{
    is_job_closed_for_collections, is_unpaid_job, AgingBucket, ClaimSnapshot, EstimateLine, JobId,
    JobSnapshot, JobStatus, JobType, LaborType, LienStatus, PayerType, PaymentEntry, Role,
    UnitAmount,
};
pub use estimate::{compute_estimate_totals, EstimateTotals};
pub use lien::{evaluate_lien_risk, LienAssessment, LienRiskInput, LienRiskReason};
pub use money::Cents;
pub use policy::{
    LienThresholds, MarkupTier, PolicyError, RateConfig, ShopPolicy, StoragePolicy,
    StoragePolicyMode,
};
pub use receivables::{
    compute_aging_bucket, compute_balance, compute_short_pay, determine_aging_anchor,
    sum_by_payer, PayerTotals,
};
pub use reconcile::{ReconcileError, ReconcileOutcome, ReconcileService};
pub use release::{can_deliver_vehicle, ReleaseDecision, ReleaseRequest};
pub use repository::{
    JobRepository, LienCaseRecord, MemoryJobRepository, RepositoryError, StorageAccrualRecord,
};
pub use storage::{compute_storage_accrual, StorageAccrual, StorageTerms};

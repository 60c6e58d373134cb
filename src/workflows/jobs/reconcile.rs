use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{JobId, JobSnapshot, JobType, LienStatus};
use super::lien::{evaluate_lien_risk, LienRiskInput, LienRiskReason};
use super::money::Cents;
use super::policy::{ShopPolicy, StoragePolicyMode};
use super::receivables::{compute_balance, sum_by_payer};
use super::repository::{JobRepository, LienCaseRecord, RepositoryError, StorageAccrualRecord};
use super::storage::{compute_storage_accrual, StorageTerms};

/// Failure conditions at the workflow boundary. The engine itself is total;
/// only missing preconditions and repository I/O can fail here.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    /// Distinct from a repository failure: the shop has no policy configured
    /// and the workflow cannot compute without thresholds and rates.
    #[error("shop policy configuration missing")]
    PolicyMissing,
    #[error("job {0} not found")]
    JobNotFound(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// What a reconciliation pass computed. Callers that need current figures
/// later recompute rather than trusting a cached copy of this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileOutcome {
    pub balance_cents: Cents,
    pub storage_billable_days: i64,
    pub lien_status: LienStatus,
    #[serde(default)]
    pub lien_reason: Option<LienRiskReason>,
}

fn storage_policy_applies(mode: StoragePolicyMode, job_type: JobType, balance_cents: Cents) -> bool {
    match mode {
        StoragePolicyMode::All => true,
        StoragePolicyMode::TowStorageOnly => job_type == JobType::TowStorage,
        StoragePolicyMode::UnpaidOnly => balance_cents > 0,
    }
}

/// Recomputes a job's derived financial state and writes it back. Safe to
/// call after every mutation: the result is a function of current stored
/// state, so repeated runs converge and concurrent runs settle on
/// last-write-wins.
pub struct ReconcileService<R> {
    repository: Arc<R>,
}

impl<R> ReconcileService<R>
where
    R: JobRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn reconcile(
        &self,
        job_id: &JobId,
        today: NaiveDate,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        let policy = self
            .repository
            .load_policy()?
            .ok_or(ReconcileError::PolicyMissing)?;
        let job = self
            .repository
            .fetch_job(job_id)?
            .ok_or_else(|| ReconcileError::JobNotFound(job_id.0.clone()))?;

        let paid = sum_by_payer(&job.payments);
        let balance_cents = compute_balance(job.total_written_cents, paid.total_cents);

        let storage_billable_days =
            self.refresh_storage_accrual(&job, &policy, balance_cents, today)?;

        let assessment = evaluate_lien_risk(
            &LienRiskInput {
                balance_cents,
                completed_date: job.completed_date,
                delivered_date: job.delivered_date,
                storage_billable_days,
            },
            &policy.lien,
            today,
        );

        self.repository.upsert_lien_case(
            job_id,
            LienCaseRecord {
                status: assessment.status,
                reason: assessment.reason,
            },
        )?;

        debug!(
            job = %job_id.0,
            balance_cents,
            storage_billable_days,
            lien_status = ?assessment.status,
            "reconciled job financials"
        );

        Ok(ReconcileOutcome {
            balance_cents,
            storage_billable_days,
            lien_status: assessment.status,
            lien_reason: assessment.reason,
        })
    }

    /// Returns the billable days feeding the lien evaluation. Zero when the
    /// policy does not bill this job this cycle; in that case any existing
    /// accrual record is overwritten as inactive with zeroed figures so the
    /// old amount never reads as still owed.
    fn refresh_storage_accrual(
        &self,
        job: &JobSnapshot,
        policy: &ShopPolicy,
        balance_cents: Cents,
        today: NaiveDate,
    ) -> Result<i64, ReconcileError> {
        if let Some(completed) = job.completed_date {
            if storage_policy_applies(policy.storage.applies, job.job_type, balance_cents) {
                let start_date = job.storage_start_date.unwrap_or(completed);
                let accrual = compute_storage_accrual(
                    &StorageTerms {
                        start_date,
                        end_date: job.delivered_date,
                        grace_days: policy.storage.grace_days,
                        daily_rate_cents: policy.storage.daily_rate_cents,
                    },
                    today,
                );

                self.repository.upsert_storage_accrual(
                    &job.id,
                    StorageAccrualRecord {
                        start_date,
                        daily_rate_cents: policy.storage.daily_rate_cents,
                        total_days: accrual.total_days,
                        billable_days: accrual.billable_days,
                        total_accrued_cents: accrual.total_accrued_cents,
                        active: true,
                    },
                )?;

                return Ok(accrual.billable_days);
            }
        }

        if let Some(existing) = self.repository.fetch_storage_accrual(&job.id)? {
            if existing.active {
                self.repository.upsert_storage_accrual(
                    &job.id,
                    StorageAccrualRecord {
                        total_days: 0,
                        billable_days: 0,
                        total_accrued_cents: 0,
                        active: false,
                        ..existing
                    },
                )?;
            }
        }

        Ok(0)
    }
}

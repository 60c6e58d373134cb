use std::collections::HashMap;
use std::sync::Mutex;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{JobId, JobSnapshot, LienStatus};
use super::lien::LienRiskReason;
use super::money::Cents;
use super::policy::ShopPolicy;

/// Persisted storage accrual for a job, overwritten whole on each
/// reconciliation. `active: false` records that the policy stopped applying
/// and the previous figures no longer bill, instead of leaving stale numbers
/// readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageAccrualRecord {
    pub start_date: NaiveDate,
    pub daily_rate_cents: Cents,
    pub total_days: i64,
    pub billable_days: i64,
    pub total_accrued_cents: Cents,
    pub active: bool,
}

/// Persisted lien case for a job. Only ever overwritten, never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LienCaseRecord {
    pub status: LienStatus,
    #[serde(default)]
    pub reason: Option<LienRiskReason>,
}

/// Storage abstraction so the reconciliation workflow can be exercised in
/// isolation. Implementations expose plain "read current, write new"
/// operations; the workflow owns no other persistence.
pub trait JobRepository: Send + Sync {
    fn load_policy(&self) -> Result<Option<ShopPolicy>, RepositoryError>;
    fn fetch_job(&self, id: &JobId) -> Result<Option<JobSnapshot>, RepositoryError>;
    fn fetch_storage_accrual(
        &self,
        id: &JobId,
    ) -> Result<Option<StorageAccrualRecord>, RepositoryError>;
    fn upsert_storage_accrual(
        &self,
        id: &JobId,
        record: StorageAccrualRecord,
    ) -> Result<(), RepositoryError>;
    fn fetch_lien_case(&self, id: &JobId) -> Result<Option<LienCaseRecord>, RepositoryError>;
    fn upsert_lien_case(&self, id: &JobId, record: LienCaseRecord)
        -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

#[derive(Default)]
struct MemoryState {
    policy: Option<ShopPolicy>,
    jobs: HashMap<JobId, JobSnapshot>,
    storage_accruals: HashMap<JobId, StorageAccrualRecord>,
    lien_cases: HashMap<JobId, LienCaseRecord>,
}

/// Mutex-guarded in-memory repository backing the CLI demo and tests.
#[derive(Default)]
pub struct MemoryJobRepository {
    state: Mutex<MemoryState>,
}

impl MemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_policy(&self, policy: ShopPolicy) {
        self.lock().policy = Some(policy);
    }

    pub fn insert_job(&self, snapshot: JobSnapshot) {
        self.lock().jobs.insert(snapshot.id.clone(), snapshot);
    }

    /// Peek at the stored accrual, mainly for assertions and demo output.
    pub fn storage_accrual(&self, id: &JobId) -> Option<StorageAccrualRecord> {
        self.lock().storage_accruals.get(id).copied()
    }

    pub fn lien_case(&self, id: &JobId) -> Option<LienCaseRecord> {
        self.lock().lien_cases.get(id).copied()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().expect("repository mutex poisoned")
    }
}

impl JobRepository for MemoryJobRepository {
    fn load_policy(&self) -> Result<Option<ShopPolicy>, RepositoryError> {
        Ok(self.lock().policy.clone())
    }

    fn fetch_job(&self, id: &JobId) -> Result<Option<JobSnapshot>, RepositoryError> {
        Ok(self.lock().jobs.get(id).cloned())
    }

    fn fetch_storage_accrual(
        &self,
        id: &JobId,
    ) -> Result<Option<StorageAccrualRecord>, RepositoryError> {
        Ok(self.lock().storage_accruals.get(id).copied())
    }

    fn upsert_storage_accrual(
        &self,
        id: &JobId,
        record: StorageAccrualRecord,
    ) -> Result<(), RepositoryError> {
        self.lock().storage_accruals.insert(id.clone(), record);
        Ok(())
    }

    fn fetch_lien_case(&self, id: &JobId) -> Result<Option<LienCaseRecord>, RepositoryError> {
        Ok(self.lock().lien_cases.get(id).copied())
    }

    fn upsert_lien_case(
        &self,
        id: &JobId,
        record: LienCaseRecord,
    ) -> Result<(), RepositoryError> {
        self.lock().lien_cases.insert(id.clone(), record);
        Ok(())
    }
}

use std::sync::Arc;

use chrono::NaiveDate;

use crate::workflows::jobs::domain::{
    JobId, JobSnapshot, JobStatus, JobType, PayerType, PaymentEntry, UnitAmount,
};
use crate::workflows::jobs::policy::{
    LienThresholds, MarkupTier, RateConfig, ShopPolicy, StoragePolicy, StoragePolicyMode,
};
use crate::workflows::jobs::reconcile::ReconcileService;
use crate::workflows::jobs::repository::{
    JobRepository, LienCaseRecord, MemoryJobRepository, RepositoryError, StorageAccrualRecord,
};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Flat-tier rate card matching the worked pricing example.
pub(super) fn flat_rate_config() -> RateConfig {
    RateConfig {
        body_labor_rate_cents: 7500,
        paint_labor_rate_cents: 8000,
        mech_labor_rate_cents: 9000,
        detail_labor_rate_cents: 5000,
        parts_markup_tiers: vec![MarkupTier {
            min_cents: 0,
            max_cents: None,
            markup_percent: 20.0,
        }],
        sublet_markup_percent: 10.0,
        tax_rate_percent: Some(8.0),
    }
}

pub(super) fn tiered_rate_config() -> RateConfig {
    RateConfig {
        parts_markup_tiers: vec![
            MarkupTier {
                min_cents: 0,
                max_cents: Some(10_000),
                markup_percent: 30.0,
            },
            MarkupTier {
                min_cents: 10_001,
                max_cents: Some(50_000),
                markup_percent: 20.0,
            },
        ],
        ..flat_rate_config()
    }
}

pub(super) fn unit_cost(quantity: f64, unit_cost_cents: i64) -> UnitAmount {
    UnitAmount {
        quantity,
        unit_price_cents: None,
        unit_cost_cents: Some(unit_cost_cents),
    }
}

pub(super) fn unit_price(quantity: f64, unit_price_cents: i64) -> UnitAmount {
    UnitAmount {
        quantity,
        unit_price_cents: Some(unit_price_cents),
        unit_cost_cents: None,
    }
}

pub(super) fn payment(payer: PayerType, amount_cents: i64) -> PaymentEntry {
    PaymentEntry {
        payer,
        amount_cents,
    }
}

pub(super) fn shop_policy() -> ShopPolicy {
    ShopPolicy {
        rates: flat_rate_config(),
        storage: StoragePolicy {
            applies: StoragePolicyMode::UnpaidOnly,
            grace_days: 3,
            daily_rate_cents: 5000,
        },
        lien: LienThresholds {
            overdue_days: 15,
            storage_days: 10,
            pickup_days: 7,
        },
        release_control_enabled: true,
    }
}

pub(super) fn job_snapshot(id: &str) -> JobSnapshot {
    JobSnapshot {
        id: JobId(id.to_string()),
        job_type: JobType::Insurance,
        status: JobStatus::Complete,
        total_written_cents: 100_000,
        payments: Vec::new(),
        claim: None,
        completed_date: None,
        delivered_date: None,
        storage_start_date: None,
    }
}

pub(super) fn build_service() -> (ReconcileService<MemoryJobRepository>, Arc<MemoryJobRepository>) {
    let repository = Arc::new(MemoryJobRepository::new());
    let service = ReconcileService::new(repository.clone());
    (service, repository)
}

/// Repository double whose every operation fails, for failure-path coverage.
pub(super) struct UnavailableRepository;

impl JobRepository for UnavailableRepository {
    fn load_policy(&self) -> Result<Option<ShopPolicy>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_job(&self, _id: &JobId) -> Result<Option<JobSnapshot>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_storage_accrual(
        &self,
        _id: &JobId,
    ) -> Result<Option<StorageAccrualRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn upsert_storage_accrual(
        &self,
        _id: &JobId,
        _record: StorageAccrualRecord,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_lien_case(&self, _id: &JobId) -> Result<Option<LienCaseRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn upsert_lien_case(
        &self,
        _id: &JobId,
        _record: LienCaseRecord,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

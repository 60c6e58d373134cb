use serde::{Deserialize, Serialize};

use super::domain::LaborType;
use super::money::Cents;

/// Rates and markup rules an estimate is priced against. Estimates snapshot
/// these at save time, so the engine takes them as an explicit argument
/// rather than reading shop-wide state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateConfig {
    pub body_labor_rate_cents: Cents,
    pub paint_labor_rate_cents: Cents,
    pub mech_labor_rate_cents: Cents,
    pub detail_labor_rate_cents: Cents,
    pub parts_markup_tiers: Vec<MarkupTier>,
    pub sublet_markup_percent: f64,
    #[serde(default)]
    pub tax_rate_percent: Option<f64>,
}

impl RateConfig {
    pub fn labor_rate_cents(&self, labor_type: LaborType) -> Cents {
        match labor_type {
            LaborType::Body => self.body_labor_rate_cents,
            LaborType::Paint => self.paint_labor_rate_cents,
            LaborType::Mech => self.mech_labor_rate_cents,
            LaborType::Detail => self.detail_labor_rate_cents,
        }
    }
}

/// One band of the parts markup schedule. `max_cents: None` means open-ended.
/// The first tier where `min <= cost <= max` wins; a cost matching no tier
/// passes through without markup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkupTier {
    pub min_cents: Cents,
    #[serde(default)]
    pub max_cents: Option<Cents>,
    pub markup_percent: f64,
}

/// Which jobs the storage policy bills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoragePolicyMode {
    All,
    TowStorageOnly,
    UnpaidOnly,
}

/// Shop-wide storage billing defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoragePolicy {
    pub applies: StoragePolicyMode,
    pub grace_days: i64,
    pub daily_rate_cents: Cents,
}

/// Day thresholds that move a lien case to `Watch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LienThresholds {
    pub overdue_days: i64,
    pub storage_days: i64,
    pub pickup_days: i64,
}

/// The full shop policy, threaded explicitly into every engine call so the
/// calculations stay testable with no ambient state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopPolicy {
    pub rates: RateConfig,
    pub storage: StoragePolicy,
    pub lien: LienThresholds,
    pub release_control_enabled: bool,
}

impl Default for ShopPolicy {
    /// Seed values a new shop starts with before touching settings.
    fn default() -> Self {
        Self {
            rates: RateConfig {
                body_labor_rate_cents: 7500,
                paint_labor_rate_cents: 8000,
                mech_labor_rate_cents: 9800,
                detail_labor_rate_cents: 5500,
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
                    MarkupTier {
                        min_cents: 50_001,
                        max_cents: None,
                        markup_percent: 12.0,
                    },
                ],
                sublet_markup_percent: 15.0,
                tax_rate_percent: Some(8.0),
            },
            storage: StoragePolicy {
                applies: StoragePolicyMode::UnpaidOnly,
                grace_days: 3,
                daily_rate_cents: 6500,
            },
            lien: LienThresholds {
                overdue_days: 15,
                storage_days: 10,
                pickup_days: 7,
            },
            release_control_enabled: true,
        }
    }
}

impl ShopPolicy {
    /// Parse and validate a policy document in one step; a policy that loads
    /// is a policy every use site can trust.
    pub fn from_json(raw: &str) -> Result<Self, PolicyError> {
        let policy: Self = serde_json::from_str(raw)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        for (field, value) in [
            ("body_labor_rate_cents", self.rates.body_labor_rate_cents),
            ("paint_labor_rate_cents", self.rates.paint_labor_rate_cents),
            ("mech_labor_rate_cents", self.rates.mech_labor_rate_cents),
            ("detail_labor_rate_cents", self.rates.detail_labor_rate_cents),
            ("storage.daily_rate_cents", self.storage.daily_rate_cents),
        ] {
            if value < 0 {
                return Err(PolicyError::NegativeAmount { field });
            }
        }

        if self.rates.sublet_markup_percent < 0.0 {
            return Err(PolicyError::NegativePercent {
                field: "sublet_markup_percent",
            });
        }
        if self.rates.tax_rate_percent.unwrap_or(0.0) < 0.0 {
            return Err(PolicyError::NegativePercent {
                field: "tax_rate_percent",
            });
        }

        let mut previous_max: Option<Cents> = None;
        for (index, tier) in self.rates.parts_markup_tiers.iter().enumerate() {
            if tier.markup_percent < 0.0 {
                return Err(PolicyError::NegativePercent {
                    field: "parts_markup_tiers.markup_percent",
                });
            }
            if let Some(max) = tier.max_cents {
                if max < tier.min_cents {
                    return Err(PolicyError::InvertedTier { index });
                }
            }
            if let Some(previous) = previous_max {
                if tier.min_cents <= previous {
                    return Err(PolicyError::OverlappingTiers { index });
                }
            } else if index > 0 {
                // A tier after an open-ended one can never match.
                return Err(PolicyError::OverlappingTiers { index });
            }
            previous_max = tier.max_cents;
        }

        for (field, value) in [
            ("lien.overdue_days", self.lien.overdue_days),
            ("lien.storage_days", self.lien.storage_days),
            ("lien.pickup_days", self.lien.pickup_days),
            ("storage.grace_days", self.storage.grace_days),
        ] {
            if value < 0 {
                return Err(PolicyError::NegativeDays { field });
            }
        }

        Ok(())
    }
}

/// Rejection reasons raised when a policy document fails load-time checks.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("policy document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must not be negative")]
    NegativeAmount { field: &'static str },
    #[error("{field} must not be negative")]
    NegativePercent { field: &'static str },
    #[error("{field} must not be negative")]
    NegativeDays { field: &'static str },
    #[error("parts markup tier {index} has max below min")]
    InvertedTier { index: usize },
    #[error("parts markup tier {index} overlaps or follows an open-ended tier")]
    OverlappingTiers { index: usize },
}

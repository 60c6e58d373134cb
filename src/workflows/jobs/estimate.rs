use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{EstimateLine, LaborType};
use super::money::{round_cents, Cents};
use super::policy::{MarkupTier, RateConfig};

/// Derived totals for an estimate. Recomputed wholesale on every save,
/// never patched incrementally, so the stored grand total can always be
/// reproduced from the line items and rate snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateTotals {
    pub labor_by_type: BTreeMap<LaborType, Cents>,
    pub labor_subtotal_cents: Cents,
    pub parts_subtotal_cents: Cents,
    pub sublet_subtotal_cents: Cents,
    pub materials_fees_subtotal_cents: Cents,
    pub tax_cents: Cents,
    pub grand_total_cents: Cents,
}

fn apply_tier_markup(cost_cents: Cents, tiers: &[MarkupTier]) -> Cents {
    let tier = tiers.iter().find(|tier| {
        cost_cents >= tier.min_cents && tier.max_cents.map_or(true, |max| cost_cents <= max)
    });
    match tier {
        Some(tier) => round_cents(cost_cents as f64 * (1.0 + tier.markup_percent / 100.0)),
        None => cost_cents,
    }
}

/// Price a set of estimate lines against a rate snapshot.
///
/// Pure and total: malformed numeric inputs price as zero, and every
/// multiplicative step rounds at the cent boundary before accumulating.
pub fn compute_estimate_totals(lines: &[EstimateLine], config: &RateConfig) -> EstimateTotals {
    let mut labor_by_type: BTreeMap<LaborType, Cents> = LaborType::ordered()
        .into_iter()
        .map(|labor_type| (labor_type, 0))
        .collect();
    let mut parts_subtotal_cents: Cents = 0;
    let mut sublet_subtotal_cents: Cents = 0;
    let mut materials_fees_subtotal_cents: Cents = 0;
    let mut tax_base_cents: Cents = 0;

    for line in lines {
        match line {
            EstimateLine::Labor {
                labor_type,
                hours,
                quantity,
            } => {
                let labor_type = labor_type.unwrap_or(LaborType::Body);
                let hours = hours.unwrap_or(*quantity);
                let hours = if hours.is_finite() { hours } else { 0.0 };
                let line_total = round_cents(hours * config.labor_rate_cents(labor_type) as f64);
                *labor_by_type.entry(labor_type).or_insert(0) += line_total;
                tax_base_cents += line_total;
            }
            EstimateLine::Parts(amount) => {
                let marked_up =
                    apply_tier_markup(amount.raw_total_cents(), &config.parts_markup_tiers);
                parts_subtotal_cents += marked_up;
                tax_base_cents += marked_up;
            }
            EstimateLine::Sublet(amount) => {
                let marked_up = round_cents(
                    amount.raw_total_cents() as f64 * (1.0 + config.sublet_markup_percent / 100.0),
                );
                sublet_subtotal_cents += marked_up;
                tax_base_cents += marked_up;
            }
            EstimateLine::Materials(amount)
            | EstimateLine::Fee(amount)
            | EstimateLine::Storage(amount) => {
                let raw = amount.raw_total_cents();
                materials_fees_subtotal_cents += raw;
                tax_base_cents += raw;
            }
            EstimateLine::Discount(amount) => {
                let signed = -amount.raw_total_cents().abs();
                materials_fees_subtotal_cents += signed;
                tax_base_cents += signed;
            }
            // Hand-entered tax rides along in the materials/fees bucket but
            // never feeds the automatic tax base.
            EstimateLine::ManualTax(amount) => {
                materials_fees_subtotal_cents += amount.raw_total_cents();
            }
        }
    }

    let labor_subtotal_cents: Cents = labor_by_type.values().sum();
    let tax_cents = round_cents(
        tax_base_cents as f64 * config.tax_rate_percent.unwrap_or(0.0) / 100.0,
    )
    .max(0);
    let grand_total_cents = labor_subtotal_cents
        + parts_subtotal_cents
        + sublet_subtotal_cents
        + materials_fees_subtotal_cents
        + tax_cents;

    EstimateTotals {
        labor_by_type,
        labor_subtotal_cents,
        parts_subtotal_cents,
        sublet_subtotal_cents,
        materials_fees_subtotal_cents,
        tax_cents,
        grand_total_cents,
    }
}

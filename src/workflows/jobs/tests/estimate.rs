use super::common::*;
use crate::workflows::jobs::domain::{EstimateLine, LaborType};
use crate::workflows::jobs::estimate::compute_estimate_totals;

#[test]
fn prices_labor_parts_sublet_fee_and_tax() {
    let lines = vec![
        EstimateLine::Labor {
            labor_type: Some(LaborType::Body),
            hours: Some(2.0),
            quantity: 2.0,
        },
        EstimateLine::Parts(unit_cost(1.0, 10_000)),
        EstimateLine::Sublet(unit_cost(1.0, 20_000)),
        EstimateLine::Fee(unit_price(1.0, 3000)),
    ];

    let totals = compute_estimate_totals(&lines, &flat_rate_config());

    assert_eq!(totals.labor_subtotal_cents, 15_000);
    assert_eq!(totals.parts_subtotal_cents, 12_000);
    assert_eq!(totals.sublet_subtotal_cents, 22_000);
    assert_eq!(totals.materials_fees_subtotal_cents, 3000);
    // tax base 52_000 at 8%
    assert_eq!(totals.tax_cents, 4160);
    assert_eq!(totals.grand_total_cents, 56_160);
}

#[test]
fn labor_hours_fall_back_to_quantity() {
    let lines = vec![EstimateLine::Labor {
        labor_type: Some(LaborType::Paint),
        hours: None,
        quantity: 1.5,
    }];

    let totals = compute_estimate_totals(&lines, &flat_rate_config());

    assert_eq!(totals.labor_by_type[&LaborType::Paint], 12_000);
    assert_eq!(totals.labor_subtotal_cents, 12_000);
}

#[test]
fn unset_labor_type_defaults_to_body() {
    let lines = vec![EstimateLine::Labor {
        labor_type: None,
        hours: Some(1.0),
        quantity: 1.0,
    }];

    let totals = compute_estimate_totals(&lines, &flat_rate_config());

    assert_eq!(totals.labor_by_type[&LaborType::Body], 7500);
}

#[test]
fn tier_boundary_belongs_to_the_lower_tier() {
    // 10_000 sits exactly on the first tier's max and takes its 30% markup.
    let at_boundary = compute_estimate_totals(
        &[EstimateLine::Parts(unit_cost(1.0, 10_000))],
        &tiered_rate_config(),
    );
    assert_eq!(at_boundary.parts_subtotal_cents, 13_000);

    let past_boundary = compute_estimate_totals(
        &[EstimateLine::Parts(unit_cost(1.0, 10_001))],
        &tiered_rate_config(),
    );
    assert_eq!(past_boundary.parts_subtotal_cents, 12_001);
}

#[test]
fn unmatched_part_cost_passes_through_unmarked() {
    // Both tiers top out at 50_000.
    let totals = compute_estimate_totals(
        &[EstimateLine::Parts(unit_cost(1.0, 60_000))],
        &tiered_rate_config(),
    );

    assert_eq!(totals.parts_subtotal_cents, 60_000);
}

#[test]
fn discount_subtracts_its_absolute_value() {
    let lines = vec![
        EstimateLine::Fee(unit_price(1.0, 10_000)),
        EstimateLine::Discount(unit_price(1.0, -2500)),
    ];

    let totals = compute_estimate_totals(&lines, &flat_rate_config());

    assert_eq!(totals.materials_fees_subtotal_cents, 7500);
    assert_eq!(totals.tax_cents, 600);
}

#[test]
fn manual_tax_lines_do_not_feed_the_tax_base() {
    let lines = vec![
        EstimateLine::Fee(unit_price(1.0, 10_000)),
        EstimateLine::ManualTax(unit_price(1.0, 800)),
    ];

    let totals = compute_estimate_totals(&lines, &flat_rate_config());

    assert_eq!(totals.materials_fees_subtotal_cents, 10_800);
    // Automatic tax only on the fee.
    assert_eq!(totals.tax_cents, 800);
    assert_eq!(totals.grand_total_cents, 11_600);
}

#[test]
fn automatic_tax_never_goes_negative() {
    let lines = vec![EstimateLine::Discount(unit_price(1.0, 5000))];

    let totals = compute_estimate_totals(&lines, &flat_rate_config());

    assert_eq!(totals.materials_fees_subtotal_cents, -5000);
    assert_eq!(totals.tax_cents, 0);
    assert_eq!(totals.grand_total_cents, -5000);
}

#[test]
fn no_tax_rate_means_no_automatic_tax() {
    let mut config = flat_rate_config();
    config.tax_rate_percent = None;

    let totals =
        compute_estimate_totals(&[EstimateLine::Fee(unit_price(1.0, 10_000))], &config);

    assert_eq!(totals.tax_cents, 0);
    assert_eq!(totals.grand_total_cents, 10_000);
}

#[test]
fn materials_only_estimate_matches_subtotal_plus_tax() {
    let lines = vec![
        EstimateLine::Materials(unit_price(3.0, 1500)),
        EstimateLine::Storage(unit_price(2.0, 6500)),
        EstimateLine::Fee(unit_price(1.0, 1200)),
    ];

    let totals = compute_estimate_totals(&lines, &flat_rate_config());

    assert_eq!(totals.labor_subtotal_cents, 0);
    assert_eq!(totals.parts_subtotal_cents, 0);
    assert_eq!(totals.sublet_subtotal_cents, 0);
    assert_eq!(
        totals.grand_total_cents,
        totals.materials_fees_subtotal_cents + totals.tax_cents
    );
}

#[test]
fn empty_estimate_totals_to_zero() {
    let totals = compute_estimate_totals(&[], &flat_rate_config());

    assert_eq!(totals.grand_total_cents, 0);
    assert_eq!(totals.tax_cents, 0);
    assert!(totals.labor_by_type.values().all(|cents| *cents == 0));
}

#[test]
fn non_finite_quantities_price_as_zero() {
    let lines = vec![
        EstimateLine::Parts(unit_cost(f64::NAN, 10_000)),
        EstimateLine::Labor {
            labor_type: None,
            hours: Some(f64::INFINITY),
            quantity: 1.0,
        },
    ];

    let totals = compute_estimate_totals(&lines, &flat_rate_config());

    assert_eq!(totals.grand_total_cents, 0);
}

#[test]
fn sublet_markup_rounds_at_the_cent() {
    let mut config = flat_rate_config();
    config.sublet_markup_percent = 10.0;
    config.tax_rate_percent = None;

    // 105 * 1.1 = 115.5, rounds half away from zero to 116.
    let totals = compute_estimate_totals(&[EstimateLine::Sublet(unit_cost(1.0, 105))], &config);

    assert_eq!(totals.sublet_subtotal_cents, 116);
}

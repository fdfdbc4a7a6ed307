//! Scenario evaluation tests.
//!
//! The fixture (SimContext::default_test) has three SPM units:
//! adult_pop = 65, child_pop = 25, tax base = $1.39M,
//! baseline poverty gap = $90k, baseline poverty rate = 55.56%.

use ubisim_core::context::SimContext;
use ubisim_core::metrics;
use ubisim_core::simulator::{reassess, simulate, FundingSplit};

// Funding in billions equal to the fixture's full tax base.
const FULL_TAX_BASE_BILLIONS: f64 = 1_390_000.0 / 1e9;

fn approx(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn population_constants_are_conserved() {
    let ctx = SimContext::default_test();
    let person_weight_sum: f64 = ctx.persons.iter().map(|p| p.weight).sum();

    assert!(approx(ctx.adult_pop + ctx.child_pop, person_weight_sum, 1e-12));
    assert!(approx(ctx.adult_pop, 65.0, 1e-12));
    assert!(approx(ctx.child_pop, 25.0, 1e-12));
    assert!(approx(ctx.total_taxable_income, 1_390_000.0, 1e-12));
}

#[test]
fn zero_funding_reproduces_baseline_for_every_split() {
    let ctx = SimContext::default_test();
    for pct in [0.0, 25.0, 50.0, 100.0] {
        let outcome = simulate(&ctx, 0.0, FundingSplit::ShareOfFunding(pct));
        assert_eq!(outcome.adult_ubi, 0.0);
        assert_eq!(outcome.child_ubi, 0.0);
        assert!(approx(outcome.poverty_gap, ctx.baseline_poverty_gap, 1e-12));
        assert!(approx(outcome.poverty_rate, ctx.baseline_poverty_rate, 1e-12));
    }
}

#[test]
fn zero_funding_zero_split_matches_unmodified_dataset() {
    let ctx = SimContext::default_test();
    let outcome = simulate(&ctx, 0.0, FundingSplit::ShareOfFunding(0.0));

    assert_eq!(outcome.adult_ubi, 0.0);
    assert_eq!(outcome.child_ubi, 0.0);
    // 50 of 90 weighted persons live in units below threshold.
    assert!(approx(outcome.poverty_rate, 50.0 / 90.0 * 100.0, 1e-12));
    assert!(approx(outcome.poverty_gap, 90_000.0, 1e-12));
}

/// Total tax collected equals total transfer paid for every scenario,
/// since both are derived from the same funding amount.
#[test]
fn budget_balances_per_scenario() {
    let ctx = SimContext::default_test();
    for (funding_billions, split) in [
        (0.0005, FundingSplit::ShareOfFunding(40.0)),
        (0.001, FundingSplit::ShareOfFunding(0.0)),
        (0.001, FundingSplit::PerCapitaRatio(50.0)),
        (FULL_TAX_BASE_BILLIONS, FundingSplit::PerCapitaRatio(100.0)),
    ] {
        let funding = funding_billions * 1e9;
        let schedule = split.schedule(&ctx, funding);
        let tax_rate = funding / ctx.total_taxable_income;

        let tax_total: f64 = ctx
            .units
            .iter()
            .map(|u| u.weight * tax_rate * u.taxable_income)
            .sum();
        let transfer_total: f64 = ctx
            .units
            .iter()
            .map(|u| {
                u.weight * (u.children * schedule.child_ubi + u.adults * schedule.adult_ubi)
            })
            .sum();

        assert!(
            approx(tax_total, transfer_total, 1e-9),
            "tax={tax_total}, transfers={transfer_total}"
        );
        assert!(approx(tax_total, funding, 1e-9));
    }
}

#[test]
fn poverty_gap_weakly_decreases_in_funding() {
    let ctx = SimContext::default_test();
    let split = FundingSplit::ShareOfFunding(50.0);

    let mut previous = f64::INFINITY;
    for step in 0..=10 {
        let funding_billions = step as f64 * 0.0001; // up to $1M, well below saturation
        let gap = simulate(&ctx, funding_billions, split).poverty_gap;
        assert!(
            gap <= previous + 1e-6,
            "gap rose from {previous} to {gap} at {funding_billions}B"
        );
        previous = gap;
    }
}

#[test]
fn full_tax_base_funding_taxes_away_all_taxable_income() {
    let ctx = SimContext::default_test();
    let split = FundingSplit::ShareOfFunding(50.0);
    let funding = FULL_TAX_BASE_BILLIONS * 1e9;
    let schedule = split.schedule(&ctx, funding);
    let tax_rate = funding / ctx.total_taxable_income;
    assert!(approx(tax_rate, 1.0, 1e-9));

    // With tax_rate = 1 every unit pays exactly its taxable income.
    let expected = reassess(&ctx, |u| {
        u.children * schedule.child_ubi + u.adults * schedule.adult_ubi - u.taxable_income
    });
    let outcome = simulate(&ctx, FULL_TAX_BASE_BILLIONS, split);
    assert!(approx(
        outcome.poverty_gap,
        metrics::poverty_gap(&ctx.units, &expected),
        1e-9
    ));
}

#[test]
fn gini_stays_within_unit_interval() {
    let ctx = SimContext::default_test();
    for funding_billions in [0.0, 0.0005, 0.001] {
        for pct in [0.0, 50.0, 100.0] {
            for split in [
                FundingSplit::ShareOfFunding(pct),
                FundingSplit::PerCapitaRatio(pct),
            ] {
                let outcome = simulate(&ctx, funding_billions, split);
                assert!(
                    (0.0..=1.0).contains(&outcome.gini),
                    "gini {} out of range for {funding_billions}B / {split:?}",
                    outcome.gini
                );
            }
        }
    }
}

#[test]
fn share_of_funding_splits_the_pools() {
    let ctx = SimContext::default_test();
    let funding = 100_000.0;
    let schedule = FundingSplit::ShareOfFunding(40.0).schedule(&ctx, funding);

    assert!(approx(schedule.child_ubi, 0.4 * funding / ctx.child_pop, 1e-12));
    assert!(approx(
        schedule.adult_ubi,
        0.6 * funding / ctx.adult_pop,
        1e-12
    ));
}

#[test]
fn per_capita_ratio_exhausts_the_funding() {
    let ctx = SimContext::default_test();
    let funding = 100_000.0;

    let equal = FundingSplit::PerCapitaRatio(100.0).schedule(&ctx, funding);
    assert!(approx(equal.adult_ubi, equal.child_ubi, 1e-12));
    assert!(approx(equal.adult_ubi, funding / ctx.total_pop, 1e-12));

    let adults_only = FundingSplit::PerCapitaRatio(0.0).schedule(&ctx, funding);
    assert_eq!(adults_only.child_ubi, 0.0);
    assert!(approx(adults_only.adult_ubi, funding / ctx.adult_pop, 1e-12));

    let half = FundingSplit::PerCapitaRatio(50.0).schedule(&ctx, funding);
    assert!(approx(half.child_ubi, 0.5 * half.adult_ubi, 1e-12));
    let spent = half.adult_ubi * ctx.adult_pop + half.child_ubi * ctx.child_pop;
    assert!(approx(spent, funding, 1e-9));
}

#[test]
fn transfers_are_non_negative_for_non_negative_funding() {
    let ctx = SimContext::default_test();
    for funding_billions in [0.0, 0.0001, 0.01] {
        for pct in [0.0, 37.0, 100.0] {
            let outcome = simulate(&ctx, funding_billions, FundingSplit::ShareOfFunding(pct));
            assert!(outcome.adult_ubi >= 0.0);
            assert!(outcome.child_ubi >= 0.0);
        }
    }
}

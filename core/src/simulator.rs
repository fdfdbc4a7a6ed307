//! Policy scenario evaluation.
//!
//! A scenario is a (funding level, demographic split) pair. Evaluation is
//! pure: the per-unit working vectors are rebuilt on every call from the
//! immutable [`SimContext`], so scenarios may safely run in any order or in
//! parallel.

use crate::context::SimContext;
use crate::metrics;
use crate::records::SpmUnit;

/// How total funding is divided between children and adults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FundingSplit {
    /// Percent of total funding earmarked for children; each pool is spread
    /// flat over its population.
    ShareOfFunding(f64),
    /// Child transfer as a percent of the adult transfer; the adult amount
    /// is solved so that both populations together exhaust the funding.
    PerCapitaRatio(f64),
}

/// Flat annual per-capita transfer amounts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferSchedule {
    pub adult_ubi: f64,
    pub child_ubi: f64,
}

impl FundingSplit {
    /// Derive the per-capita transfers that spend `funding` (absolute
    /// currency units) under this split.
    pub fn schedule(&self, ctx: &SimContext, funding: f64) -> TransferSchedule {
        match *self {
            FundingSplit::ShareOfFunding(pct) => {
                let share = pct / 100.0;
                TransferSchedule {
                    adult_ubi: ((1.0 - share) * funding) / ctx.adult_pop,
                    child_ubi: (share * funding) / ctx.child_pop,
                }
            }
            FundingSplit::PerCapitaRatio(pct) => {
                let ratio = pct / 100.0;
                let adult_ubi = funding / (ctx.adult_pop + ctx.child_pop * ratio);
                TransferSchedule {
                    adult_ubi,
                    child_ubi: adult_ubi * ratio,
                }
            }
        }
    }
}

/// The six scalar metrics returned per scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    /// Percent of persons in units below their threshold.
    pub poverty_rate: f64,
    /// Person-weighted Gini of per-capita unit resources.
    pub gini: f64,
    pub poverty_gap: f64,
    /// Fraction of persons whose unit gained resources on net.
    pub percent_better_off: f64,
    pub adult_ubi: f64,
    pub child_ubi: f64,
}

/// Person-weighted poverty rates as fractions, overall and by age group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PovertyRates {
    pub overall: f64,
    pub child: f64,
    pub adult: f64,
}

/// Apply a per-unit net change (transfer minus tax) to baseline resources.
/// The shared transfer-and-reassess step for every program variant.
pub fn reassess(ctx: &SimContext, net: impl Fn(&SpmUnit) -> f64) -> Vec<f64> {
    ctx.units.iter().map(|u| u.resources + net(u)).collect()
}

/// Broadcast reassessed unit resources back to persons and compute the
/// weighted poverty rates.
pub fn poverty_rates(ctx: &SimContext, new_resources: &[f64]) -> PovertyRates {
    let mut poor_w = 0.0;
    let mut child_poor_w = 0.0;
    let mut adult_poor_w = 0.0;
    for (person, &ui) in ctx.persons.iter().zip(&ctx.unit_index) {
        if new_resources[ui] < ctx.units[ui].threshold {
            poor_w += person.weight;
            if person.is_child {
                child_poor_w += person.weight;
            } else {
                adult_poor_w += person.weight;
            }
        }
    }
    PovertyRates {
        overall: poor_w / ctx.total_pop,
        child: child_poor_w / ctx.child_pop,
        adult: adult_poor_w / ctx.adult_pop,
    }
}

/// Evaluate one financed-UBI scenario.
///
/// The transfer is financed by a single economy-wide proportional tax on
/// taxable income; `tax_rate = funding / total_taxable_income`, so total tax
/// collected equals total transfer paid for every scenario.
pub fn simulate(ctx: &SimContext, funding_billions: f64, split: FundingSplit) -> Outcome {
    let funding = funding_billions * 1e9;
    let schedule = split.schedule(ctx, funding);
    let tax_rate = funding / ctx.total_taxable_income;

    let new_resources = reassess(ctx, |u| {
        u.children * schedule.child_ubi + u.adults * schedule.adult_ubi
            - tax_rate * u.taxable_income
    });

    let poverty_gap = metrics::poverty_gap(&ctx.units, &new_resources);
    let rates = poverty_rates(ctx, &new_resources);

    // Per-capita resources and winner flags, broadcast one-to-many onto persons.
    let mut better_w = 0.0;
    let mut per_person = Vec::with_capacity(ctx.persons.len());
    let mut person_weights = Vec::with_capacity(ctx.persons.len());
    for (person, &ui) in ctx.persons.iter().zip(&ctx.unit_index) {
        let unit = &ctx.units[ui];
        if new_resources[ui] > unit.resources {
            better_w += person.weight;
        }
        per_person.push(new_resources[ui] / unit.size);
        person_weights.push(person.weight);
    }

    Outcome {
        poverty_rate: rates.overall * 100.0,
        gini: metrics::weighted_gini(&per_person, &person_weights),
        poverty_gap,
        percent_better_off: better_w / ctx.total_pop,
        adult_ubi: schedule.adult_ubi,
        child_ubi: schedule.child_ubi,
    }
}

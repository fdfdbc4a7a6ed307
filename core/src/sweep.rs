//! Grid sweep driver.
//!
//! Evaluates the simulator over the Cartesian product of funding levels and
//! split parameters (funding outer, split inner) and selects the optimal
//! allocation per funding level under three objectives.

use crate::context::SimContext;
use crate::simulator::{self, FundingSplit};

/// Which split parameterization a sweep uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitVariant {
    ShareOfFunding,
    PerCapitaRatio,
}

impl SplitVariant {
    pub fn split(&self, percent: f64) -> FundingSplit {
        match self {
            SplitVariant::ShareOfFunding => FundingSplit::ShareOfFunding(percent),
            SplitVariant::PerCapitaRatio => FundingSplit::PerCapitaRatio(percent),
        }
    }

    /// Column name for the split parameter in exported tables.
    pub fn column(&self) -> &'static str {
        match self {
            SplitVariant::ShareOfFunding => "child_percent_funding",
            SplitVariant::PerCapitaRatio => "child_percent_ubi",
        }
    }
}

/// One evaluated scenario: the swept parameters, the six outcome metrics,
/// and the derived monthly per-capita amounts.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioRow {
    pub funding_billions: f64,
    pub split_percent: f64,
    pub poverty_rate: f64,
    pub gini: f64,
    pub poverty_gap: f64,
    pub percent_better_off: f64,
    pub adult_ubi: f64,
    pub child_ubi: f64,
    pub monthly_child_ubi: i64,
    pub monthly_adult_ubi: i64,
}

/// Inclusive arithmetic grid, e.g. `grid(0.0, 3000.0, 50.0)`.
pub fn grid(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let mut values = Vec::new();
    let mut v = start;
    while v <= stop + step * 1e-9 {
        values.push(v);
        v += step;
    }
    values
}

/// Evaluate every (funding, split) cell; output row order matches the
/// generated product.
pub fn run_sweep(
    ctx: &SimContext,
    funding_grid: &[f64],
    split_grid: &[f64],
    variant: SplitVariant,
) -> Vec<ScenarioRow> {
    let mut rows = Vec::with_capacity(funding_grid.len() * split_grid.len());
    for &funding_billions in funding_grid {
        for &split_percent in split_grid {
            let outcome = simulator::simulate(ctx, funding_billions, variant.split(split_percent));
            rows.push(ScenarioRow {
                funding_billions,
                split_percent,
                poverty_rate: outcome.poverty_rate,
                gini: outcome.gini,
                poverty_gap: outcome.poverty_gap,
                percent_better_off: outcome.percent_better_off,
                adult_ubi: outcome.adult_ubi,
                child_ubi: outcome.child_ubi,
                monthly_child_ubi: monthly(outcome.child_ubi),
                monthly_adult_ubi: monthly(outcome.adult_ubi),
            });
        }
    }
    log::info!(
        "Swept {} scenarios ({} funding levels x {} splits)",
        rows.len(),
        funding_grid.len(),
        split_grid.len()
    );
    rows
}

/// Annual per-capita amount to whole currency units per month.
pub fn monthly(annual: f64) -> i64 {
    (annual / 12.0).round() as i64
}

/// Selection objective for the per-funding-level optimal tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    MinPovertyGap,
    MinGini,
    MaxWinners,
}

/// For each distinct nonzero funding level, the row optimizing `objective`.
///
/// Ties keep the first occurrence for minimization and the last for
/// maximization. Zero-funding rows are excluded here only; they stay in the
/// full sweep tables.
pub fn optimal_by(rows: &[ScenarioRow], objective: Objective) -> Vec<ScenarioRow> {
    let mut fundings: Vec<f64> = Vec::new();
    let mut best: Vec<usize> = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        if row.funding_billions == 0.0 {
            continue;
        }
        match fundings.iter().position(|&f| f == row.funding_billions) {
            None => {
                fundings.push(row.funding_billions);
                best.push(i);
            }
            Some(p) => {
                let incumbent = &rows[best[p]];
                let replace = match objective {
                    Objective::MinPovertyGap => row.poverty_gap < incumbent.poverty_gap,
                    Objective::MinGini => row.gini < incumbent.gini,
                    Objective::MaxWinners => {
                        row.percent_better_off >= incumbent.percent_better_off
                    }
                };
                if replace {
                    best[p] = i;
                }
            }
        }
    }

    let mut pairs: Vec<(f64, usize)> = fundings.into_iter().zip(best).collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
    pairs.into_iter().map(|(_, i)| rows[i].clone()).collect()
}

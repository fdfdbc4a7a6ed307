//! Three-program poverty comparison over a coarse spending range.
//!
//! Unlike the financed sweeps, these programs are transfers only — no
//! offsetting tax — over absolute spending from $0 to $1T in $50B steps.
//! All three reuse the simulator's transfer-and-reassess routine.

use crate::context::SimContext;
use crate::simulator::{self, PovertyRates};

pub const SPENDING_MAX: f64 = 1_000_000_000_000.0;
pub const SPENDING_STEP: f64 = 50_000_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Program {
    ChildAllowance,
    AdultUbi,
    AllUbi,
}

pub const PROGRAMS: [Program; 3] = [Program::ChildAllowance, Program::AdultUbi, Program::AllUbi];

impl Program {
    /// Internal key, used as the wide-table column name.
    pub fn key(&self) -> &'static str {
        match self {
            Program::ChildAllowance => "child_allowance",
            Program::AdultUbi => "adult_ubi",
            Program::AllUbi => "all_ubi",
        }
    }

    /// Display label for charts and the long-format table.
    pub fn label(&self) -> &'static str {
        match self {
            Program::ChildAllowance => "Child allowance",
            Program::AdultUbi => "Adult UBI",
            Program::AllUbi => "All UBI",
        }
    }
}

/// Poverty rates under one program at one absolute spending level.
pub fn program_poverty_rates(ctx: &SimContext, program: Program, spending: f64) -> PovertyRates {
    let new_resources = match program {
        Program::ChildAllowance => {
            let per_child = spending / ctx.child_pop;
            simulator::reassess(ctx, |u| u.children * per_child)
        }
        Program::AdultUbi => {
            let per_adult = spending / ctx.adult_pop;
            simulator::reassess(ctx, |u| u.adults * per_adult)
        }
        Program::AllUbi => {
            let per_person = spending / ctx.total_pop;
            simulator::reassess(ctx, |u| (u.children + u.adults) * per_person)
        }
    };
    simulator::poverty_rates(ctx, &new_resources)
}

/// Wide table: one poverty-rate column (fraction, rounded to 3 decimals)
/// per program, one row per spending level.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonTable {
    pub spending_billions: Vec<f64>,
    pub child_allowance: Vec<f64>,
    pub adult_ubi: Vec<f64>,
    pub all_ubi: Vec<f64>,
}

impl ComparisonTable {
    fn column(&self, program: Program) -> &[f64] {
        match program {
            Program::ChildAllowance => &self.child_allowance,
            Program::AdultUbi => &self.adult_ubi,
            Program::AllUbi => &self.all_ubi,
        }
    }
}

/// Overall, child, and adult poverty-rate tables across all three programs.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyComparison {
    pub overall: ComparisonTable,
    pub child: ComparisonTable,
    pub adult: ComparisonTable,
}

pub fn run_comparison(ctx: &SimContext) -> LegacyComparison {
    let levels = spending_levels();
    let spending_billions: Vec<f64> = levels.iter().map(|s| s / 1e9).collect();

    let empty = || ComparisonTable {
        spending_billions: spending_billions.clone(),
        child_allowance: Vec::new(),
        adult_ubi: Vec::new(),
        all_ubi: Vec::new(),
    };
    let mut overall = empty();
    let mut child = empty();
    let mut adult = empty();

    for program in PROGRAMS {
        for &spending in &levels {
            let rates = program_poverty_rates(ctx, program, spending);
            let (o, c, a) = match program {
                Program::ChildAllowance => (
                    &mut overall.child_allowance,
                    &mut child.child_allowance,
                    &mut adult.child_allowance,
                ),
                Program::AdultUbi => (
                    &mut overall.adult_ubi,
                    &mut child.adult_ubi,
                    &mut adult.adult_ubi,
                ),
                Program::AllUbi => {
                    (&mut overall.all_ubi, &mut child.all_ubi, &mut adult.all_ubi)
                }
            };
            o.push(round3(rates.overall));
            c.push(round3(rates.child));
            a.push(round3(rates.adult));
        }
    }

    log::info!(
        "Legacy comparison: {} spending levels x {} programs",
        levels.len(),
        PROGRAMS.len()
    );
    LegacyComparison {
        overall,
        child,
        adult,
    }
}

fn spending_levels() -> Vec<f64> {
    let steps = (SPENDING_MAX / SPENDING_STEP) as usize;
    (0..=steps).map(|i| i as f64 * SPENDING_STEP).collect()
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

/// One row of the long-format charting table.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRow {
    pub spending_in_billions: f64,
    pub ubi_type: String,
    /// Percent (wide-table fraction × 100).
    pub poverty_rate: f64,
}

/// Reshape a wide table to long form, column by column, mapping internal
/// program keys to display labels and scaling rates to percent.
pub fn melt(table: &ComparisonTable) -> Vec<LongRow> {
    let mut rows = Vec::with_capacity(table.spending_billions.len() * PROGRAMS.len());
    for program in PROGRAMS {
        for (&spending, &rate) in table.spending_billions.iter().zip(table.column(program)) {
            rows.push(LongRow {
                spending_in_billions: spending,
                ubi_type: program.label().to_string(),
                poverty_rate: round3(rate) * 100.0,
            });
        }
    }
    rows
}

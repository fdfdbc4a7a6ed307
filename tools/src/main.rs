//! sweep-runner: headless UBI policy sweep runner.
//!
//! Usage:
//!   sweep-runner --out-dir results
//!   sweep-runner --input cps_extract.csv.gz --config sweep.json --no-chart

use anyhow::Result;
use std::env;
use std::path::{Path, PathBuf};
use ubisim_core::{
    config::SweepConfig,
    context::SimContext,
    legacy, loader, report,
    sweep::{self, Objective, SplitVariant},
};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = match flag_value(&args, "--config") {
        Some(path) => SweepConfig::load(path)?,
        None => SweepConfig::default(),
    };
    log::debug!("sweep config: {config:?}");
    let input = flag_value(&args, "--input")
        .map(str::to_string)
        .unwrap_or_else(|| config.data_url.clone());
    let out_dir = PathBuf::from(flag_value(&args, "--out-dir").unwrap_or("."));
    let no_chart = args.iter().any(|a| a == "--no-chart");

    println!("ubisim — sweep-runner");
    println!("  input:    {input}");
    println!("  out_dir:  {}", out_dir.display());
    println!();

    std::fs::create_dir_all(&out_dir)?;

    let persons = if input.starts_with("http://") || input.starts_with("https://") {
        loader::load_persons_from_url(&input)?
    } else {
        loader::load_persons_from_path(Path::new(&input))?
    };
    let ctx = SimContext::from_persons(persons)?;

    // Sweep #1: child share of total funding.
    let funding_grid = config.funding_billions.values();
    let share_grid = config.child_percent_funding.values();
    let summary = sweep::run_sweep(&ctx, &funding_grid, &share_grid, SplitVariant::ShareOfFunding);
    report::write_summary_gz(
        &out_dir.join(&config.funding_summary_name),
        SplitVariant::ShareOfFunding.column(),
        &summary,
    )?;

    // Optimal allocation per funding level, three objectives.
    let optimal_poverty = sweep::optimal_by(&summary, Objective::MinPovertyGap);
    let optimal_inequality = sweep::optimal_by(&summary, Objective::MinGini);
    let optimal_winners = sweep::optimal_by(&summary, Objective::MaxWinners);
    report::write_summary_gz(
        &out_dir.join(&config.optimal_poverty_name),
        SplitVariant::ShareOfFunding.column(),
        &optimal_poverty,
    )?;
    report::write_summary_gz(
        &out_dir.join(&config.optimal_inequality_name),
        SplitVariant::ShareOfFunding.column(),
        &optimal_inequality,
    )?;
    report::write_summary_gz(
        &out_dir.join(&config.optimal_winners_name),
        SplitVariant::ShareOfFunding.column(),
        &optimal_winners,
    )?;

    // Sweep #2: child-to-adult per-capita ratio, written under both names.
    let ratio_grid = config.child_percent_ubi.values();
    let summary2 = sweep::run_sweep(&ctx, &funding_grid, &ratio_grid, SplitVariant::PerCapitaRatio);
    for name in &config.ubi_summary_names {
        report::write_summary_gz(
            &out_dir.join(name),
            SplitVariant::PerCapitaRatio.column(),
            &summary2,
        )?;
    }

    // Legacy three-program comparison and its long-format chart table.
    let comparison = legacy::run_comparison(&ctx);
    let program_overall = legacy::melt(&comparison.overall);
    report::write_long_csv(&out_dir.join(&config.legacy_table_name), &program_overall)?;

    if !no_chart {
        report::render_poverty_chart(
            &out_dir.join(&config.chart_name),
            &program_overall,
            "Overall poverty rate and spending on cash transfer programs",
        )?;
    }

    print_summary(&ctx, &summary, &optimal_poverty);
    Ok(())
}

fn print_summary(ctx: &SimContext, summary: &[sweep::ScenarioRow], optimal: &[sweep::ScenarioRow]) {
    println!("=== RUN SUMMARY ===");
    println!("  persons:              {}", ctx.persons.len());
    println!("  SPM units:            {}", ctx.units.len());
    println!("  adult population:     {:.0}", ctx.adult_pop);
    println!("  child population:     {:.0}", ctx.child_pop);
    println!("  tax base:             ${:.3e}", ctx.total_taxable_income);
    println!("  baseline poverty:     {:.2}%", ctx.baseline_poverty_rate);
    println!("  baseline poverty gap: ${:.3e}", ctx.baseline_poverty_gap);
    println!("  scenarios evaluated:  {}", summary.len());

    if let Some(last) = optimal.last() {
        println!();
        println!("=== OPTIMAL AT ${}B (min poverty gap) ===", last.funding_billions);
        println!("  child share:     {:.0}%", last.split_percent);
        println!("  poverty rate:    {:.2}%", last.poverty_rate);
        println!("  gini:            {:.4}", last.gini);
        println!("  monthly child:   ${}", last.monthly_child_ubi);
        println!("  monthly adult:   ${}", last.monthly_adult_ubi);
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

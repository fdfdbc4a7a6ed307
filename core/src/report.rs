//! Table export and chart rendering.
//!
//! Summary tables are comma-separated and gzip-compressed; the legacy
//! long-format table is plain CSV. The chart is a plotters SVG with the
//! fixed house styling (currency x-labels, percent y-labels, marker+line
//! traces).

use crate::error::{SimError, SimResult};
use crate::legacy::{LongRow, PROGRAMS};
use crate::sweep::ScenarioRow;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use plotters::prelude::*;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

const SUMMARY_COLUMNS: [&str; 10] = [
    "funding_billions",
    "split", // replaced by the sweep's split-column name
    "poverty_rate",
    "gini",
    "poverty_gap",
    "percent_better_off",
    "adult_ubi",
    "child_ubi",
    "monthly_child_ubi",
    "monthly_adult_ubi",
];

/// Write a sweep summary (or optimal-allocation table) as gzipped CSV.
pub fn write_summary_gz(path: &Path, split_column: &str, rows: &[ScenarioRow]) -> SimResult<()> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<&str> = SUMMARY_COLUMNS.to_vec();
    header[1] = split_column;
    wtr.write_record(&header)?;

    for row in rows {
        wtr.write_record([
            row.funding_billions.to_string(),
            row.split_percent.to_string(),
            row.poverty_rate.to_string(),
            row.gini.to_string(),
            row.poverty_gap.to_string(),
            row.percent_better_off.to_string(),
            row.adult_ubi.to_string(),
            row.child_ubi.to_string(),
            row.monthly_child_ubi.to_string(),
            row.monthly_adult_ubi.to_string(),
        ])?;
    }
    let data = wtr
        .into_inner()
        .map_err(|e| SimError::Other(anyhow::anyhow!("CSV buffer flush failed: {e}")))?;

    let mut encoder = GzEncoder::new(File::create(path)?, Compression::default());
    encoder.write_all(&data)?;
    encoder.finish()?;

    log::info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Read a gzipped summary back. Returns the split-column name and the rows;
/// used by replay tooling and the round-trip test.
pub fn read_summary_gz(path: &Path) -> SimResult<(String, Vec<ScenarioRow>)> {
    let mut rdr = csv::Reader::from_reader(GzDecoder::new(File::open(path)?));
    let split_column = rdr
        .headers()?
        .get(1)
        .ok_or_else(|| SimError::MissingColumn("split".to_string()))?
        .to_string();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(ScenarioRow {
            funding_billions: field(&record, 0)?,
            split_percent: field(&record, 1)?,
            poverty_rate: field(&record, 2)?,
            gini: field(&record, 3)?,
            poverty_gap: field(&record, 4)?,
            percent_better_off: field(&record, 5)?,
            adult_ubi: field(&record, 6)?,
            child_ubi: field(&record, 7)?,
            monthly_child_ubi: field(&record, 8)?,
            monthly_adult_ubi: field(&record, 9)?,
        });
    }
    Ok((split_column, rows))
}

fn field<T: FromStr>(record: &csv::StringRecord, idx: usize) -> SimResult<T>
where
    T::Err: std::fmt::Display,
{
    let raw = record
        .get(idx)
        .ok_or_else(|| SimError::MissingColumn(SUMMARY_COLUMNS[idx].to_string()))?;
    raw.parse().map_err(|e| {
        SimError::Other(anyhow::anyhow!(
            "malformed '{}' field '{raw}': {e}",
            SUMMARY_COLUMNS[idx]
        ))
    })
}

/// Write the long-format legacy comparison table, uncompressed.
pub fn write_long_csv(path: &Path, rows: &[LongRow]) -> SimResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["spending_in_billions", "ubi_type", "poverty_rate"])?;
    for row in rows {
        wtr.write_record([
            row.spending_in_billions.to_string(),
            row.ubi_type.clone(),
            row.poverty_rate.to_string(),
        ])?;
    }
    wtr.flush()?;
    log::info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn chart_err<E: std::fmt::Display>(e: E) -> SimError {
    SimError::Other(anyhow::anyhow!("chart rendering failed: {e}"))
}

/// Render the poverty-rate-by-program line chart to an SVG file.
pub fn render_poverty_chart(path: &Path, rows: &[LongRow], title: &str) -> SimResult<()> {
    let x_max = rows
        .iter()
        .map(|r| r.spending_in_billions)
        .fold(0.0, f64::max);
    let y_max = rows.iter().map(|r| r.poverty_rate).fold(0.0, f64::max);

    let root = SVGBackend::new(path, (900, 560)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(56)
        .build_cartesian_2d(0.0..x_max * 1.02, 0.0..y_max * 1.1)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc("Spending in billions")
        .y_desc("SPM poverty rate")
        .x_label_formatter(&|v| format!("${v:.0}B"))
        .y_label_formatter(&|v| format!("{v:.0}%"))
        .draw()
        .map_err(chart_err)?;

    let palette: [&RGBColor; 3] = [&BLUE, &RED, &GREEN];
    for (program, color) in PROGRAMS.iter().zip(palette) {
        let points: Vec<(f64, f64)> = rows
            .iter()
            .filter(|r| r.ubi_type == program.label())
            .map(|r| (r.spending_in_billions, r.poverty_rate))
            .collect();

        chart
            .draw_series(LineSeries::new(points.iter().copied(), color))
            .map_err(chart_err)?
            .label(program.label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], color));
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
            )
            .map_err(chart_err)?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE)
        .border_style(BLACK)
        .draw()
        .map_err(chart_err)?;
    root.present().map_err(chart_err)?;

    log::info!("Rendered chart to {}", path.display());
    Ok(())
}

//! Sweep configuration.
//!
//! Defaults carry the canonical grids and output names; a JSON override
//! file can replace any subset of them.

use crate::error::SimResult;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DATA_URL: &str =
    "https://github.com/MaxGhenis/datarepo/raw/master/pppub20.csv.gz";

/// Inclusive arithmetic grid specification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSpec {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl GridSpec {
    pub fn values(&self) -> Vec<f64> {
        crate::sweep::grid(self.start, self.stop, self.step)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Remote gzipped CSV with the survey extract.
    pub data_url: String,
    /// Funding levels in billions, shared by both sweeps.
    pub funding_billions: GridSpec,
    /// Child share of total funding, percent (sweep #1).
    pub child_percent_funding: GridSpec,
    /// Child-to-adult per-capita transfer ratio, percent (sweep #2).
    pub child_percent_ubi: GridSpec,
    pub funding_summary_name: String,
    /// Sweep #2 is written under both of these names.
    pub ubi_summary_names: Vec<String>,
    pub optimal_poverty_name: String,
    pub optimal_inequality_name: String,
    pub optimal_winners_name: String,
    pub legacy_table_name: String,
    pub chart_name: String,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            data_url: DEFAULT_DATA_URL.to_string(),
            funding_billions: GridSpec {
                start: 0.0,
                stop: 3000.0,
                step: 50.0,
            },
            child_percent_funding: GridSpec {
                start: 0.0,
                stop: 100.0,
                step: 1.0,
            },
            child_percent_ubi: GridSpec {
                start: 0.0,
                stop: 100.0,
                step: 50.0,
            },
            funding_summary_name: "children_share_funding_summary.csv.gz".to_string(),
            ubi_summary_names: vec![
                "children_share_ubi_summary.csv.gz".to_string(),
                "child_share_ubi_summary.csv.gz".to_string(),
            ],
            optimal_poverty_name: "optimal_poverty.csv.gz".to_string(),
            optimal_inequality_name: "optimal_inequality.csv.gz".to_string(),
            optimal_winners_name: "optimal_winners.csv.gz".to_string(),
            legacy_table_name: "july_2020.csv".to_string(),
            chart_name: "poverty_by_program.svg".to_string(),
        }
    }
}

impl SweepConfig {
    /// Load a JSON override file. Absent keys keep their defaults.
    pub fn load(path: &str) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: SweepConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}

//! Person- and unit-level records derived from the survey extract.

use serde::Deserialize;

/// SPM resource-sharing unit identifier.
pub type SpmId = u64;

/// Raw row shape of the CPS ASEC SPM extract. Headers are lowercased by the
/// loader before deserialization, so the source's uppercase column names
/// (MARSUPWT, SPM_ID, ...) match these fields.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPersonRow {
    pub marsupwt: f64,
    pub spm_id: SpmId,
    pub spm_povthreshold: f64,
    pub spm_resources: f64,
    pub a_age: f64,
    /// Empty for persons with no taxable income.
    #[serde(default)]
    pub tax_inc: Option<f64>,
    pub spm_weight: f64,
    pub spm_numper: f64,
}

/// One surveyed individual. Immutable once derived from the raw row.
#[derive(Debug, Clone)]
pub struct Person {
    pub spm_id: SpmId,
    /// Survey weight, normalized (MARSUPWT / 100).
    pub weight: f64,
    pub age: f64,
    pub taxable_income: f64,
    /// age < 18
    pub is_child: bool,
    /// age >= 18
    pub is_adult: bool,
    /// Unit weight, normalized (SPM_WEIGHT / 100). Invariant within a unit.
    pub spm_weight: f64,
    pub spm_threshold: f64,
    pub spm_resources: f64,
    pub spm_numper: f64,
}

impl From<RawPersonRow> for Person {
    fn from(raw: RawPersonRow) -> Self {
        let age = raw.a_age;
        Person {
            spm_id: raw.spm_id,
            weight: raw.marsupwt / 100.0,
            age,
            taxable_income: raw.tax_inc.unwrap_or(0.0),
            is_child: age < 18.0,
            is_adult: age >= 18.0,
            spm_weight: raw.spm_weight / 100.0,
            spm_threshold: raw.spm_povthreshold,
            spm_resources: raw.spm_resources,
            spm_numper: raw.spm_numper,
        }
    }
}

/// One SPM resource-sharing unit, aggregated from its members.
#[derive(Debug, Clone)]
pub struct SpmUnit {
    pub spm_id: SpmId,
    pub weight: f64,
    pub threshold: f64,
    /// Baseline resources before any simulated transfer or tax.
    pub resources: f64,
    /// Unit size as reported by the survey (SPM_NUMPER).
    pub size: f64,
    pub children: f64,
    pub adults: f64,
    pub taxable_income: f64,
}

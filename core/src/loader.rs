//! Survey extract loader.
//!
//! The extract is a gzipped CSV with one row per surveyed individual.
//! Column headers are matched case-insensitively; a missing required
//! column is fatal, there is no retry policy.

use crate::error::{SimError, SimResult};
use crate::records::{Person, RawPersonRow};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const REQUIRED_COLUMNS: [&str; 8] = [
    "marsupwt",
    "spm_id",
    "spm_povthreshold",
    "spm_resources",
    "a_age",
    "tax_inc",
    "spm_weight",
    "spm_numper",
];

/// Read person records from any CSV reader, lowercasing headers first so
/// the extract's uppercase column names deserialize into [`RawPersonRow`].
pub fn load_persons_from_reader<R: Read>(reader: R) -> SimResult<Vec<Person>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let lowered: csv::StringRecord = rdr
        .headers()?
        .iter()
        .map(|h| h.to_ascii_lowercase())
        .collect();
    for col in REQUIRED_COLUMNS {
        if !lowered.iter().any(|h| h == col) {
            return Err(SimError::MissingColumn(col.to_string()));
        }
    }
    rdr.set_headers(lowered);

    let mut persons = Vec::new();
    for result in rdr.deserialize::<RawPersonRow>() {
        persons.push(Person::from(result?));
    }
    if persons.is_empty() {
        return Err(SimError::EmptyInput);
    }

    log::info!("Loaded {} person records", persons.len());
    Ok(persons)
}

/// Fetch the gzipped extract over HTTP and parse it.
pub fn load_persons_from_url(url: &str) -> SimResult<Vec<Person>> {
    log::info!("Fetching survey extract from {url}");
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    load_persons_from_reader(GzDecoder::new(response))
}

/// Load from a local file, gunzipping when the path ends in `.gz`.
pub fn load_persons_from_path(path: &Path) -> SimResult<Vec<Person>> {
    log::info!("Reading survey extract from {}", path.display());
    let file = File::open(path)?;
    if path.extension().is_some_and(|e| e == "gz") {
        load_persons_from_reader(GzDecoder::new(file))
    } else {
        load_persons_from_reader(file)
    }
}

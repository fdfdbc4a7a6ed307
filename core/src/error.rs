use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Required column '{0}' missing from survey extract")]
    MissingColumn(String),

    #[error("Survey extract contains no person records")]
    EmptyInput,

    #[error("Survey extract contains no {0} records; per-capita transfers are undefined")]
    EmptyPopulation(&'static str),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;

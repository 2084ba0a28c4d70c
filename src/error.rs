use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NurseDataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON (de)serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("'{}' is missing required column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("'{}' contains no worksheet with a header row", path.display())]
    EmptySheet { path: PathBuf },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid distribution parameters: {0}")]
    Distribution(#[from] rand_distr::NormalError),

    #[error("Weighted sampling failed: {0}")]
    Sampling(#[from] rand::distributions::WeightedError),
}

impl NurseDataError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, NurseDataError>;

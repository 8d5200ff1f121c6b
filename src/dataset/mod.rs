//! Dataset source module
//!
//! A dataset is a spreadsheet-like grid of scalar cells: row 0 holds the
//! column headers, every following row is a record. Sources are read in full
//! on every call; nothing is cached between requests.

mod csv;
mod json;

pub use self::csv::CsvSource;
pub use self::json::JsonSource;

use crate::config::DatasetConfig;
use serde_json::Value;
use thiserror::Error;

/// One row of cells
pub type Row = Vec<Value>;

/// Full row/column value grid, header row first
pub type Grid = Vec<Row>;

/// Errors raised while reading a dataset
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read CSV dataset {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: ::csv::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Something the lookup can read a grid from
pub trait DatasetSource: Send + Sync {
    /// Short human-readable name for logs
    fn describe(&self) -> String;

    /// Read the whole grid
    fn fetch(&self) -> Result<Grid, SourceError>;
}

/// Build the configured source
pub fn from_config(config: &DatasetConfig) -> Box<dyn DatasetSource> {
    match config {
        DatasetConfig::Csv { path, delimiter } => {
            // Non-ASCII delimiters are rejected when the config is loaded
            let delimiter = u8::try_from(*delimiter).unwrap_or(b',');
            Box::new(CsvSource::new(path.clone(), delimiter))
        }
        DatasetConfig::Json { path } => Box::new(JsonSource::new(path.clone())),
    }
}

//! Row lookup module
//!
//! Reads the whole dataset, takes row 0 as headers and scans the remaining
//! rows in order for the first one whose identifier column matches.

mod cell;
mod record;

pub use record::Record;

use crate::dataset::{DatasetSource, SourceError};
use crate::logger;
use serde_json::Value;
use thiserror::Error;

/// Where the identifier lives in each row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdColumn {
    /// Fixed zero-based position
    Index(usize),
    /// Column whose header text equals this name
    Header(String),
}

/// Result of a scan that completed
#[derive(Debug, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(Record),
    NotFound,
}

/// Failures that stop a lookup
#[derive(Error, Debug)]
pub enum LookupError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("dataset has no header row")]
    EmptyDataset,

    #[error("identifier column '{0}' not found in header row")]
    UnknownHeader(String),
}

impl IdColumn {
    fn resolve(&self, headers: &[Value]) -> Result<usize, LookupError> {
        match self {
            Self::Index(index) => Ok(*index),
            Self::Header(name) => headers
                .iter()
                .position(|h| cell::header_key(h) == *name)
                .ok_or_else(|| LookupError::UnknownHeader(name.clone())),
        }
    }
}

/// Find the first row whose identifier column equals `id`
pub fn find_row(
    source: &dyn DatasetSource,
    column: &IdColumn,
    id: i64,
) -> Result<LookupOutcome, LookupError> {
    let grid = source.fetch()?;
    logger::log_debug(&format!(
        "[Lookup] {} returned {} rows",
        source.describe(),
        grid.len()
    ));

    let (headers, rows) = grid.split_first().ok_or(LookupError::EmptyDataset)?;
    let id_column = column.resolve(headers)?;

    for (offset, row) in rows.iter().enumerate() {
        let Some(cell) = row.get(id_column) else {
            continue;
        };
        if cell::matches_id(cell, id) {
            logger::log_debug(&format!(
                "[Lookup] id {id} matched row {} (cell {cell})",
                offset + 1
            ));
            return Ok(LookupOutcome::Found(Record::from_row(headers, row)));
        }
    }

    logger::log_debug(&format!("[Lookup] id {id} not found"));
    Ok(LookupOutcome::NotFound)
}

//! File-based intake for collaborator signal exports.
//!
//! The satellite, geodata, and market collaborators deliver one CSV row per
//! region per weekly window. Import stops at typed batches; sanitization and
//! confidence composition happen in the scoring intake guard.

mod parser;

use std::io::Read;
use std::path::Path;

use crate::workflows::scoring::domain::RegionSignalBatch;

#[derive(Debug)]
pub enum SignalImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidDate { line: usize, value: String },
    UnknownSource { line: usize, value: String },
}

impl std::fmt::Display for SignalImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalImportError::Io(err) => write!(f, "failed to read signal export: {}", err),
            SignalImportError::Csv(err) => write!(f, "invalid signal CSV data: {}", err),
            SignalImportError::InvalidDate { line, value } => {
                write!(f, "line {}: '{}' is not a YYYY-MM-DD date", line, value)
            }
            SignalImportError::UnknownSource { line, value } => {
                write!(f, "line {}: unknown market source '{}'", line, value)
            }
        }
    }
}

impl std::error::Error for SignalImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SignalImportError::Io(err) => Some(err),
            SignalImportError::Csv(err) => Some(err),
            SignalImportError::InvalidDate { .. } | SignalImportError::UnknownSource { .. } => None,
        }
    }
}

impl From<std::io::Error> for SignalImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for SignalImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct SignalBatchImporter;

impl SignalBatchImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RegionSignalBatch>, SignalImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<RegionSignalBatch>, SignalImportError> {
        parser::parse_records(reader)
    }
}

//! Manuscript row sources.
//!
//! The warehouse client proper lives elsewhere; the service only needs
//! something that yields the full ordered snapshot of manuscript rows.

use std::path::PathBuf;

use docmap_core::ManuscriptRecord;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read manuscript snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode manuscript snapshot: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Yields manuscript rows in a fixed shape, ordered by manuscript.
pub trait ManuscriptSource: Send + Sync {
    fn load(&self) -> Result<Vec<ManuscriptRecord>, SourceError>;
}

/// Reads the snapshot from a JSON file holding an array of records.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ManuscriptSource for JsonFileSource {
    fn load(&self) -> Result<Vec<ManuscriptRecord>, SourceError> {
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// A fixed in-memory snapshot, for tests and local development.
pub struct StaticSource {
    records: Vec<ManuscriptRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<ManuscriptRecord>) -> Self {
        Self { records }
    }
}

impl ManuscriptSource for StaticSource {
    fn load(&self) -> Result<Vec<ManuscriptRecord>, SourceError> {
        Ok(self.records.clone())
    }
}

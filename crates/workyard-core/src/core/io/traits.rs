use crate::core::models::instance::PlacementRecord;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("File I/O error for '{path}': {source}")]
    Io { path: String, source: io::Error },

    #[error("Plan file '{path}' is malformed: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("Failed to serialize plan: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Plan file '{path}' has unsupported format version {version}")]
    UnsupportedVersion { path: String, version: u32 },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Defines the interface for saving and loading a plan's placements.
///
/// Both operations are all-or-nothing from the caller's point of view: a failed save
/// must not leave a partially written plan behind, and a failed load must not yield a
/// partial list. Neither operation is retried automatically.
pub trait PlanStore {
    /// Persists `records` in order, replacing whatever was stored before.
    ///
    /// # Errors
    ///
    /// Returns a `PersistenceError` if the records could not be written in full.
    fn save(&mut self, records: &[PlacementRecord]) -> Result<(), PersistenceError>;

    /// Loads the stored records in the order they were saved.
    ///
    /// Returns an empty list when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns a `PersistenceError` if stored data exists but cannot be read.
    fn load(&self) -> Result<Vec<PlacementRecord>, PersistenceError>;
}

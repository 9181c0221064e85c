//! TOML plan files.
//!
//! A plan file is a versioned list of placement records:
//!
//! ```toml
//! version = 1
//!
//! [[placements]]
//! piece = "stone_cutter"
//! x = 0
//! y = 0
//! rotation = 90
//! ```
//!
//! Saving writes to a sibling `.tmp` file, syncs it, and renames it over the plan, so an
//! interrupted save never corrupts the previous plan. A save that fails part way removes
//! its temporary file.

use super::traits::{PersistenceError, PlanStore};
use crate::core::models::instance::PlacementRecord;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const PLAN_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlanDocument {
    version: u32,
    #[serde(default)]
    placements: Vec<PlacementRecord>,
}

#[derive(Debug, Clone)]
pub struct TomlFileStore {
    path: PathBuf,
}

impl TomlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn path_string(&self) -> String {
        self.path.to_string_lossy().to_string()
    }

    fn io_error(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path_string(),
            source,
        }
    }
}

impl PlanStore for TomlFileStore {
    fn save(&mut self, records: &[PlacementRecord]) -> Result<(), PersistenceError> {
        let document = PlanDocument {
            version: PLAN_FORMAT_VERSION,
            placements: records.to_vec(),
        };
        let content = toml::to_string_pretty(&document)?;
        atomic_write(&self.path, content.as_bytes()).map_err(|e| self.io_error(e))?;
        debug!("Saved {} placement(s) to {:?}", records.len(), self.path);
        Ok(())
    }

    fn load(&self) -> Result<Vec<PlacementRecord>, PersistenceError> {
        if !self.path.exists() {
            debug!("No plan file at {:?}; starting empty.", self.path);
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let document: PlanDocument =
            toml::from_str(&content).map_err(|e| PersistenceError::Parse {
                path: self.path_string(),
                source: e,
            })?;
        if document.version != PLAN_FORMAT_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                path: self.path_string(),
                version: document.version,
            });
        }
        Ok(document.placements)
    }
}

fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let result = write_then_rename(&tmp_path, path, data);
    if result.is_err() && tmp_path.is_file() {
        if let Err(e) = fs::remove_file(&tmp_path) {
            debug!("Could not remove temporary plan file {:?}: {}", tmp_path, e);
        }
    }
    result
}

fn write_then_rename(tmp_path: &Path, path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    drop(file);
    fs::rename(tmp_path, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::piece::Rotation;
    use tempfile::tempdir;

    #[test]
    fn load_of_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = TomlFileStore::new(dir.path().join("plan.toml"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_preserves_order() {
        let dir = tempdir().unwrap();
        let mut store = TomlFileStore::new(dir.path().join("nested/plan.toml"));
        let records = vec![
            PlacementRecord::new("stone_cutter", 0, 0, Rotation::Deg90),
            PlacementRecord::new("garden_bed", 3, 2, Rotation::Deg0),
        ];

        store.save(&records).unwrap();

        assert_eq!(store.load().unwrap(), records);
        assert!(!dir.path().join("nested/plan.toml.tmp").exists());
    }

    #[test]
    fn saved_file_is_versioned_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plan.toml");
        let mut store = TomlFileStore::new(&path);
        store
            .save(&[PlacementRecord::new("sawing_spot", 1, 2, Rotation::Deg90)])
            .unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("version = 1"));
        assert!(text.contains("[[placements]]"));
        assert!(text.contains("piece = \"sawing_spot\""));
        assert!(text.contains("rotation = 90"));
    }

    #[test]
    fn load_rejects_malformed_and_future_versions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plan.toml");
        let store = TomlFileStore::new(&path);

        fs::write(&path, "version = 1\n[[placements]]\npiece = 3\n").unwrap();
        assert!(matches!(store.load(), Err(PersistenceError::Parse { .. })));

        fs::write(&path, "version = 7\n").unwrap();
        assert!(matches!(
            store.load(),
            Err(PersistenceError::UnsupportedVersion { version: 7, .. })
        ));
    }

    #[test]
    fn failed_save_keeps_previous_plan() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plan.toml");
        let mut store = TomlFileStore::new(&path);
        let original = vec![PlacementRecord::new("garden_bed", 0, 0, Rotation::Deg0)];
        store.save(&original).unwrap();

        // A directory squatting on the temp path makes the write fail.
        fs::create_dir(dir.path().join("plan.toml.tmp")).unwrap();
        let result = store.save(&[PlacementRecord::new("compost_heap", 1, 1, Rotation::Deg0)]);

        assert!(matches!(result, Err(PersistenceError::Io { .. })));
        assert_eq!(store.load().unwrap(), original);
    }

    #[test]
    fn failed_rename_removes_the_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plan.toml");
        // A non-empty directory at the plan path makes the final rename fail.
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "").unwrap();
        let mut store = TomlFileStore::new(&path);

        let result = store.save(&[PlacementRecord::new("garden_bed", 0, 0, Rotation::Deg0)]);

        assert!(matches!(result, Err(PersistenceError::Io { .. })));
        assert!(!dir.path().join("plan.toml.tmp").exists());
        assert!(path.join("keep").exists());
    }
}

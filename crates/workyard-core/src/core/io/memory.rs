use super::traits::{PersistenceError, PlanStore};
use crate::core::models::instance::PlacementRecord;

/// An in-process store, for embedders that persist elsewhere and for tests.
///
/// Failures can be injected to exercise the caller's all-or-nothing handling.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Option<Vec<PlacementRecord>>,
    fail_saves: bool,
    fail_loads: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<PlacementRecord>) -> Self {
        Self {
            records: Some(records),
            ..Self::default()
        }
    }

    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    pub fn failing_loads(mut self) -> Self {
        self.fail_loads = true;
        self
    }

    /// What was last saved, if anything.
    pub fn records(&self) -> Option<&[PlacementRecord]> {
        self.records.as_deref()
    }
}

impl PlanStore for MemoryStore {
    fn save(&mut self, records: &[PlacementRecord]) -> Result<(), PersistenceError> {
        if self.fail_saves {
            return Err(PersistenceError::Unavailable(
                "memory store is configured to reject saves".to_string(),
            ));
        }
        self.records = Some(records.to_vec());
        Ok(())
    }

    fn load(&self) -> Result<Vec<PlacementRecord>, PersistenceError> {
        if self.fail_loads {
            return Err(PersistenceError::Unavailable(
                "memory store is configured to reject loads".to_string(),
            ));
        }
        Ok(self.records.clone().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::piece::Rotation;

    #[test]
    fn empty_store_loads_nothing() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_empty());
        assert!(store.records().is_none());
    }

    #[test]
    fn save_replaces_previous_records() {
        let mut store =
            MemoryStore::with_records(vec![PlacementRecord::new("a", 0, 0, Rotation::Deg0)]);
        let next = vec![PlacementRecord::new("b", 1, 1, Rotation::Deg90)];
        store.save(&next).unwrap();
        assert_eq!(store.load().unwrap(), next);
    }

    #[test]
    fn injected_failures_leave_contents_alone() {
        let original = vec![PlacementRecord::new("a", 0, 0, Rotation::Deg0)];
        let mut store = MemoryStore::with_records(original.clone()).failing_saves();
        assert!(matches!(
            store.save(&[]),
            Err(PersistenceError::Unavailable(_))
        ));
        assert_eq!(store.records(), Some(original.as_slice()));

        let store = MemoryStore::new().failing_loads();
        assert!(store.load().is_err());
    }
}

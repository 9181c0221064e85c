use super::ids::InstanceId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero-based column/row coordinate of a cell inside a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: usize,
    pub y: usize,
}

impl CellCoord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A single cell of the planning grid.
///
/// The occupant is a back-reference, not ownership: instances live in the session, and
/// the cell only caches which one currently covers it so occupancy checks stay O(1).
/// Occupancy is derived from the occupant, so a cell can never be flagged occupied
/// without naming who occupies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub x: usize,
    pub y: usize,
    /// Name of the buildable area this cell belongs to, after merge groups are applied.
    pub area: Option<String>,
    /// Whether any placement may ever cover this cell.
    pub buildable: bool,
    occupant: Option<InstanceId>,
}

impl GridCell {
    pub(crate) fn new(x: usize, y: usize, buildable: bool) -> Self {
        Self {
            x,
            y,
            area: None,
            buildable,
            occupant: None,
        }
    }

    pub fn coord(&self) -> CellCoord {
        CellCoord::new(self.x, self.y)
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn occupant(&self) -> Option<InstanceId> {
        self.occupant
    }

    pub(crate) fn set_occupant(&mut self, id: InstanceId) {
        self.occupant = Some(id);
    }

    pub(crate) fn clear_occupant(&mut self) {
        self.occupant = None;
    }
}

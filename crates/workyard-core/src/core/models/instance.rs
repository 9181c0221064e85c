use super::cell::CellCoord;
use super::ids::InstanceId;
use super::piece::{Footprint, PieceType, Rotation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A catalog piece bound to a position and rotation on the grid.
///
/// `x` and `y` are the top-left cell of the effective (post-rotation) footprint. The
/// footprint is recomputed from the piece and rotation on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedInstance {
    pub id: InstanceId,
    pub piece: Arc<PieceType>,
    pub x: usize,
    pub y: usize,
    pub rotation: Rotation,
}

impl PlacedInstance {
    pub fn footprint(&self) -> Footprint {
        self.piece.footprint(self.rotation)
    }

    /// The exact set of cells this instance covers, row-major.
    pub fn cells(&self) -> Vec<CellCoord> {
        let fp = self.footprint();
        (self.y..self.y + fp.height)
            .flat_map(|y| (self.x..self.x + fp.width).map(move |x| CellCoord::new(x, y)))
            .collect()
    }

    pub fn covers(&self, x: usize, y: usize) -> bool {
        let fp = self.footprint();
        x >= self.x && x < self.x + fp.width && y >= self.y && y < self.y + fp.height
    }

    pub fn to_record(&self) -> PlacementRecord {
        PlacementRecord {
            piece: self.piece.id.clone(),
            x: self.x,
            y: self.y,
            rotation: self.rotation,
        }
    }
}

/// The persisted form of a placed instance.
///
/// Instance ids are session-local and are not stored; loading a plan assigns fresh ids
/// in record order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlacementRecord {
    /// Catalog id of the piece.
    pub piece: String,
    pub x: usize,
    pub y: usize,
    #[serde(default)]
    pub rotation: Rotation,
}

impl PlacementRecord {
    pub fn new(piece: &str, x: usize, y: usize, rotation: Rotation) -> Self {
        Self {
            piece: piece.to_string(),
            x,
            y,
            rotation,
        }
    }
}

use super::config::{LoadPolicy, PlannerConfig};
use super::error::{EngineError, PlacementError};
use super::footprint::{self, ResolvedFootprint};
use super::ghost::GhostPlacement;
use super::validation;
use crate::core::catalog::PieceCatalog;
use crate::core::models::cell::CellCoord;
use crate::core::models::grid::Grid;
use crate::core::models::ids::InstanceId;
use crate::core::models::instance::{PlacedInstance, PlacementRecord};
use crate::core::models::piece::{PieceType, Rotation};
use slotmap::SlotMap;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// The authoritative set of placed instances, bound to one grid.
///
/// Every mutation goes through [`Session::place`], [`Session::move_instance`],
/// [`Session::rotate`] or [`Session::remove`], which validate first and then update the
/// grid's back-references and the instance collection together. Cells never own
/// instances; they only cache the id of the instance covering them.
#[derive(Debug, Clone)]
pub struct Session {
    pub(super) grid: Grid,
    pub(super) instances: SlotMap<InstanceId, PlacedInstance>,
    pub(super) order: Vec<InstanceId>,
    pub(super) ghost: Option<GhostPlacement>,
}

/// Why a saved record was not replayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    UnknownPiece,
    Invalid(PlacementError),
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::UnknownPiece => f.write_str("piece is not in the catalog"),
            DropReason::Invalid(reason) => write!(f, "{}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRecord {
    /// Position of the record in the loaded sequence.
    pub index: usize,
    pub record: PlacementRecord,
    pub reason: DropReason,
}

/// Outcome of replaying saved placements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub accepted: usize,
    pub dropped: Vec<DroppedRecord>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }
}

impl Session {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            instances: SlotMap::with_key(),
            order: Vec::new(),
            ghost: None,
        }
    }

    pub fn from_config(config: &PlannerConfig) -> Result<Self, EngineError> {
        Ok(Self::new(config.grid.build()?))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Placed instances in the order they were first placed.
    pub fn instances(&self) -> impl Iterator<Item = &PlacedInstance> {
        self.order.iter().filter_map(|id| self.instances.get(*id))
    }

    pub fn instance(&self, id: InstanceId) -> Option<&PlacedInstance> {
        self.instances.get(id)
    }

    /// The instance covering cell `(x, y)`, found through the cell's back-reference.
    pub fn instance_at(&self, x: usize, y: usize) -> Option<&PlacedInstance> {
        let id = self.grid.cell(x, y)?.occupant()?;
        self.instances.get(id)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn occupied_cells(&self) -> BTreeMap<CellCoord, InstanceId> {
        self.grid.occupied_cells()
    }

    pub fn footprint_cells(&self, id: InstanceId) -> Result<Vec<CellCoord>, EngineError> {
        self.instances
            .get(id)
            .map(PlacedInstance::cells)
            .ok_or(EngineError::InstanceNotFound(id))
    }

    /// The persisted form of every instance, in placement order.
    pub fn records(&self) -> Vec<PlacementRecord> {
        self.instances().map(PlacedInstance::to_record).collect()
    }

    /// Validates a candidate without changing anything.
    pub fn validate_placement(
        &self,
        piece: &PieceType,
        x: i32,
        y: i32,
        rotation: Rotation,
        exclude: Option<InstanceId>,
    ) -> Result<(), PlacementError> {
        validation::validate_placement(&self.grid, piece, x, y, rotation, exclude).map(|_| ())
    }

    /// Places a new instance of `piece`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Rejected` with the validation verdict; nothing changes.
    pub fn place(
        &mut self,
        piece: &Arc<PieceType>,
        x: i32,
        y: i32,
        rotation: Rotation,
    ) -> Result<PlacedInstance, EngineError> {
        let resolved = validation::validate_placement(&self.grid, piece, x, y, rotation, None)?;
        let id = self.commit_new(Arc::clone(piece), rotation, &resolved);
        debug!(?id, piece = %piece.id, x, y, %rotation, "Placed instance");
        self.cloned(id)
    }

    /// Moves an instance, optionally changing its rotation.
    ///
    /// The instance's own cells do not count as collisions, so moving onto (or
    /// overlapping) its current footprint is allowed.
    pub fn move_instance(
        &mut self,
        id: InstanceId,
        x: i32,
        y: i32,
        rotation: Rotation,
    ) -> Result<PlacedInstance, EngineError> {
        let current = self
            .instances
            .get(id)
            .ok_or(EngineError::InstanceNotFound(id))?;
        let old_cells = current.cells();
        let piece = Arc::clone(&current.piece);
        let resolved =
            validation::validate_placement(&self.grid, &piece, x, y, rotation, Some(id))?;

        let instance = self
            .instances
            .get_mut(id)
            .ok_or(EngineError::InstanceNotFound(id))?;
        self.grid.free_cells(&old_cells, id);
        instance.x = resolved.origin.x;
        instance.y = resolved.origin.y;
        instance.rotation = rotation;
        self.grid.occupy_cells(&resolved.cells, id);

        debug!(?id, piece = %piece.id, x, y, %rotation, "Moved instance");
        self.cloned(id)
    }

    /// Toggles an instance between 0° and 90° in place.
    pub fn rotate(&mut self, id: InstanceId) -> Result<PlacedInstance, EngineError> {
        let instance = self
            .instances
            .get(id)
            .ok_or(EngineError::InstanceNotFound(id))?;
        if !instance.piece.can_rotate {
            return Err(PlacementError::RotationNotSupported {
                piece_id: instance.piece.id.clone(),
            }
            .into());
        }
        let (x, y) = (
            footprint::to_candidate(instance.x),
            footprint::to_candidate(instance.y),
        );
        let rotation = instance.rotation.toggled();
        self.move_instance(id, x, y, rotation)
    }

    /// Removes an instance and frees its cells.
    ///
    /// A move ghost for this instance is discarded with it.
    pub fn remove(&mut self, id: InstanceId) -> Result<PlacedInstance, EngineError> {
        let instance = self
            .instances
            .remove(id)
            .ok_or(EngineError::InstanceNotFound(id))?;
        self.grid.free_cells(&instance.cells(), id);
        self.order.retain(|&other| other != id);
        if self.ghost.as_ref().and_then(GhostPlacement::moving_id) == Some(id) {
            self.ghost = None;
        }
        debug!(?id, piece = %instance.piece.id, "Removed instance");
        Ok(instance)
    }

    /// Removes every instance.
    pub fn clear(&mut self) {
        for instance in self.instances.values() {
            self.grid.free_cells(&instance.cells(), instance.id);
        }
        self.instances.clear();
        self.order.clear();
        self.ghost = None;
    }

    /// Replaces all placements with `records`, replayed in order.
    ///
    /// Instance ids are assigned fresh. With [`LoadPolicy::Reject`], the first record
    /// that no longer fits fails the whole load and the session is left as it was.
    pub fn load_records(
        &mut self,
        records: &[PlacementRecord],
        catalog: &PieceCatalog,
        policy: LoadPolicy,
    ) -> Result<LoadReport, EngineError> {
        self.transaction(|session| {
            session.clear();
            let mut report = LoadReport::default();
            for (index, record) in records.iter().enumerate() {
                match session.replay(record, catalog, policy) {
                    Ok(()) => report.accepted += 1,
                    Err(reason) if policy == LoadPolicy::Reject => {
                        return Err(EngineError::InvalidSavedPlacement {
                            index,
                            piece: record.piece.clone(),
                            x: record.x,
                            y: record.y,
                            reason: reason.to_string(),
                        });
                    }
                    Err(reason) => {
                        warn!(
                            index,
                            piece = %record.piece,
                            x = record.x,
                            y = record.y,
                            "Dropping saved placement: {}",
                            reason
                        );
                        report.dropped.push(DroppedRecord {
                            index,
                            record: record.clone(),
                            reason,
                        });
                    }
                }
            }
            Ok(report)
        })
    }

    fn replay(
        &mut self,
        record: &PlacementRecord,
        catalog: &PieceCatalog,
        policy: LoadPolicy,
    ) -> Result<(), DropReason> {
        let piece = catalog.get(&record.piece).ok_or(DropReason::UnknownPiece)?;
        let (x, y) = (
            footprint::to_candidate(record.x),
            footprint::to_candidate(record.y),
        );
        let resolved = match policy {
            LoadPolicy::Trust => {
                footprint::resolve(&self.grid, x, y, piece.footprint(record.rotation))
            }
            LoadPolicy::DropInvalid | LoadPolicy::Reject => {
                validation::validate_placement(&self.grid, piece, x, y, record.rotation, None)
            }
        }
        .map_err(DropReason::Invalid)?;
        self.commit_new(Arc::clone(piece), record.rotation, &resolved);
        Ok(())
    }

    fn commit_new(
        &mut self,
        piece: Arc<PieceType>,
        rotation: Rotation,
        resolved: &ResolvedFootprint,
    ) -> InstanceId {
        let id = self.instances.insert_with_key(|id| PlacedInstance {
            id,
            piece,
            x: resolved.origin.x,
            y: resolved.origin.y,
            rotation,
        });
        self.grid.occupy_cells(&resolved.cells, id);
        self.order.push(id);
        id
    }

    fn cloned(&self, id: InstanceId) -> Result<PlacedInstance, EngineError> {
        self.instances.get(id).cloned().ok_or_else(|| {
            EngineError::Internal(format!("Instance {:?} vanished during commit", id))
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Grid::default())
    }
}

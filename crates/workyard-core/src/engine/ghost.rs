//! Ghost previews of a pending placement or move.
//!
//! A ghost carries a candidate position and the verdict of its last validation. Updating
//! it only ever calls validation, never the grid's occupancy primitives, so cancelling a
//! ghost needs no undo: the grid and the instance set were never touched.

use super::error::{EngineError, PlacementError};
use super::footprint;
use super::session::Session;
use super::validation;
use crate::core::models::ids::InstanceId;
use crate::core::models::instance::PlacedInstance;
use crate::core::models::piece::{PieceType, Rotation};
use std::sync::Arc;
use tracing::debug;

/// Where a moving instance sat when the move began.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginalPosition {
    pub x: usize,
    pub y: usize,
    pub rotation: Rotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovingInstance {
    pub id: InstanceId,
    pub original: OriginalPosition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GhostPlacement {
    piece: Arc<PieceType>,
    x: i32,
    y: i32,
    rotation: Rotation,
    verdict: Result<(), PlacementError>,
    moving: Option<MovingInstance>,
}

impl GhostPlacement {
    pub fn piece(&self) -> &Arc<PieceType> {
        &self.piece
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn is_valid(&self) -> bool {
        self.verdict.is_ok()
    }

    /// Why the ghost cannot be committed where it is, if it cannot.
    pub fn reason(&self) -> Option<&PlacementError> {
        self.verdict.as_ref().err()
    }

    /// Set only while an existing instance is being moved.
    pub fn moving(&self) -> Option<&MovingInstance> {
        self.moving.as_ref()
    }

    pub(crate) fn moving_id(&self) -> Option<InstanceId> {
        self.moving.map(|m| m.id)
    }
}

impl Session {
    pub fn ghost(&self) -> Option<&GhostPlacement> {
        self.ghost.as_ref()
    }

    /// Starts previewing a new placement of `piece`, replacing any ghost in progress.
    pub fn begin_placement(
        &mut self,
        piece: &Arc<PieceType>,
        x: i32,
        y: i32,
        rotation: Rotation,
    ) -> &GhostPlacement {
        let verdict = self.preview(piece, x, y, rotation, None);
        self.ghost.insert(GhostPlacement {
            piece: Arc::clone(piece),
            x,
            y,
            rotation,
            verdict,
            moving: None,
        })
    }

    /// Starts previewing a move of an existing instance from where it currently is.
    pub fn begin_move(&mut self, id: InstanceId) -> Result<&GhostPlacement, EngineError> {
        let instance = self
            .instances
            .get(id)
            .ok_or(EngineError::InstanceNotFound(id))?;
        let piece = Arc::clone(&instance.piece);
        let original = OriginalPosition {
            x: instance.x,
            y: instance.y,
            rotation: instance.rotation,
        };
        let (x, y) = (
            footprint::to_candidate(original.x),
            footprint::to_candidate(original.y),
        );
        let verdict = self.preview(&piece, x, y, original.rotation, Some(id));
        Ok(&*self.ghost.insert(GhostPlacement {
            piece,
            x,
            y,
            rotation: original.rotation,
            verdict,
            moving: Some(MovingInstance { id, original }),
        }))
    }

    /// Moves the ghost to `(x, y)` and re-validates it.
    pub fn update_ghost(&mut self, x: i32, y: i32) -> Result<&GhostPlacement, EngineError> {
        let ghost = self.ghost.as_mut().ok_or(EngineError::NoGhost)?;
        ghost.x = x;
        ghost.y = y;
        ghost.verdict = validation::validate_placement(
            &self.grid,
            &ghost.piece,
            x,
            y,
            ghost.rotation,
            ghost.moving.map(|m| m.id),
        )
        .map(|_| ());
        Ok(&*ghost)
    }

    /// Toggles the ghost's rotation and re-validates it.
    ///
    /// # Errors
    ///
    /// Returns `RotationNotSupported` for a fixed piece; the ghost keeps its rotation.
    pub fn rotate_ghost(&mut self) -> Result<&GhostPlacement, EngineError> {
        let ghost = self.ghost.as_mut().ok_or(EngineError::NoGhost)?;
        if !ghost.piece.can_rotate {
            return Err(PlacementError::RotationNotSupported {
                piece_id: ghost.piece.id.clone(),
            }
            .into());
        }
        ghost.rotation = ghost.rotation.toggled();
        ghost.verdict = validation::validate_placement(
            &self.grid,
            &ghost.piece,
            ghost.x,
            ghost.y,
            ghost.rotation,
            ghost.moving.map(|m| m.id),
        )
        .map(|_| ());
        Ok(&*ghost)
    }

    /// Commits the ghost as a placement or move.
    ///
    /// Commit always re-validates against the current grid. On failure the ghost stays
    /// in place so the caller can keep adjusting it.
    pub fn commit_ghost(&mut self) -> Result<PlacedInstance, EngineError> {
        let ghost = self.ghost.clone().ok_or(EngineError::NoGhost)?;
        let committed = match ghost.moving {
            Some(moving) => self.move_instance(moving.id, ghost.x, ghost.y, ghost.rotation),
            None => self.place(&ghost.piece, ghost.x, ghost.y, ghost.rotation),
        };
        match committed {
            Ok(instance) => {
                self.ghost = None;
                Ok(instance)
            }
            Err(e) => {
                if let (Some(current), Some(reason)) = (self.ghost.as_mut(), e.placement()) {
                    current.verdict = Err(reason.clone());
                }
                Err(e)
            }
        }
    }

    /// Discards the ghost. Nothing else changes.
    pub fn cancel_ghost(&mut self) -> Option<GhostPlacement> {
        let ghost = self.ghost.take();
        if let Some(g) = &ghost {
            debug!(piece = %g.piece.id, moving = g.moving.is_some(), "Cancelled ghost");
        }
        ghost
    }

    fn preview(
        &self,
        piece: &PieceType,
        x: i32,
        y: i32,
        rotation: Rotation,
        exclude: Option<InstanceId>,
    ) -> Result<(), PlacementError> {
        validation::validate_placement(&self.grid, piece, x, y, rotation, exclude).map(|_| ())
    }
}

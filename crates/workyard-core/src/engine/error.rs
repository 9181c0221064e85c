use crate::core::io::traits::PersistenceError;
use crate::core::layout::LayoutError;
use crate::core::models::ids::InstanceId;
use thiserror::Error;

/// Why a candidate placement is illegal.
///
/// Variants are listed in the order validation checks them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error("Piece '{piece_id}' cannot be rotated")]
    RotationNotSupported { piece_id: String },

    #[error("Footprint extends past the grid edge")]
    OutOfBounds,

    #[error("Cell ({x}, {y}) is not buildable")]
    NotBuildable { x: usize, y: usize },

    #[error("Cell ({x}, {y}) is already occupied")]
    Occupied { x: usize, y: usize, by: InstanceId },
}

impl PlacementError {
    /// Short stable name of the verdict, for logs and user-facing feedback.
    pub fn kind(&self) -> &'static str {
        match self {
            PlacementError::RotationNotSupported { .. } => "rotation-not-supported",
            PlacementError::OutOfBounds => "out-of-bounds",
            PlacementError::NotBuildable { .. } => "not-buildable",
            PlacementError::Occupied { .. } => "occupied",
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Placement rejected: {0}")]
    Rejected(#[from] PlacementError),

    #[error("Instance not found: {0:?}")]
    InstanceNotFound(InstanceId),

    #[error("Unknown piece id '{0}'")]
    UnknownPiece(String),

    #[error("No placement or move is in progress")]
    NoGhost,

    #[error("Saved placement #{index} ('{piece}' at ({x}, {y})) is no longer valid: {reason}")]
    InvalidSavedPlacement {
        index: usize,
        piece: String,
        x: usize,
        y: usize,
        reason: String,
    },

    #[error("Grid layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("Internal logic error: {0}")]
    Internal(String),
}

impl EngineError {
    /// The validation verdict behind this error, if it is a rejected placement.
    pub fn placement(&self) -> Option<&PlacementError> {
        match self {
            EngineError::Rejected(reason) => Some(reason),
            _ => None,
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A discrete rotation applied to a piece's authored footprint.
///
/// Footprints are axis-aligned rectangles, so only a quarter turn changes the
/// occupied cells; 180 and 270 degree turns would be indistinguishable from
/// `Deg0` and `Deg90` and are not represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    /// The footprint as authored in the catalog.
    #[default]
    Deg0,
    /// A quarter turn; width and height are swapped.
    Deg90,
}

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
#[error("Unsupported rotation of {0} degrees; only 0 and 90 are allowed")]
pub struct InvalidRotation(pub u16);

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
        }
    }

    /// Returns the other rotation (0 ↔ 90).
    pub fn toggled(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg0,
        }
    }

    pub fn is_rotated(self) -> bool {
        self == Rotation::Deg90
    }
}

impl TryFrom<u16> for Rotation {
    type Error = InvalidRotation;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            other => Err(InvalidRotation(other)),
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl FromStr for Rotation {
    type Err = InvalidRotation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let degrees: u16 = s.trim().parse().map_err(|_| InvalidRotation(u16::MAX))?;
        Rotation::try_from(degrees)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Effective width and height of a piece, in grid cells, after rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Footprint {
    pub width: usize,
    pub height: usize,
}

impl Footprint {
    /// Number of covered cells, or `None` if it does not fit in a `usize`.
    pub fn area(self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }
}

/// An immutable catalog entry describing a placeable piece.
///
/// `base_width` and `base_height` are the authored, pre-rotation dimensions and are
/// always at least one; the catalog refuses records that violate this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceType {
    /// Stable key derived from the display name (see [`crate::core::catalog::derive_piece_id`]).
    pub id: String,
    pub name: String,
    pub base_width: usize,
    pub base_height: usize,
    pub can_rotate: bool,
    /// Opaque image reference carried through for presentation layers.
    pub image: Option<String>,
    /// Locations this piece is listed under. Informational only.
    pub locations: Vec<String>,
}

impl PieceType {
    /// Computes the effective footprint for the given rotation.
    ///
    /// This is a pure function of the authored size and the rotation and is never
    /// cached, so it cannot go stale when an instance is rotated.
    pub fn footprint(&self, rotation: Rotation) -> Footprint {
        match rotation {
            Rotation::Deg90 => Footprint {
                width: self.base_height,
                height: self.base_width,
            },
            Rotation::Deg0 => Footprint {
                width: self.base_width,
                height: self.base_height,
            },
        }
    }

    /// Whether the piece may be placed with the given rotation.
    pub fn supports(&self, rotation: Rotation) -> bool {
        rotation == Rotation::Deg0 || self.can_rotate
    }

    pub fn is_listed_in(&self, location: &str) -> bool {
        self.locations.iter().any(|l| l == location)
    }
}

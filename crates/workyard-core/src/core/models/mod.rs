//! # Core Models Module
//!
//! Data structures describing the planning grid and what sits on it.
//!
//! ## Key Components
//!
//! - [`piece`] - Catalog piece types, discrete rotations and effective footprints
//! - [`cell`] - A single grid cell and its coordinate type
//! - [`grid`] - The fixed-shape 2-D cell array, plain or synthesized from areas
//! - [`instance`] - Placed instances and their persisted record form
//! - [`ids`] - Session-local identifiers for placed instances
//!
//! ## Usage
//!
//! ```ignore
//! use workyard::core::models::{grid::Grid, piece::Rotation};
//!
//! let grid = Grid::new(8, 8);
//! assert_eq!(grid.cells().count(), 64);
//! assert_eq!(Rotation::Deg0.toggled(), Rotation::Deg90);
//! ```

pub mod cell;
pub mod grid;
pub mod ids;
pub mod instance;
pub mod piece;

//! # Core Module
//!
//! Stateless building blocks of the planner.
//!
//! ## Architecture
//!
//! - **Spatial Representation** ([`models`]) - Piece types, rotations, grid cells, the grid
//!   itself, and placed instances
//! - **Piece Catalog** ([`catalog`]) - Registry of placeable piece types and the built-in
//!   workstation list
//! - **Buildable Areas** ([`layout`]) - Named rectangular regions used to synthesize grids
//!   with non-rectangular buildable footprints
//! - **Persistence** ([`io`]) - The store contract for saving and loading placements, with
//!   file-backed and in-memory implementations
//!
//! Nothing in this module mutates occupancy on its own; the grid's occupancy primitives are
//! crate-private and driven exclusively by the engine.

pub mod catalog;
pub mod io;
pub mod layout;
pub mod models;

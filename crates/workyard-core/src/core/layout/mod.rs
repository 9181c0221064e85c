//! Buildable-area layouts.
//!
//! A layout names a set of rectangular regions. Building a grid from a layout
//! ([`crate::core::models::grid::Grid::from_areas`]) sizes the grid to cover every region and
//! marks exactly the union of the regions as buildable, producing grids with holes.
//! Merge groups let several disjoint regions share one logical area name.

pub mod areas;

pub use areas::{AreaLayout, AreaRect, LayoutError, MergeGroup};

use super::error::PlacementError;
use crate::core::models::cell::CellCoord;
use crate::core::models::grid::Grid;
use crate::core::models::piece::Footprint;

/// A candidate footprint that lies entirely inside a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFootprint {
    pub origin: CellCoord,
    /// Covered cells, row-major, starting at `origin`.
    pub cells: Vec<CellCoord>,
}

/// Enumerates `{(x + i, y + j) : 0 ≤ i < width, 0 ≤ j < height}` row-major.
///
/// Candidates may lie partly or wholly off the grid, so coordinates are signed.
pub fn candidate_cells(x: i32, y: i32, footprint: Footprint) -> impl Iterator<Item = (i64, i64)> {
    let (x, y) = (i64::from(x), i64::from(y));
    let w = i64::try_from(footprint.width).unwrap_or(i64::MAX);
    let h = i64::try_from(footprint.height).unwrap_or(i64::MAX);
    (0..h).flat_map(move |j| (0..w).map(move |i| (x + i, y + j)))
}

/// Resolves a candidate footprint to grid cells.
///
/// # Errors
///
/// Returns `PlacementError::OutOfBounds` if the footprint is wider or taller than the
/// grid, or if any enumerated cell lies outside it. The size check runs first, so no
/// cell is enumerated for a footprint that cannot fit.
pub fn resolve(
    grid: &Grid,
    x: i32,
    y: i32,
    footprint: Footprint,
) -> Result<ResolvedFootprint, PlacementError> {
    if footprint.width > grid.width() || footprint.height > grid.height() {
        return Err(PlacementError::OutOfBounds);
    }
    let origin = grid
        .coord(i64::from(x), i64::from(y))
        .ok_or(PlacementError::OutOfBounds)?;
    let mut cells = Vec::with_capacity(footprint.width * footprint.height);
    for (cx, cy) in candidate_cells(x, y, footprint) {
        cells.push(grid.coord(cx, cy).ok_or(PlacementError::OutOfBounds)?);
    }
    Ok(ResolvedFootprint { origin, cells })
}

/// Converts a stored coordinate back into candidate space.
///
/// Values too large for a candidate saturate, which no grid can contain, so they
/// validate as out of bounds.
pub(crate) fn to_candidate(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

use super::error::PlacementError;
use super::footprint::{self, ResolvedFootprint};
use crate::core::models::grid::Grid;
use crate::core::models::ids::InstanceId;
use crate::core::models::piece::{PieceType, Rotation};
use tracing::{debug, trace};

/// Decides whether `piece` may occupy `(x, y)` at `rotation`.
///
/// Checks run in a fixed order and stop at the first failure:
///
/// 1. rotation capability,
/// 2. bounds of every footprint cell,
/// 3. buildability of every footprint cell,
/// 4. occupancy, where cells covered by `exclude` count as free.
///
/// The grid is never touched, so repeated calls with the same arguments return the
/// same verdict.
///
/// # Return
///
/// The resolved footprint on success, ready to be committed.
pub fn validate_placement(
    grid: &Grid,
    piece: &PieceType,
    x: i32,
    y: i32,
    rotation: Rotation,
    exclude: Option<InstanceId>,
) -> Result<ResolvedFootprint, PlacementError> {
    let verdict = check(grid, piece, x, y, rotation, exclude);
    match &verdict {
        Ok(_) => trace!(piece = %piece.id, x, y, %rotation, "Placement is valid"),
        Err(reason) => debug!(
            piece = %piece.id,
            x,
            y,
            %rotation,
            reason = reason.kind(),
            "Placement rejected: {}",
            reason
        ),
    }
    verdict
}

fn check(
    grid: &Grid,
    piece: &PieceType,
    x: i32,
    y: i32,
    rotation: Rotation,
    exclude: Option<InstanceId>,
) -> Result<ResolvedFootprint, PlacementError> {
    if !piece.supports(rotation) {
        return Err(PlacementError::RotationNotSupported {
            piece_id: piece.id.clone(),
        });
    }

    let resolved = footprint::resolve(grid, x, y, piece.footprint(rotation))?;

    for &coord in &resolved.cells {
        match grid.cell_at(coord) {
            Some(cell) if cell.buildable => {}
            _ => {
                return Err(PlacementError::NotBuildable {
                    x: coord.x,
                    y: coord.y,
                });
            }
        }
    }

    for &coord in &resolved.cells {
        if let Some(by) = grid.cell_at(coord).and_then(|c| c.occupant()) {
            if Some(by) != exclude {
                return Err(PlacementError::Occupied {
                    x: coord.x,
                    y: coord.y,
                    by,
                });
            }
        }
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::{AreaLayout, AreaRect};
    use crate::core::models::cell::CellCoord;
    use slotmap::KeyData;

    fn piece(width: usize, height: usize, can_rotate: bool) -> PieceType {
        PieceType {
            id: "crate".to_string(),
            name: "Crate".to_string(),
            base_width: width,
            base_height: height,
            can_rotate,
            image: None,
            locations: Vec::new(),
        }
    }

    fn id(n: u64) -> InstanceId {
        InstanceId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn accepts_free_buildable_cells() {
        let grid = Grid::new(4, 4);
        let resolved = validate_placement(&grid, &piece(2, 2, false), 1, 1, Rotation::Deg0, None)
            .unwrap();
        assert_eq!(resolved.origin, CellCoord::new(1, 1));
        assert_eq!(resolved.cells.len(), 4);
    }

    #[test]
    fn rotation_is_checked_before_bounds() {
        let grid = Grid::new(2, 2);
        let verdict = validate_placement(&grid, &piece(1, 1, false), 9, 9, Rotation::Deg90, None);
        assert_eq!(
            verdict,
            Err(PlacementError::RotationNotSupported {
                piece_id: "crate".to_string()
            })
        );
    }

    #[test]
    fn bounds_are_checked_before_buildability() {
        let layout = AreaLayout::new().with_area("a", AreaRect::new(0, 0, 1, 1));
        let grid = Grid::from_areas(&layout).unwrap();
        let verdict = validate_placement(&grid, &piece(2, 1, false), 0, 0, Rotation::Deg0, None);
        assert_eq!(verdict, Err(PlacementError::OutOfBounds));
    }

    #[test]
    fn pieces_larger_than_the_grid_are_out_of_bounds() {
        let grid = Grid::new(4, 4);
        let huge = piece(1 << 32, 1 << 32, true);
        assert_eq!(
            validate_placement(&grid, &huge, 0, 0, Rotation::Deg0, None),
            Err(PlacementError::OutOfBounds)
        );
        assert_eq!(
            validate_placement(&grid, &piece(100_000, 1, true), 0, 0, Rotation::Deg90, None),
            Err(PlacementError::OutOfBounds)
        );
    }

    #[test]
    fn holes_in_an_area_grid_are_not_buildable() {
        let layout = AreaLayout::new()
            .with_area("a", AreaRect::new(0, 0, 1, 1))
            .with_area("b", AreaRect::new(2, 0, 1, 1));
        let grid = Grid::from_areas(&layout).unwrap();
        let verdict = validate_placement(&grid, &piece(3, 1, false), 0, 0, Rotation::Deg0, None);
        assert_eq!(verdict, Err(PlacementError::NotBuildable { x: 1, y: 0 }));
    }

    #[test]
    fn buildability_is_checked_before_occupancy() {
        let layout = AreaLayout::new()
            .with_area("a", AreaRect::new(0, 0, 1, 1))
            .with_area("b", AreaRect::new(2, 0, 1, 1));
        let mut grid = Grid::from_areas(&layout).unwrap();
        grid.occupy_cells(&[CellCoord::new(0, 0)], id(1));
        let verdict = validate_placement(&grid, &piece(3, 1, false), 0, 0, Rotation::Deg0, None);
        assert_eq!(verdict, Err(PlacementError::NotBuildable { x: 1, y: 0 }));
    }

    #[test]
    fn occupied_cells_reject_unless_excluded() {
        let mut grid = Grid::new(3, 3);
        grid.occupy_cells(&[CellCoord::new(1, 1)], id(1));
        let crate_piece = piece(2, 2, false);

        assert_eq!(
            validate_placement(&grid, &crate_piece, 0, 0, Rotation::Deg0, None),
            Err(PlacementError::Occupied { x: 1, y: 1, by: id(1) })
        );
        assert!(validate_placement(&grid, &crate_piece, 0, 0, Rotation::Deg0, Some(id(1))).is_ok());
        assert!(matches!(
            validate_placement(&grid, &crate_piece, 0, 0, Rotation::Deg0, Some(id(2))),
            Err(PlacementError::Occupied { .. })
        ));
    }

    #[test]
    fn rotated_footprint_is_validated() {
        let grid = Grid::new(3, 2);
        let long = piece(1, 3, true);
        assert_eq!(
            validate_placement(&grid, &long, 0, 0, Rotation::Deg0, None),
            Err(PlacementError::OutOfBounds)
        );
        let resolved = validate_placement(&grid, &long, 0, 0, Rotation::Deg90, None).unwrap();
        assert_eq!(resolved.cells.len(), 3);
        assert!(resolved.cells.iter().all(|c| c.y == 0));
    }

    #[test]
    fn repeated_validation_returns_the_same_verdict() {
        let mut grid = Grid::new(4, 4);
        grid.occupy_cells(&[CellCoord::new(2, 2)], id(1));
        let crate_piece = piece(2, 2, true);
        for (x, y) in [(0, 0), (1, 1), (3, 3), (-1, 2)] {
            let first = validate_placement(&grid, &crate_piece, x, y, Rotation::Deg0, None);
            for _ in 0..3 {
                assert_eq!(
                    validate_placement(&grid, &crate_piece, x, y, Rotation::Deg0, None),
                    first
                );
            }
        }
    }
}

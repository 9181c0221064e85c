use super::cell::{CellCoord, GridCell};
use super::ids::InstanceId;
use crate::core::layout::{AreaLayout, LayoutError};
use std::collections::BTreeMap;

/// Side length of the grid used when no location or layout is configured.
pub const DEFAULT_GRID_SIZE: usize = 10;

/// Upper bound on the number of cells in any grid.
pub const MAX_GRID_CELLS: usize = 1 << 20;

/// Whether a `width × height` grid stays within [`MAX_GRID_CELLS`].
pub fn within_cell_limit(width: usize, height: usize) -> bool {
    width
        .checked_mul(height)
        .is_some_and(|cells| cells <= MAX_GRID_CELLS)
}

const UNBUILDABLE_GLYPH: char = '#';
const FREE_GLYPH: char = '.';

/// A fixed-shape, mutable-content 2-D array of cells.
///
/// The dimensions never change after construction. Cells are stored row-major and every
/// cell's `(x, y)` equals its position in the array. Occupancy may only be changed by the
/// engine through the crate-private [`Grid::occupy_cells`] and [`Grid::free_cells`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<GridCell>,
}

impl Grid {
    /// Creates a plain `width × height` grid in which every cell is buildable.
    pub fn new(width: usize, height: usize) -> Self {
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| GridCell::new(x, y, true)))
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    /// Synthesizes a grid from named buildable areas.
    ///
    /// The grid extent is the smallest origin-anchored rectangle covering every area.
    /// Exactly the union of the area rectangles is buildable; each covered cell is tagged
    /// with its area name resolved through the layout's merge groups. Cells outside all
    /// areas stay unbuildable and untagged.
    ///
    /// # Errors
    ///
    /// Returns the layout's validation error if it has no areas, a degenerate area, or
    /// conflicting merge groups.
    pub fn from_areas(layout: &AreaLayout) -> Result<Self, LayoutError> {
        layout.validate()?;
        let (width, height) = layout.extent();
        let mut cells: Vec<GridCell> = (0..height)
            .flat_map(|y| (0..width).map(move |x| GridCell::new(x, y, false)))
            .collect();

        for (area_id, rect) in &layout.areas {
            let tag = layout.effective_area_id(area_id);
            for coord in rect.cells() {
                let cell = &mut cells[coord.y * width + coord.x];
                cell.buildable = true;
                cell.area = Some(tag.to_string());
            }
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Converts signed candidate coordinates into a cell coordinate, if inside the grid.
    pub fn coord(&self, x: i64, y: i64) -> Option<CellCoord> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then_some(CellCoord::new(x, y))
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&GridCell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x)
    }

    pub fn cell_at(&self, coord: CellCoord) -> Option<&GridCell> {
        self.cell(coord.x, coord.y)
    }

    fn cell_mut(&mut self, coord: CellCoord) -> Option<&mut GridCell> {
        if coord.x >= self.width || coord.y >= self.height {
            return None;
        }
        self.cells.get_mut(coord.y * self.width + coord.x)
    }

    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter()
    }

    /// Iterates rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(self.width.max(1))
    }

    pub fn buildable_count(&self) -> usize {
        self.cells.iter().filter(|c| c.buildable).count()
    }

    /// Distinct area names present in the grid, sorted.
    pub fn area_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .cells
            .iter()
            .filter_map(|c| c.area.as_deref())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Snapshot of every occupied cell and the instance covering it.
    pub fn occupied_cells(&self) -> BTreeMap<CellCoord, InstanceId> {
        self.cells
            .iter()
            .filter_map(|c| c.occupant().map(|id| (c.coord(), id)))
            .collect()
    }

    /// Marks exactly `coords` as covered by `id`.
    ///
    /// Callers must have validated `coords` against this grid; coordinates outside the
    /// grid are ignored.
    pub(crate) fn occupy_cells(&mut self, coords: &[CellCoord], id: InstanceId) {
        for &coord in coords {
            if let Some(cell) = self.cell_mut(coord) {
                cell.set_occupant(id);
            }
        }
    }

    /// Clears `coords` that are currently covered by `id`.
    ///
    /// Cells covered by a different instance are left alone, so freeing a stale
    /// footprint can never erase another instance's back-reference.
    pub(crate) fn free_cells(&mut self, coords: &[CellCoord], id: InstanceId) {
        for &coord in coords {
            if let Some(cell) = self.cell_mut(coord) {
                if cell.occupant() == Some(id) {
                    cell.clear_occupant();
                }
            }
        }
    }

    /// Renders one character per cell: `#` for unbuildable, `.` for free, and the glyph
    /// chosen by `glyph_for` for occupied cells. Rows are separated by newlines.
    pub fn render_ascii(&self, glyph_for: impl Fn(InstanceId) -> char) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.rows() {
            for cell in row {
                let glyph = match cell.occupant() {
                    Some(id) => glyph_for(id),
                    None if !cell.buildable => UNBUILDABLE_GLYPH,
                    None => FREE_GLYPH,
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE, DEFAULT_GRID_SIZE)
    }
}

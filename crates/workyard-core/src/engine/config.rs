use crate::core::catalog::builtin::location_grid_size;
use crate::core::layout::{AreaLayout, LayoutError};
use crate::core::models::grid::{DEFAULT_GRID_SIZE, Grid, MAX_GRID_CELLS, within_cell_limit};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid grid size {width}x{height}; both dimensions must be at least 1")]
    InvalidGridSize { width: usize, height: usize },
    #[error("Grid size {width}x{height} exceeds the limit of {max} cells", max = MAX_GRID_CELLS)]
    GridTooLarge { width: usize, height: usize },
    #[error("Unknown load policy '{0}'; expected one of: trust, drop-invalid, reject")]
    UnknownLoadPolicy(String),
}

/// Where a session's grid comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridSource {
    /// A plain rectangle in which every cell is buildable.
    Rectangle { width: usize, height: usize },
    /// A grid synthesized from named buildable areas.
    Areas(AreaLayout),
}

impl GridSource {
    /// The fixed grid of a known game location, if `location` names one.
    pub fn for_location(location: &str) -> Option<Self> {
        location_grid_size(location).map(|(width, height)| GridSource::Rectangle { width, height })
    }

    pub fn build(&self) -> Result<Grid, LayoutError> {
        match self {
            GridSource::Rectangle { width, height } => {
                if !within_cell_limit(*width, *height) {
                    return Err(LayoutError::TooLarge {
                        width: *width,
                        height: *height,
                    });
                }
                Ok(Grid::new(*width, *height))
            }
            GridSource::Areas(layout) => Grid::from_areas(layout),
        }
    }
}

impl Default for GridSource {
    fn default() -> Self {
        GridSource::Rectangle {
            width: DEFAULT_GRID_SIZE,
            height: DEFAULT_GRID_SIZE,
        }
    }
}

/// How saved placements are treated when they are replayed into a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadPolicy {
    /// Replay without validation. Records the grid cannot represent (unknown piece,
    /// off-grid) are still skipped.
    ///
    /// Overlapping records are all kept, and a later record takes over the cell
    /// back-references of the cells it shares with an earlier one. Removing either
    /// instance then frees the shared cells even though the other still covers them.
    Trust,
    /// Re-validate each record in order and drop the ones that no longer fit.
    #[default]
    DropInvalid,
    /// Fail the whole load if any record no longer fits.
    Reject,
}

impl FromStr for LoadPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trust" => Ok(LoadPolicy::Trust),
            "drop-invalid" | "drop_invalid" => Ok(LoadPolicy::DropInvalid),
            "reject" => Ok(LoadPolicy::Reject),
            other => Err(ConfigError::UnknownLoadPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for LoadPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoadPolicy::Trust => "trust",
            LoadPolicy::DropInvalid => "drop-invalid",
            LoadPolicy::Reject => "reject",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    pub grid: GridSource,
    pub load_policy: LoadPolicy,
}

#[derive(Default)]
pub struct PlannerConfigBuilder {
    grid: Option<GridSource>,
    load_policy: Option<LoadPolicy>,
}

impl PlannerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grid(mut self, source: GridSource) -> Self {
        self.grid = Some(source);
        self
    }
    pub fn load_policy(mut self, policy: LoadPolicy) -> Self {
        self.load_policy = Some(policy);
        self
    }

    pub fn build(self) -> Result<PlannerConfig, ConfigError> {
        let grid = self.grid.ok_or(ConfigError::MissingParameter("grid"))?;
        if let GridSource::Rectangle { width, height } = grid {
            if width == 0 || height == 0 {
                return Err(ConfigError::InvalidGridSize { width, height });
            }
            if !within_cell_limit(width, height) {
                return Err(ConfigError::GridTooLarge { width, height });
            }
        }
        Ok(PlannerConfig {
            grid,
            load_policy: self.load_policy.unwrap_or_default(),
        })
    }
}

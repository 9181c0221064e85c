use crate::core::models::cell::CellCoord;
use crate::core::models::grid::{MAX_GRID_CELLS, within_cell_limit};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use thiserror::Error;

const INLINE_SOURCE: &str = "<inline>";

/// A named buildable rectangle, in grid cells.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AreaRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl AreaRect {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge. Saturates; [`AreaLayout::validate`] rejects rectangles
    /// whose edges overflow.
    pub fn right(&self) -> usize {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge. Saturates like [`AreaRect::right`].
    pub fn bottom(&self) -> usize {
        self.y.saturating_add(self.height)
    }

    fn edges_fit(&self) -> bool {
        self.x.checked_add(self.width).is_some() && self.y.checked_add(self.height).is_some()
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        (self.y..self.bottom()).flat_map(move |y| (self.x..self.right()).map(move |x| CellCoord::new(x, y)))
    }
}

/// Declares that several regions are tagged with one logical area name.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MergeGroup {
    pub into: String,
    pub members: Vec<String>,
}

impl MergeGroup {
    pub fn new(into: &str, members: &[&str]) -> Self {
        Self {
            into: into.to_string(),
            members: members.iter().map(|m| m.to_string()).collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("JSON parsing error for '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("Area layout defines no areas")]
    Empty,
    #[error("Area '{0}' has zero width or height")]
    EmptyArea(String),
    #[error("Area '{0}' extends past the largest representable coordinate")]
    AreaOverflow(String),
    #[error("Area layout spans {width}x{height} cells; at most {max} cells are supported", max = MAX_GRID_CELLS)]
    TooLarge { width: usize, height: usize },
    #[error("Area '{area}' is claimed by merge groups '{first}' and '{second}'")]
    ConflictingMerge {
        area: String,
        first: String,
        second: String,
    },
}

/// A set of named buildable regions plus the merge groups that coalesce them.
///
/// Areas are kept in name order. Where rectangles overlap, the area that sorts last
/// tags the shared cells.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct AreaLayout {
    pub areas: BTreeMap<String, AreaRect>,
    #[serde(default)]
    pub merge: Vec<MergeGroup>,
}

impl AreaLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_area(mut self, id: &str, rect: AreaRect) -> Self {
        self.areas.insert(id.to_string(), rect);
        self
    }

    pub fn with_merge(mut self, group: MergeGroup) -> Self {
        self.merge.push(group);
        self
    }

    /// The merge rule historically hard-wired into the planner: regions `b` and `c`
    /// form the single logical area `bc`.
    pub fn legacy_merge_groups() -> Vec<MergeGroup> {
        vec![MergeGroup::new("bc", &["b", "c"])]
    }

    /// Loads a layout, choosing the format by file extension.
    ///
    /// `.json` files use the legacy flat form (`{"a": {"x":..}, ...}`) and receive the
    /// legacy merge groups; anything else is read as TOML with explicit `[areas.*]`
    /// tables and optional `[[merge]]` entries.
    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        let content = std::fs::read_to_string(path).map_err(|e| LayoutError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let origin = path.to_string_lossy();
        if is_json {
            Self::parse_legacy_json(&content, &origin)
        } else {
            Self::parse_toml(&content, &origin)
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, LayoutError> {
        Self::parse_toml(content, INLINE_SOURCE)
    }

    pub fn from_legacy_json_str(content: &str) -> Result<Self, LayoutError> {
        Self::parse_legacy_json(content, INLINE_SOURCE)
    }

    fn parse_toml(content: &str, origin: &str) -> Result<Self, LayoutError> {
        let layout: AreaLayout = toml::from_str(content).map_err(|e| LayoutError::Toml {
            path: origin.to_string(),
            source: e,
        })?;
        layout.validate()?;
        Ok(layout)
    }

    fn parse_legacy_json(content: &str, origin: &str) -> Result<Self, LayoutError> {
        let areas: BTreeMap<String, AreaRect> =
            serde_json::from_str(content).map_err(|e| LayoutError::Json {
                path: origin.to_string(),
                source: e,
            })?;
        let layout = Self {
            areas,
            merge: Self::legacy_merge_groups(),
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Checks that the layout can produce a grid: at least one area, no degenerate or
    /// overflowing rectangles, an extent within [`MAX_GRID_CELLS`], and no area claimed
    /// by two merge groups.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.areas.is_empty() {
            return Err(LayoutError::Empty);
        }
        if let Some((id, _)) = self
            .areas
            .iter()
            .find(|(_, rect)| rect.width == 0 || rect.height == 0)
        {
            return Err(LayoutError::EmptyArea(id.clone()));
        }
        if let Some((id, _)) = self.areas.iter().find(|(_, rect)| !rect.edges_fit()) {
            return Err(LayoutError::AreaOverflow(id.clone()));
        }
        let (width, height) = self.extent();
        if !within_cell_limit(width, height) {
            return Err(LayoutError::TooLarge { width, height });
        }

        let mut claimed: HashMap<&str, &str> = HashMap::new();
        for group in &self.merge {
            for member in &group.members {
                if let Some(first) = claimed.insert(member.as_str(), group.into.as_str()) {
                    if first != group.into {
                        return Err(LayoutError::ConflictingMerge {
                            area: member.clone(),
                            first: first.to_string(),
                            second: group.into.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Resolves an area name through the merge groups.
    pub fn effective_area_id<'a>(&'a self, id: &'a str) -> &'a str {
        self.merge
            .iter()
            .find(|group| group.members.iter().any(|m| m == id))
            .map_or(id, |group| group.into.as_str())
    }

    /// Smallest `(width, height)` anchored at the origin that covers every area.
    pub fn extent(&self) -> (usize, usize) {
        self.areas.values().fold((0, 0), |(w, h), rect| {
            (w.max(rect.right()), h.max(rect.bottom()))
        })
    }
}

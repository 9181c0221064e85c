use super::builtin::{BUILTIN_PIECES, PLACEHOLDER_IMAGE};
use crate::core::models::piece::PieceType;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// A piece entry as authored in a catalog file.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PieceRecord {
    pub name: String,
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub can_rotate: bool,
    #[serde(default)]
    pub locations: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    pieces: Vec<PieceRecord>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
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
    #[error("Piece at position {0} has an empty name")]
    EmptyName(usize),
    #[error("Piece '{name}' has invalid dimensions {width}x{height}; both must be at least 1")]
    InvalidDimensions {
        name: String,
        width: usize,
        height: usize,
    },
    #[error("Pieces '{first}' and '{second}' both derive the id '{id}'")]
    DuplicateId {
        id: String,
        first: String,
        second: String,
    },
    #[error("Unknown piece id '{0}'")]
    UnknownPiece(String),
}

/// Derives a catalog id from a display name: lowercase, with every run of whitespace
/// replaced by a single underscore, including runs at either end.
pub fn derive_piece_id(name: &str) -> String {
    let mut id = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                id.push('_');
            }
            in_whitespace = true;
        } else {
            id.extend(c.to_lowercase());
            in_whitespace = false;
        }
    }
    id
}

/// Read-only registry of piece types, in authored order.
#[derive(Debug, Clone, Default)]
pub struct PieceCatalog {
    pieces: Vec<Arc<PieceType>>,
    index: HashMap<String, usize>,
}

impl PieceCatalog {
    /// Builds a catalog from authored records.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::EmptyName` or `CatalogError::InvalidDimensions` for a
    /// malformed record, and `CatalogError::DuplicateId` when two names derive the same id.
    pub fn from_records(
        records: impl IntoIterator<Item = PieceRecord>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for (position, record) in records.into_iter().enumerate() {
            if record.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(position));
            }
            let id = derive_piece_id(&record.name);
            if record.width == 0 || record.height == 0 {
                return Err(CatalogError::InvalidDimensions {
                    name: record.name,
                    width: record.width,
                    height: record.height,
                });
            }
            if let Some(&existing) = catalog.index.get(&id) {
                return Err(CatalogError::DuplicateId {
                    id,
                    first: catalog.pieces[existing].name.clone(),
                    second: record.name,
                });
            }

            catalog.index.insert(id.clone(), catalog.pieces.len());
            catalog.pieces.push(Arc::new(PieceType {
                id,
                name: record.name,
                base_width: record.width,
                base_height: record.height,
                can_rotate: record.can_rotate,
                image: record.image,
                locations: record.locations,
            }));
        }
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let file: CatalogFile = toml::from_str(&content).map_err(|e| CatalogError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_records(file.pieces)
    }

    /// The Graveyard Keeper workstation list shipped with the planner.
    pub fn builtin() -> Self {
        let records = BUILTIN_PIECES.iter().map(|p| PieceRecord {
            name: p.name.to_string(),
            width: p.width,
            height: p.height,
            image: Some(PLACEHOLDER_IMAGE.to_string()),
            can_rotate: p.can_rotate,
            locations: p.locations.iter().map(|l| l.to_string()).collect(),
        });
        Self::from_records(records).unwrap_or_default()
    }

    /// Looks up a piece type by id.
    ///
    /// An unknown id is a caller bug (ids come from this catalog), reported as
    /// `CatalogError::UnknownPiece`.
    pub fn lookup(&self, id: &str) -> Result<&Arc<PieceType>, CatalogError> {
        self.get(id)
            .ok_or_else(|| CatalogError::UnknownPiece(id.to_string()))
    }

    pub fn get(&self, id: &str) -> Option<&Arc<PieceType>> {
        self.index.get(id).map(|&i| &self.pieces[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<PieceType>> {
        self.pieces.iter()
    }

    /// Pieces listed under `location`, in catalog order.
    pub fn for_location<'a>(&'a self, location: &'a str) -> impl Iterator<Item = &'a Arc<PieceType>> {
        self.pieces.iter().filter(move |p| p.is_listed_in(location))
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

//! Piece catalog: the static registry of placeable piece types.
//!
//! Catalogs are loaded once at startup, either from a TOML file or from the built-in
//! Graveyard Keeper workstation list, and are never mutated afterwards.

pub mod builtin;
pub mod registry;

pub use registry::{CatalogError, PieceCatalog, PieceRecord, derive_piece_id};

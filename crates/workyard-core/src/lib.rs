//! # Workyard Core Library
//!
//! A grid placement and validation engine for planning workstation layouts on the
//! fixed, discrete grids of Graveyard Keeper locations (workyard, garden, morgue).
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture so that the spatial rules stay
//! independent from how a plan is stored or presented.
//!
//! - **[`core`]: The Foundation.** Stateless data: the piece catalog, the grid model and
//!   its buildable-area layouts, placement records, and the persistence contract.
//!
//! - **[`engine`]: The Logic Core.** The stateful layer. It enumerates footprints,
//!   validates candidate placements, and owns the [`engine::session::Session`], which keeps
//!   grid occupancy and the set of placed instances mutually consistent across every
//!   place, move, rotate and remove. It also implements the non-committing ghost preview.
//!
//! - **[`workflows`]: The Public API.** Entry points that tie a configuration, a catalog
//!   and a store together: open a session by replaying a saved plan, and save it back.

pub mod core;
pub mod engine;
pub mod workflows;

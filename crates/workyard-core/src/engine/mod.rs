//! # Engine Module
//!
//! The stateful layer of the planner: validation and the commit protocol that keeps the
//! grid's occupancy and the set of placed instances consistent at all times.
//!
//! ## Architecture
//!
//! - **Footprints** ([`footprint`]) - Enumerates the exact cells a candidate covers
//! - **Validation** ([`validation`]) - Ordered, short-circuiting legality checks
//! - **Session** ([`session`]) - The authoritative set of placed instances bound to a grid,
//!   with place, move, rotate and remove operations
//! - **Ghost Preview** ([`ghost`]) - Non-committing, continuously re-validated previews of
//!   a pending placement or move
//! - **Transactions** ([`transaction`]) - Snapshot-and-restore around multi-step edits
//! - **Shared Access** ([`shared`]) - A single-writer handle for use across threads
//! - **Configuration** ([`config`]) - Grid source and saved-plan load policy
//! - **Error Handling** ([`error`]) - Validation verdicts and engine failures
//!
//! ## Guarantees
//!
//! - Validation always happens strictly before mutation; a rejected operation leaves the
//!   grid and the instance set exactly as they were.
//! - Grid occupancy is only changed in matched occupy/free pairs driven by the session.
//! - Operations run to completion synchronously; every mutating call returns the
//!   resulting instance so callers decide when and how to re-render.

pub mod config;
pub mod error;
pub mod footprint;
pub mod ghost;
pub mod session;
pub mod shared;
pub(crate) mod transaction;
pub mod validation;

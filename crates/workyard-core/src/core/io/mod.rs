//! Persistence of placed instances.
//!
//! The engine only depends on the [`traits::PlanStore`] contract: save an ordered list of
//! placement records, or load it back (empty when nothing has been saved). Storage media
//! are interchangeable implementations of that trait.

pub mod file;
pub mod memory;
pub mod traits;

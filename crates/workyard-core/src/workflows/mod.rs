//! # Workflows Module
//!
//! High-level entry points that tie a [`PlannerConfig`](crate::engine::config::PlannerConfig),
//! a [`PieceCatalog`](crate::core::catalog::PieceCatalog) and a
//! [`PlanStore`](crate::core::io::traits::PlanStore) together.
//!
//! ## Overview
//!
//! A plan's life cycle is: build the grid, replay the saved placements under the
//! configured load policy, edit the session, and save it back. Each step either completes
//! or leaves both the in-memory session and the stored plan unchanged.
//!
//! - **Plan Workflow** ([`plan`]) - open, reload, edit-and-save, save

pub mod plan;

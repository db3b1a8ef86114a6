//! Candidate-assignment matching for maritime crew management.
//!
//! The scoring, ranking and aggregation code under [`workflows::matching`] is pure and
//! synchronous; only the recompute controller carries state.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;

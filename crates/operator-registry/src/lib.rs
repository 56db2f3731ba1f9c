//! Relevance-ranked registry of health-plan operators.
//!
//! Records are imported once from the regulator's CSV export, scored, frozen into a
//! [`registry::RankedDataset`], and served read-only through [`registry::QueryService`].

pub mod config;
pub mod error;
pub mod registry;
pub mod telemetry;

//! Operator registry: import, relevance scoring, the frozen ranked snapshot, and the
//! read-only query surface served over HTTP.

pub mod domain;
pub mod ingest;
pub mod query;
pub mod ranked;
pub mod router;
pub mod scoring;

#[cfg(test)]
mod tests;

pub use domain::{CoverageRegion, Modality, Operator, RankedOperator};
pub use ingest::{RegistryImportError, RegistryImporter};
pub use query::{
    HealthReport, HealthStatus, ListPage, Pagination, QueryError, QueryService,
    DEFAULT_PAGE_SIZE, MAX_SEARCH_RESULTS, MIN_SEARCH_LENGTH,
};
pub use ranked::RankedDataset;
pub use router::registry_router;
pub use scoring::{RelevanceScorer, ScoreBreakdown, TenureDistribution};

use serde::Serialize;
use std::sync::Arc;

use super::domain::{Operator, RankedOperator};
use super::ranked::RankedDataset;

pub const DEFAULT_PAGE_SIZE: usize = 15;
pub const MIN_SEARCH_LENGTH: usize = 2;
pub const MAX_SEARCH_RESULTS: usize = 50;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("operator dataset is not loaded")]
    DatasetUnavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: i64,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl Pagination {
    /// Always reports one page more than the full pages, so an exact multiple of
    /// `per_page` ends with an empty trailing page. Existing clients depend on it.
    pub fn total_pages(total_items: usize, per_page: usize) -> usize {
        total_items / per_page.max(1) + 1
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListPage<'a> {
    pub data: &'a [RankedOperator],
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub records_loaded: usize,
    pub columns: Vec<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Ok,
    Error,
}

/// Read-only listing and search over a ranked snapshot.
///
/// A service without a dataset (the load failed or produced nothing) answers every
/// query with [`QueryError::DatasetUnavailable`].
#[derive(Debug, Clone, Default)]
pub struct QueryService {
    dataset: Option<Arc<RankedDataset>>,
}

impl QueryService {
    pub fn new(dataset: Arc<RankedDataset>) -> Self {
        if dataset.is_empty() {
            return Self::unavailable();
        }
        Self {
            dataset: Some(dataset),
        }
    }

    pub fn unavailable() -> Self {
        Self { dataset: None }
    }

    pub fn dataset(&self) -> Option<&RankedDataset> {
        self.dataset.as_deref()
    }

    pub fn is_available(&self) -> bool {
        self.dataset.is_some()
    }

    pub fn health(&self) -> HealthReport {
        match self.dataset() {
            Some(dataset) => HealthReport {
                status: HealthStatus::Ok,
                records_loaded: dataset.total_count(),
                columns: Operator::COLUMNS.to_vec(),
            },
            None => HealthReport {
                status: HealthStatus::Error,
                records_loaded: 0,
                columns: Vec::new(),
            },
        }
    }

    pub fn list(&self, page: i64, per_page: usize) -> Result<ListPage<'_>, QueryError> {
        let dataset = self.dataset().ok_or(QueryError::DatasetUnavailable)?;
        let per_page = per_page.max(1);
        let current_page = page.max(1);
        let total_items = dataset.total_count();

        Ok(ListPage {
            data: dataset.page(current_page, per_page),
            pagination: Pagination {
                current_page,
                per_page,
                total_items,
                total_pages: Pagination::total_pages(total_items, per_page),
            },
        })
    }

    /// Case-insensitive substring search over names, registration id and tax id.
    ///
    /// Terms shorter than [`MIN_SEARCH_LENGTH`] characters after trimming return no
    /// results; otherwise at most [`MAX_SEARCH_RESULTS`] hits are returned, most
    /// relevant first.
    pub fn search(&self, query: &str) -> Result<Vec<&RankedOperator>, QueryError> {
        let dataset = self.dataset().ok_or(QueryError::DatasetUnavailable)?;
        let needle = query.trim().to_lowercase();
        if needle.chars().count() < MIN_SEARCH_LENGTH {
            return Ok(Vec::new());
        }

        Ok(dataset.matching(&needle, MAX_SEARCH_RESULTS))
    }
}

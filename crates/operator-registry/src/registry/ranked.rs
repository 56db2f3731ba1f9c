use chrono::NaiveDate;

use super::domain::{Operator, RankedOperator};
use super::scoring::{RelevanceScorer, TenureDistribution};

/// Immutable snapshot of every operator, ordered by relevance.
///
/// Built once at startup; nothing here mutates after [`RankedDataset::build`], so the
/// dataset can be shared behind an `Arc` and read concurrently without locking.
#[derive(Debug, Clone)]
pub struct RankedDataset {
    as_of: NaiveDate,
    entries: Vec<RankedOperator>,
    search_keys: Vec<SearchKey>,
}

impl RankedDataset {
    pub fn build(operators: Vec<Operator>, as_of: NaiveDate) -> Self {
        let scorer = RelevanceScorer::new(TenureDistribution::collect(&operators, as_of));

        let mut entries: Vec<RankedOperator> = operators
            .into_iter()
            .map(|operator| {
                let score = scorer.score(&operator);
                RankedOperator::new(operator, score)
            })
            .collect();

        // `sort_by` is stable, so equal scores keep their import order.
        entries.sort_by(|left, right| {
            right
                .relevance_score()
                .total_cmp(&left.relevance_score())
        });

        let search_keys = entries
            .iter()
            .map(|entry| SearchKey::new(entry.operator()))
            .collect();

        Self {
            as_of,
            entries,
            search_keys,
        }
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn total_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One-indexed page; page numbers below 1 read the first page.
    pub fn page(&self, page_number: i64, page_size: usize) -> &[RankedOperator] {
        let page_index = usize::try_from(page_number.max(1) - 1).unwrap_or(usize::MAX);
        let start = page_index.saturating_mul(page_size);
        if start >= self.entries.len() {
            return &[];
        }
        let end = start.saturating_add(page_size).min(self.entries.len());
        &self.entries[start..end]
    }

    pub fn all(&self) -> &[RankedOperator] {
        &self.entries
    }

    /// Up to `limit` entries whose searchable fields contain `needle`, in ranked order.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matching(&self, needle: &str, limit: usize) -> Vec<&RankedOperator> {
        self.entries
            .iter()
            .zip(&self.search_keys)
            .filter(|(_, key)| key.contains(needle))
            .map(|(entry, _)| entry)
            .take(limit)
            .collect()
    }
}

/// Lowercased copies of the four searchable fields, computed once per entry.
#[derive(Debug, Clone)]
struct SearchKey {
    fields: [String; 4],
}

impl SearchKey {
    fn new(operator: &Operator) -> Self {
        Self {
            fields: [
                operator.legal_name.to_lowercase(),
                operator.trade_name.to_lowercase(),
                operator.registration_id.to_lowercase(),
                operator.tax_id.to_lowercase(),
            ],
        }
    }

    fn contains(&self, needle: &str) -> bool {
        self.fields.iter().any(|field| field.contains(needle))
    }
}

//! Relevance scoring.
//!
//! The tenure criterion is a percentile rank over every dated operator, so scoring
//! needs the whole dataset: [`TenureDistribution::collect`] runs first, then
//! [`RelevanceScorer::score`] is applied per record against that distribution.

use chrono::NaiveDate;
use serde::Serialize;

use super::domain::Operator;

const DAYS_PER_YEAR: f64 = 365.0;
const TENURE_SCALE: f64 = 2.0;

/// Years an operator has been registered as of `as_of`.
///
/// Registrations dated after `as_of` have no tenure.
pub fn years_in_market(registration_date: Option<NaiveDate>, as_of: NaiveDate) -> Option<f64> {
    let registered = registration_date?;
    if registered > as_of {
        return None;
    }
    Some((as_of - registered).num_days() as f64 / DAYS_PER_YEAR)
}

/// Sorted tenure values of every dated operator in the dataset.
#[derive(Debug, Clone)]
pub struct TenureDistribution {
    as_of: NaiveDate,
    sorted_years: Vec<f64>,
}

impl TenureDistribution {
    pub fn collect<'a, I>(operators: I, as_of: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'a Operator>,
    {
        let mut sorted_years: Vec<f64> = operators
            .into_iter()
            .filter_map(|operator| years_in_market(operator.registration_date, as_of))
            .collect();
        sorted_years.sort_by(f64::total_cmp);
        Self {
            as_of,
            sorted_years,
        }
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn len(&self) -> usize {
        self.sorted_years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted_years.is_empty()
    }

    /// Fractional rank of `years` in (0, 1], averaging the ranks of tied values.
    pub fn percentile_rank(&self, years: f64) -> f64 {
        let total = self.sorted_years.len();
        if total == 0 {
            return 0.0;
        }

        let below = self.sorted_years.partition_point(|value| *value < years);
        let through = self.sorted_years.partition_point(|value| *value <= years);
        let tied = through - below;
        if tied == 0 {
            return below as f64 / total as f64;
        }

        let average_rank = below as f64 + (tied as f64 + 1.0) / 2.0;
        average_rank / total as f64
    }
}

/// Per-criterion contributions for one operator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub coverage: f64,
    pub tenure: f64,
    pub modality: f64,
    pub digital_presence: f64,
    pub contact: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.coverage + self.tenure + self.modality + self.digital_presence + self.contact
    }
}

/// Scores operators against a dataset-wide tenure distribution.
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    distribution: TenureDistribution,
}

impl RelevanceScorer {
    pub fn new(distribution: TenureDistribution) -> Self {
        Self { distribution }
    }

    pub fn distribution(&self) -> &TenureDistribution {
        &self.distribution
    }

    pub fn score(&self, operator: &Operator) -> f64 {
        self.breakdown(operator).total()
    }

    pub fn breakdown(&self, operator: &Operator) -> ScoreBreakdown {
        let tenure = years_in_market(operator.registration_date, self.distribution.as_of())
            .map(|years| self.distribution.percentile_rank(years) * TENURE_SCALE)
            .unwrap_or(0.0);

        ScoreBreakdown {
            coverage: operator.coverage_region.weight(),
            tenure,
            modality: operator.modality.weight(),
            digital_presence: presence(operator.has_electronic_address()),
            contact: presence(operator.has_phone()) + presence(operator.has_fax()),
        }
    }
}

fn presence(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

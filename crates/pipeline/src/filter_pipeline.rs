//! The FilterPipeline chains filters into an ordered reduction.

use crate::filters::{AgeFilter, BudgetFilter, KeywordFilter, LocationFilter, SkillsFilter};
use crate::traits::Filter;
use listings::{JobFilter, JobListing};

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(BudgetFilter)
///     .add_filter(SkillsFilter);
///
/// let qualified = pipeline.apply(jobs, &criteria);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// The fixed qualification order: budget, skills, keywords, location, age.
    pub fn standard() -> Self {
        Self::new()
            .add_filter(BudgetFilter)
            .add_filter(SkillsFilter)
            .add_filter(KeywordFilter)
            .add_filter(LocationFilter)
            .add_filter(AgeFilter)
    }

    /// Add a filter to the end of the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the filters in application order.
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Apply all filters in sequence.
    ///
    /// ## Algorithm
    /// 1. Start with the input listings
    /// 2. For each filter in order:
    ///    a. Log filter name and input count
    ///    b. Apply the filter to the previous stage's output
    ///    c. Log output count
    /// 3. Return the final retained set
    pub fn apply(&self, jobs: Vec<JobListing>, criteria: &JobFilter) -> Vec<JobListing> {
        self.filters.iter().fold(jobs, |current, filter| {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            let retained = filter.apply(current, criteria);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                retained.len()
            );
            retained
        })
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

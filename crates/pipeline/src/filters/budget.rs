//! Filter by budget range.
//!
//! Compares each listing's derived numeric budget against optional,
//! inclusive bounds. Listings whose budget is unknown are kept.

use crate::traits::Filter;
use listings::{JobFilter, JobListing};

/// Keep listings whose numeric budget lies within `[min_budget, max_budget]`.
///
/// ## Algorithm
/// 1. If neither bound is set, return the input unchanged
/// 2. For each listing:
///    a. If the budget value is not known, keep it
///    b. Otherwise keep it iff it satisfies every bound that is set
pub fn filter_by_budget(
    jobs: Vec<JobListing>,
    min_budget: Option<f64>,
    max_budget: Option<f64>,
) -> Vec<JobListing> {
    if min_budget.is_none() && max_budget.is_none() {
        return jobs;
    }

    let before = jobs.len();
    let retained: Vec<JobListing> = jobs
        .into_iter()
        .filter(|job| match job.budget_value().known() {
            None => true,
            Some(value) => {
                min_budget.is_none_or(|min| value >= min) && max_budget.is_none_or(|max| value <= max)
            }
        })
        .collect();

    tracing::debug!("Budget filter: {} -> {} jobs", before, retained.len());
    retained
}

pub struct BudgetFilter;

impl Filter for BudgetFilter {
    fn name(&self) -> &str {
        "BudgetFilter"
    }

    fn apply(&self, jobs: Vec<JobListing>, criteria: &JobFilter) -> Vec<JobListing> {
        filter_by_budget(jobs, criteria.min_budget, criteria.max_budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::job;

    fn budgets() -> Vec<JobListing> {
        vec![
            job(1).with_budget("$2,000"),
            job(2),
            job(3).with_hourly_rate("$45-$65/hr"),
            job(4).with_budget("$5,000"),
            job(5).with_budget("Negotiable"),
        ]
    }

    fn ids(jobs: &[JobListing]) -> Vec<String> {
        jobs.iter().map(|j| j.title().to_string()).collect()
    }

    #[test]
    fn test_min_budget_keeps_unknown() {
        let filtered = filter_by_budget(budgets(), Some(1000.0), None);
        assert_eq!(ids(&filtered), vec!["Job 1", "Job 2", "Job 4", "Job 5"]);
    }

    #[test]
    fn test_max_budget() {
        let filtered = filter_by_budget(budgets(), None, Some(2000.0));
        assert_eq!(ids(&filtered), vec!["Job 1", "Job 2", "Job 3", "Job 5"]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let filtered = filter_by_budget(budgets(), Some(2000.0), Some(2000.0));
        assert_eq!(ids(&filtered), vec!["Job 1", "Job 2", "Job 5"]);
    }

    #[test]
    fn test_no_bounds_is_identity() {
        let jobs = budgets();
        assert_eq!(filter_by_budget(jobs.clone(), None, None), jobs);
    }

    #[test]
    fn test_filter_reads_criteria() {
        let criteria = JobFilter::new().with_min_budget(100.0);
        let filtered = BudgetFilter.apply(vec![job(1).with_budget("$50")], &criteria);
        assert!(filtered.is_empty());
    }
}

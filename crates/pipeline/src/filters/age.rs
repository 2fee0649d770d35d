//! Filter by posting age.

use crate::traits::Filter;
use listings::{JobFilter, JobListing};

/// Keep listings posted at most `max_age_hours` ago.
///
/// Listings whose posted time cannot be read are kept.
pub fn filter_by_age(jobs: Vec<JobListing>, max_age_hours: Option<u32>) -> Vec<JobListing> {
    let Some(max_age) = max_age_hours else {
        return jobs;
    };
    let max_age = f64::from(max_age);

    let before = jobs.len();
    let retained: Vec<JobListing> = jobs
        .into_iter()
        .filter(|job| job.age_hours().known().is_none_or(|age| age <= max_age))
        .collect();

    tracing::debug!("Age filter: {} -> {} jobs", before, retained.len());
    retained
}

pub struct AgeFilter;

impl Filter for AgeFilter {
    fn name(&self) -> &str {
        "AgeFilter"
    }

    fn apply(&self, jobs: Vec<JobListing>, criteria: &JobFilter) -> Vec<JobListing> {
        filter_by_age(jobs, criteria.max_age_hours)
    }
}

//! Filter by client location.

use crate::filters::lowercase_terms;
use crate::traits::Filter;
use listings::{JobFilter, JobListing};

/// Keep listings whose client location passes the white- and blacklists.
///
/// ## Algorithm
/// For each listing, with its location lowercased ("" when unknown):
/// 1. Any blacklist entry contained in the location rejects it
/// 2. With a non-empty whitelist, an unknown location is kept; a known one
///    must contain at least one whitelist entry
/// 3. With an empty whitelist, everything left is kept
pub fn filter_by_location(
    jobs: Vec<JobListing>,
    whitelist: &[String],
    blacklist: &[String],
) -> Vec<JobListing> {
    let whitelist = lowercase_terms(whitelist);
    let blacklist = lowercase_terms(blacklist);

    if whitelist.is_empty() && blacklist.is_empty() {
        return jobs;
    }

    let before = jobs.len();
    let retained: Vec<JobListing> = jobs
        .into_iter()
        .filter(|job| {
            let location = job.client_location().unwrap_or_default().to_lowercase();

            if blacklist.iter().any(|entry| location.contains(entry.as_str())) {
                return false;
            }
            whitelist.is_empty()
                || location.is_empty()
                || whitelist.iter().any(|entry| location.contains(entry.as_str()))
        })
        .collect();

    tracing::debug!("Location filter: {} -> {} jobs", before, retained.len());
    retained
}

pub struct LocationFilter;

impl Filter for LocationFilter {
    fn name(&self) -> &str {
        "LocationFilter"
    }

    fn apply(&self, jobs: Vec<JobListing>, criteria: &JobFilter) -> Vec<JobListing> {
        filter_by_location(jobs, &criteria.location_whitelist, &criteria.location_blacklist)
    }
}

//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! independent predicates to be applied to a set of job listings.

use listings::{JobFilter, JobListing};

/// A single filtering stage.
///
/// ## Design Note
/// - `Send + Sync` allows filters to live in an engine shared behind `Arc`
/// - Filters take ownership of the Vec<JobListing> and return the retained
///   subset in the original order
/// - Filtering cannot fail: data that cannot be interpreted is kept
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of job listings.
    ///
    /// # Arguments
    /// * `jobs` - The listings to filter (takes ownership)
    /// * `criteria` - The configured filter parameters
    fn apply(&self, jobs: Vec<JobListing>, criteria: &JobFilter) -> Vec<JobListing>;
}

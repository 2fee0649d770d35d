//! The job filtering engine.
//!
//! Owns one `JobFilter` and the standard pipeline. Holds no mutable state,
//! so a single engine can be shared across tasks behind an `Arc`.

use crate::filter_pipeline::FilterPipeline;
use listings::{JobFilter, JobListing};
use tracing::info;

pub struct JobFilterEngine {
    criteria: JobFilter,
    pipeline: FilterPipeline,
}

impl JobFilterEngine {
    /// Create an engine applying the standard filter order.
    pub fn new(criteria: JobFilter) -> Self {
        Self::with_pipeline(criteria, FilterPipeline::standard())
    }

    /// Create an engine with a custom pipeline.
    pub fn with_pipeline(criteria: JobFilter, pipeline: FilterPipeline) -> Self {
        Self { criteria, pipeline }
    }

    pub fn criteria(&self) -> &JobFilter {
        &self.criteria
    }

    /// Apply every configured filter.
    ///
    /// Returns the input untouched, without running any filter, when the
    /// criteria have nothing to check.
    pub fn apply_all(&self, jobs: Vec<JobListing>) -> Vec<JobListing> {
        if !self.criteria.has_any_filter() {
            info!("No filters configured, keeping all {} jobs", jobs.len());
            return jobs;
        }

        let before = jobs.len();
        info!("Applying filters to {} jobs", before);

        let retained = self.pipeline.apply(jobs, &self.criteria);

        info!("Filtering complete: {} -> {} jobs", before, retained.len());
        retained
    }
}

impl Default for JobFilterEngine {
    fn default() -> Self {
        Self::new(JobFilter::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Filter;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts invocations and drops everything.
    struct CountingFilter(Arc<AtomicUsize>);

    impl Filter for CountingFilter {
        fn name(&self) -> &str {
            "CountingFilter"
        }

        fn apply(&self, _jobs: Vec<JobListing>, _criteria: &JobFilter) -> Vec<JobListing> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Vec::new()
        }
    }

    fn job() -> JobListing {
        JobListing::new("Job", "", "https://www.upwork.com/jobs/~1").unwrap()
    }

    #[test]
    fn test_no_filter_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let pipeline = FilterPipeline::new().add_filter(CountingFilter(calls.clone()));
        let engine = JobFilterEngine::with_pipeline(JobFilter::default(), pipeline);

        let jobs = vec![job()];
        assert_eq!(engine.apply_all(jobs.clone()), jobs);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_active_filter_runs_pipeline() {
        let calls = Arc::new(AtomicUsize::new(0));
        let pipeline = FilterPipeline::new().add_filter(CountingFilter(calls.clone()));
        let engine =
            JobFilterEngine::with_pipeline(JobFilter::new().with_max_age_hours(1), pipeline);

        assert!(engine.apply_all(vec![job()]).is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JobFilterEngine>();
    }
}

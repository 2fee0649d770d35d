//! Filter by include/exclude keywords in the title and description.

use crate::filters::lowercase_terms;
use crate::traits::Filter;
use listings::{JobFilter, JobListing};

/// Keep listings that mention no excluded keyword and, if an include list is
/// given, at least one included keyword.
///
/// Exclusion is checked first and always wins. A keyword matches when it is
/// a case-insensitive substring of the title and description, padding
/// included.
pub fn filter_by_keywords(
    jobs: Vec<JobListing>,
    include_keywords: &[String],
    exclude_keywords: &[String],
) -> Vec<JobListing> {
    let include = lowercase_terms(include_keywords);
    let exclude = lowercase_terms(exclude_keywords);

    if include.is_empty() && exclude.is_empty() {
        return jobs;
    }

    let before = jobs.len();
    let retained: Vec<JobListing> = jobs
        .into_iter()
        .filter(|job| {
            let text = format!("{} {}", job.title(), job.description()).to_lowercase();

            if exclude.iter().any(|kw| text.contains(kw.as_str())) {
                return false;
            }
            include.is_empty() || include.iter().any(|kw| text.contains(kw.as_str()))
        })
        .collect();

    tracing::debug!("Keyword filter: {} -> {} jobs", before, retained.len());
    retained
}

pub struct KeywordFilter;

impl Filter for KeywordFilter {
    fn name(&self) -> &str {
        "KeywordFilter"
    }

    fn apply(&self, jobs: Vec<JobListing>, criteria: &JobFilter) -> Vec<JobListing> {
        filter_by_keywords(jobs, &criteria.include_keywords, &criteria.exclude_keywords)
    }
}

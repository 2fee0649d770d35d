//! Filter by required skills.
//!
//! A required skill counts as matched when it is one of the listing's skill
//! tags, or when it appears anywhere in the description or title. All
//! comparisons are case-insensitive.

use crate::filters::normalize_terms;
use crate::traits::Filter;
use listings::{JobFilter, JobListing};

/// Number of distinct `required` skills found in the listing.
fn matched_skills(job: &JobListing, required: &[String]) -> usize {
    let tags: Vec<String> = job.skills().iter().map(|s| s.trim().to_lowercase()).collect();
    let description = job.description().to_lowercase();
    let title = job.title().to_lowercase();

    required
        .iter()
        .filter(|skill| {
            tags.contains(skill) || description.contains(skill.as_str()) || title.contains(skill.as_str())
        })
        .count()
}

/// Keep listings matching at least `min_match` of the required skills.
///
/// Duplicate and blank entries in `required_skills` are ignored, so a skill
/// is only ever counted once.
pub fn filter_by_skills(
    jobs: Vec<JobListing>,
    required_skills: &[String],
    min_match: usize,
) -> Vec<JobListing> {
    let mut required = normalize_terms(required_skills);
    required.sort();
    required.dedup();

    if required.is_empty() {
        return jobs;
    }

    let before = jobs.len();
    let retained: Vec<JobListing> = jobs
        .into_iter()
        .filter(|job| matched_skills(job, &required) >= min_match)
        .collect();

    tracing::debug!("Skills filter: {} -> {} jobs", before, retained.len());
    retained
}

pub struct SkillsFilter;

impl Filter for SkillsFilter {
    fn name(&self) -> &str {
        "SkillsFilter"
    }

    fn apply(&self, jobs: Vec<JobListing>, criteria: &JobFilter) -> Vec<JobListing> {
        filter_by_skills(jobs, &criteria.required_skills, criteria.min_skill_match)
    }
}

//! Filter implementations for the qualification pipeline.
//!
//! Each predicate is available twice: as a free function taking only the
//! parameters it needs, and as a unit struct implementing [`Filter`] that
//! reads those parameters from a `JobFilter`.
//!
//! [`Filter`]: crate::traits::Filter

pub mod age;
pub mod budget;
pub mod keywords;
pub mod location;
pub mod skills;

pub use age::{filter_by_age, AgeFilter};
pub use budget::{filter_by_budget, BudgetFilter};
pub use keywords::{filter_by_keywords, KeywordFilter};
pub use location::{filter_by_location, LocationFilter};
pub use skills::{filter_by_skills, SkillsFilter};

/// Lowercase terms for substring matching. Entries are otherwise used as given.
pub(crate) fn lowercase_terms(terms: &[String]) -> Vec<String> {
    terms.iter().map(|t| t.to_lowercase()).collect()
}

/// Lowercase and trim user-supplied terms, dropping blank entries.
pub(crate) fn normalize_terms(terms: &[String]) -> Vec<String> {
    terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

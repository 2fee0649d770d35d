//! Filter criteria for qualifying job listings.

use crate::error::{ListingError, Result};
use serde::{Deserialize, Serialize};

/// The bundle of every filter parameter a user can configure.
///
/// An empty list or a `None` bound means "no constraint" for that
/// dimension. `min_skill_match` only qualifies `required_skills`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobFilter {
    pub min_budget: Option<f64>,
    pub max_budget: Option<f64>,
    pub required_skills: Vec<String>,
    pub min_skill_match: usize,
    pub include_keywords: Vec<String>,
    pub exclude_keywords: Vec<String>,
    pub location_whitelist: Vec<String>,
    pub location_blacklist: Vec<String>,
    pub max_age_hours: Option<u32>,
}

impl Default for JobFilter {
    fn default() -> Self {
        Self {
            min_budget: None,
            max_budget: None,
            required_skills: Vec::new(),
            min_skill_match: 1,
            include_keywords: Vec::new(),
            exclude_keywords: Vec::new(),
            location_whitelist: Vec::new(),
            location_blacklist: Vec::new(),
            max_age_hours: None,
        }
    }
}

fn to_strings<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

impl JobFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_budget(mut self, min: f64) -> Self {
        self.min_budget = Some(min);
        self
    }

    pub fn with_max_budget(mut self, max: f64) -> Self {
        self.max_budget = Some(max);
        self
    }

    /// Require at least `min_match` of the given skills.
    pub fn with_required_skills<I, S>(mut self, skills: I, min_match: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_skills = to_strings(skills);
        self.min_skill_match = min_match;
        self
    }

    pub fn with_include_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_keywords = to_strings(keywords);
        self
    }

    pub fn with_exclude_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_keywords = to_strings(keywords);
        self
    }

    pub fn with_location_whitelist<I, S>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.location_whitelist = to_strings(locations);
        self
    }

    pub fn with_location_blacklist<I, S>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.location_blacklist = to_strings(locations);
        self
    }

    pub fn with_max_age_hours(mut self, hours: u32) -> Self {
        self.max_age_hours = Some(hours);
        self
    }

    /// True if at least one predicate has something to check.
    ///
    /// `min_skill_match` always carries a value, so it is not considered.
    pub fn has_any_filter(&self) -> bool {
        self.min_budget.is_some()
            || self.max_budget.is_some()
            || !self.required_skills.is_empty()
            || !self.include_keywords.is_empty()
            || !self.exclude_keywords.is_empty()
            || !self.location_whitelist.is_empty()
            || !self.location_blacklist.is_empty()
            || self.max_age_hours.is_some()
    }

    /// Check that the budget bounds make sense.
    ///
    /// Callers that build criteria from user input should run this; the
    /// filtering engine itself accepts any criteria.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("min_budget", self.min_budget), ("max_budget", self.max_budget)] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(ListingError::InvalidValue {
                        field: field.to_string(),
                        value: v.to_string(),
                    });
                }
            }
        }

        if let (Some(min), Some(max)) = (self.min_budget, self.max_budget) {
            if min > max {
                return Err(ListingError::InvalidValue {
                    field: "min_budget".to_string(),
                    value: format!("{} exceeds max_budget {}", min, max),
                });
            }
        }

        Ok(())
    }
}

//! Core domain types for scraped job postings.
//!
//! A `JobListing` is the normalized form of one marketplace job card. The
//! crawler produces `RawJobListing`s (everything optional, exactly as
//! extracted) and converts them with [`JobListing::from_raw`], which is where
//! URL validation and budget derivation happen.

use crate::error::{ListingError, Result};
use crate::parser;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

// =============================================================================
// Extracted values
// =============================================================================

/// A value derived from free-form text.
///
/// Keeps "the text was there but held no number" apart from "there was no
/// text at all", and both apart from a real value, so that an unknown value
/// is never compared as if it were zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extracted<T> {
    /// The text contained a usable value
    Known(T),
    /// The text was present but nothing could be parsed from it
    Unparseable,
    /// There was no text to parse
    Missing,
}

impl<T: Copy> Extracted<T> {
    /// The parsed value, if there is one.
    pub fn known(&self) -> Option<T> {
        match self {
            Extracted::Known(value) => Some(*value),
            Extracted::Unparseable | Extracted::Missing => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Extracted::Known(_))
    }

    fn from_text(text: Option<&str>, parse: impl Fn(&str) -> Option<T>) -> Self {
        match text.map(str::trim).filter(|t| !t.is_empty()) {
            None => Extracted::Missing,
            Some(text) => parse(text).map_or(Extracted::Unparseable, Extracted::Known),
        }
    }
}

/// Derive the numeric budget: fixed price first, hourly rate second.
fn derive_budget_value(budget: Option<&str>, hourly_rate: Option<&str>) -> Extracted<f64> {
    let fixed = Extracted::from_text(budget, parser::parse_budget_amount);
    if fixed.is_known() {
        return fixed;
    }

    match (fixed, Extracted::from_text(hourly_rate, parser::parse_hourly_amount)) {
        (_, Extracted::Known(value)) => Extracted::Known(value),
        (Extracted::Unparseable, _) | (_, Extracted::Unparseable) => Extracted::Unparseable,
        _ => Extracted::Missing,
    }
}

fn parse_job_url(raw: &str, base: Option<&Url>) -> Result<Url> {
    let invalid = |reason: String| ListingError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };

    let url = match base {
        Some(base) => base.join(raw),
        None => Url::parse(raw),
    }
    .map_err(|e| invalid(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

// =============================================================================
// Raw extraction output
// =============================================================================

/// One job card exactly as the extractor found it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawJobListing {
    pub title: Option<String>,
    pub description: Option<String>,
    pub budget: Option<String>,
    pub hourly_rate: Option<String>,
    pub client_location: Option<String>,
    pub posted_time: Option<String>,
    pub job_url: Option<String>,
    /// Skill tags; extractors emit either a list or a comma-separated string
    #[serde(default, deserialize_with = "skills_list_or_csv")]
    pub skills: Vec<String>,
}

fn skills_list_or_csv<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SkillsField {
        List(Vec<String>),
        Csv(String),
    }

    Ok(match Option::<SkillsField>::deserialize(deserializer)? {
        Some(SkillsField::List(skills)) => skills
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Some(SkillsField::Csv(skills)) => parser::split_comma_list(&skills),
        None => Vec::new(),
    })
}

// =============================================================================
// JobListing
// =============================================================================

/// A normalized job posting.
///
/// Only the cover letter can change after construction. The numeric budget
/// is recomputed whenever a price field is set through a builder method, so
/// it always agrees with the budget and hourly-rate text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredListing")]
pub struct JobListing {
    title: String,
    description: String,
    budget: Option<String>,
    hourly_rate: Option<String>,
    client_location: Option<String>,
    posted_time: String,
    job_url: Url,
    skills: Vec<String>,
    cover_letter: Option<String>,
    scraped_at: DateTime<Utc>,
    #[serde(skip)]
    budget_value: Extracted<f64>,
}

impl JobListing {
    /// Create a listing with no price, location or skill data.
    ///
    /// Fails if `job_url` is not an absolute http(s) URL.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        job_url: &str,
    ) -> Result<Self> {
        Ok(Self {
            title: title.into(),
            description: description.into(),
            budget: None,
            hourly_rate: None,
            client_location: None,
            posted_time: "Unknown".to_string(),
            job_url: parse_job_url(job_url, None)?,
            skills: Vec::new(),
            cover_letter: None,
            scraped_at: Utc::now(),
            budget_value: Extracted::Missing,
        })
    }

    /// Build a listing from extractor output.
    ///
    /// Relative URLs are resolved against `base_url`. A record without a URL
    /// is rejected; every other field falls back to a placeholder.
    pub fn from_raw(raw: RawJobListing, base_url: &Url) -> Result<Self> {
        let href = non_blank(raw.job_url).ok_or(ListingError::MissingUrl)?;
        let job_url = parse_job_url(&href, Some(base_url))?;

        let budget = non_blank(raw.budget);
        let hourly_rate = non_blank(raw.hourly_rate);
        let budget_value = derive_budget_value(budget.as_deref(), hourly_rate.as_deref());

        Ok(Self {
            title: non_blank(raw.title).unwrap_or_else(|| "Untitled".to_string()),
            description: non_blank(raw.description).unwrap_or_default(),
            budget,
            hourly_rate,
            client_location: non_blank(raw.client_location),
            posted_time: non_blank(raw.posted_time).unwrap_or_else(|| "Unknown".to_string()),
            job_url,
            skills: raw.skills,
            cover_letter: None,
            scraped_at: Utc::now(),
            budget_value,
        })
    }

    pub fn with_budget(mut self, budget: impl Into<String>) -> Self {
        self.budget = non_blank(Some(budget.into()));
        self.refresh_budget_value();
        self
    }

    pub fn with_hourly_rate(mut self, hourly_rate: impl Into<String>) -> Self {
        self.hourly_rate = non_blank(Some(hourly_rate.into()));
        self.refresh_budget_value();
        self
    }

    pub fn with_client_location(mut self, location: impl Into<String>) -> Self {
        self.client_location = non_blank(Some(location.into()));
        self
    }

    pub fn with_posted_time(mut self, posted_time: impl Into<String>) -> Self {
        self.posted_time = posted_time.into();
        self
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_scraped_at(mut self, scraped_at: DateTime<Utc>) -> Self {
        self.scraped_at = scraped_at;
        self
    }

    fn refresh_budget_value(&mut self) {
        self.budget_value = derive_budget_value(self.budget.as_deref(), self.hourly_rate.as_deref());
    }

    // Getters

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Fixed-price budget text, e.g. `"$1,500"`
    pub fn budget(&self) -> Option<&str> {
        self.budget.as_deref()
    }

    /// Hourly-rate text, e.g. `"$35-$60/hr"`
    pub fn hourly_rate(&self) -> Option<&str> {
        self.hourly_rate.as_deref()
    }

    pub fn client_location(&self) -> Option<&str> {
        self.client_location.as_deref()
    }

    pub fn posted_time(&self) -> &str {
        &self.posted_time
    }

    pub fn job_url(&self) -> &Url {
        &self.job_url
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn cover_letter(&self) -> Option<&str> {
        self.cover_letter.as_deref()
    }

    pub fn scraped_at(&self) -> DateTime<Utc> {
        self.scraped_at
    }

    /// Numeric budget used for range comparisons.
    pub fn budget_value(&self) -> Extracted<f64> {
        self.budget_value
    }

    /// Age of the posting in hours, parsed from the posted-time text.
    pub fn age_hours(&self) -> Extracted<f64> {
        Extracted::from_text(Some(&self.posted_time), parser::parse_age_hours)
    }

    /// The price text to show to a person.
    pub fn budget_display(&self) -> &str {
        self.budget
            .as_deref()
            .or(self.hourly_rate.as_deref())
            .unwrap_or("Not specified")
    }

    /// Attach generated outreach text.
    pub fn set_cover_letter(&mut self, cover_letter: impl Into<String>) {
        self.cover_letter = Some(cover_letter.into());
    }
}

/// Serialized shape of a `JobListing`, validated on the way back in.
#[derive(Deserialize)]
struct StoredListing {
    title: String,
    #[serde(default)]
    description: String,
    budget: Option<String>,
    hourly_rate: Option<String>,
    client_location: Option<String>,
    #[serde(default)]
    posted_time: String,
    job_url: String,
    #[serde(default)]
    skills: Vec<String>,
    cover_letter: Option<String>,
    scraped_at: Option<DateTime<Utc>>,
}

impl TryFrom<StoredListing> for JobListing {
    type Error = ListingError;

    fn try_from(stored: StoredListing) -> Result<Self> {
        let job_url = parse_job_url(&stored.job_url, None)?;
        let budget = non_blank(stored.budget);
        let hourly_rate = non_blank(stored.hourly_rate);
        let budget_value = derive_budget_value(budget.as_deref(), hourly_rate.as_deref());

        Ok(Self {
            title: stored.title,
            description: stored.description,
            budget,
            hourly_rate,
            client_location: non_blank(stored.client_location),
            posted_time: stored.posted_time,
            job_url,
            skills: stored.skills,
            cover_letter: stored.cover_letter,
            scraped_at: stored.scraped_at.unwrap_or_else(Utc::now),
            budget_value,
        })
    }
}

//! Extraction of raw job records from search result pages.
//!
//! Two input shapes are supported: rendered HTML, read with a
//! [`JobTileSchema`] of CSS selectors, and JSON, as returned by the
//! marketplace's search API or a structured extractor.

use crate::error::{Result, SourceError};
use listings::RawJobListing;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use tracing::{debug, error, warn};

/// CSS selectors describing one job card and its fields.
///
/// Each field selector is evaluated inside the card matched by `card`.
/// Comma-separated alternatives are allowed; the first element that matches
/// any of them is used.
#[derive(Debug, Clone, PartialEq)]
pub struct JobTileSchema {
    pub card: String,
    pub title: String,
    pub description: String,
    pub budget: String,
    pub hourly_rate: String,
    pub client_location: String,
    pub posted_time: String,
    /// Element carrying the job link
    pub url: String,
    /// Attribute of `url` holding the link
    pub url_attribute: String,
    /// Every match becomes one skill tag
    pub skills: String,
}

impl JobTileSchema {
    /// Selectors for the Upwork search results layout.
    pub fn upwork() -> Self {
        Self {
            card: "article[data-test='job-tile'], section.job-tile, div[data-test='JobTile']".into(),
            title: "h2 a, h3 a, [data-test='job-title-link'], .job-title-link".into(),
            description: "[data-test='job-description-text'], .job-description, p.mb-0".into(),
            budget: "[data-test='budget'], .job-budget, [data-test='is-fixed-price'] + span".into(),
            hourly_rate: "[data-test='hourly-rate'], [data-test='is-hourly'] + span".into(),
            client_location: "[data-test='client-location'], .client-location, [data-test='location']".into(),
            posted_time: "[data-test='posted-on'], .job-posted-on, time, [data-test='job-pubished-date']".into(),
            url: "h2 a, h3 a, [data-test='job-title-link'], a.job-title-link".into(),
            url_attribute: "href".into(),
            skills: "[data-test='token'], .skill-tag, .air3-token, span.skill".into(),
        }
    }

    /// Parse every selector once.
    pub fn compile(&self) -> Result<CompiledSchema> {
        Ok(CompiledSchema {
            card: parse_selector(&self.card)?,
            title: parse_selector(&self.title)?,
            description: parse_selector(&self.description)?,
            budget: parse_selector(&self.budget)?,
            hourly_rate: parse_selector(&self.hourly_rate)?,
            client_location: parse_selector(&self.client_location)?,
            posted_time: parse_selector(&self.posted_time)?,
            url: parse_selector(&self.url)?,
            url_attribute: self.url_attribute.clone(),
            skills: parse_selector(&self.skills)?,
        })
    }
}

impl Default for JobTileSchema {
    fn default() -> Self {
        Self::upwork()
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| SourceError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// A `JobTileSchema` with its selectors parsed.
#[derive(Debug, Clone)]
pub struct CompiledSchema {
    card: Selector,
    title: Selector,
    description: Selector,
    budget: Selector,
    hourly_rate: Selector,
    client_location: Selector,
    posted_time: Selector,
    url: Selector,
    url_attribute: String,
    skills: Selector,
}

/// Collapse runs of whitespace, including newlines, into single spaces.
fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn element_text(element: ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<Vec<_>>().join(" "))
}

fn first_text(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
    card.select(selector)
        .map(element_text)
        .find(|text| !text.is_empty())
}

impl CompiledSchema {
    fn extract_card(&self, card: ElementRef<'_>) -> RawJobListing {
        RawJobListing {
            title: first_text(card, &self.title),
            description: first_text(card, &self.description),
            budget: first_text(card, &self.budget),
            hourly_rate: first_text(card, &self.hourly_rate),
            client_location: first_text(card, &self.client_location),
            posted_time: first_text(card, &self.posted_time),
            job_url: card
                .select(&self.url)
                .find_map(|el| el.value().attr(&self.url_attribute))
                .map(str::to_string),
            skills: card
                .select(&self.skills)
                .map(element_text)
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Extract one raw record per job card found in `html`.
    pub fn extract(&self, html: &str) -> Vec<RawJobListing> {
        let document = Html::parse_document(html);
        let jobs: Vec<RawJobListing> = document
            .select(&self.card)
            .map(|card| self.extract_card(card))
            .collect();

        debug!("Extracted {} job cards from HTML", jobs.len());
        jobs
    }
}

/// Extract raw job records from an HTML page.
///
/// Fails only if the schema contains an invalid selector.
pub fn extract_job_tiles(html: &str, schema: &JobTileSchema) -> Result<Vec<RawJobListing>> {
    Ok(schema.compile()?.extract(html))
}

/// Parse structured extractor output into raw job records.
///
/// Accepts a list of records, an object holding the list under `jobs` or
/// `items`, or a single record object. Malformed input yields an empty list
/// and is logged; individual records that do not fit are skipped.
pub fn parse_extracted_json(content: &str) -> Vec<RawJobListing> {
    if content.trim().is_empty() {
        warn!("No content extracted from page");
        return Vec::new();
    }

    let data: Value = match serde_json::from_str(content) {
        Ok(data) => data,
        Err(e) => {
            error!("Failed to parse extracted JSON: {}", e);
            return Vec::new();
        }
    };

    let records = match data {
        Value::Array(records) => records,
        Value::Object(mut object) => match object.remove("jobs").or_else(|| object.remove("items")) {
            Some(Value::Array(records)) => records,
            Some(other) => {
                warn!("Expected a list of jobs, found {}", json_kind(&other));
                Vec::new()
            }
            None => vec![Value::Object(object)],
        },
        other => {
            warn!("Unexpected extracted data format: {}", json_kind(&other));
            return Vec::new();
        }
    };

    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<RawJobListing>(record) {
            Ok(raw) => Some(raw),
            Err(e) => {
                warn!("Failed to parse job record: {}", e);
                None
            }
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

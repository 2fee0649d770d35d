//! The freelancer profile used to personalize cover letters.
//!
//! Profiles are normally YAML. A plain-text file is also accepted: its whole
//! content becomes the bio and `key: value` lines override individual fields.

use crate::error::{ListingError, Result};
use crate::parser::split_comma_list;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Keys that a plain-text profile may set directly.
const TEXT_KEYS: [&str; 5] = ["name", "title", "bio", "rate", "location"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub years_experience: u32,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    pub portfolio_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub website_url: Option<String>,
    /// Hourly rate range, e.g. "$50-$80/hr"
    pub rate: Option<String>,
    /// Weekly availability, e.g. "30 hrs/week"
    pub availability: Option<String>,
    pub location: Option<String>,
    pub timezone: Option<String>,
    /// Writing tone passed to the prompt
    #[serde(default = "default_tone")]
    pub tone: String,
    pub notes: Option<String>,
}

fn default_tone() -> String {
    "professional".to_string()
}

impl UserProfile {
    /// Minimal profile with the given identity and defaults everywhere else.
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            years_experience: 0,
            skills: Vec::new(),
            bio: String::new(),
            achievements: Vec::new(),
            portfolio_url: None,
            linkedin_url: None,
            website_url: None,
            rate: None,
            availability: None,
            location: None,
            timezone: None,
            tone: default_tone(),
            notes: None,
        }
    }

    /// Load a profile, choosing the format from the file extension.
    ///
    /// Files that are neither `.yaml`/`.yml` nor `.txt` are tried as YAML
    /// first and read as text if that fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml(path),
            Some("txt") => Self::from_txt(path),
            _ => Self::from_yaml(path).or_else(|e| {
                debug!("Profile {} is not YAML ({}), reading as text", path.display(), e);
                Self::from_txt(path)
            }),
        }
    }

    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = read_profile(path.as_ref())?;
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn from_txt<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = read_profile(path.as_ref())?;
        Ok(Self::parse_text(&content))
    }

    fn parse_text(content: &str) -> Self {
        let mut profile = Self::new("User", "Developer");
        profile.bio = content.to_string();

        for line in content.trim().lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase().replace(' ', "_");
            let value = value.trim().to_string();

            match key.as_str() {
                "skills" => profile.skills = split_comma_list(&value),
                k if TEXT_KEYS.contains(&k) => match k {
                    "name" => profile.name = value,
                    "title" => profile.title = value,
                    "bio" => profile.bio = value,
                    "rate" => profile.rate = Some(value),
                    _ => profile.location = Some(value),
                },
                _ => {}
            }
        }

        profile
    }

    pub fn skills_str(&self) -> String {
        self.skills.join(", ")
    }

    pub fn achievements_str(&self) -> String {
        self.achievements
            .iter()
            .map(|a| format!("• {}", a))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render the profile as a context block for the language model.
    pub fn to_prompt_context(&self) -> String {
        let mut parts = vec![
            format!("Name: {}", self.name),
            format!("Title: {}", self.title),
            format!("Experience: {} years", self.years_experience),
            format!("Skills: {}", self.skills_str()),
            format!("\nProfessional Bio:\n{}", self.bio),
        ];

        if !self.achievements.is_empty() {
            parts.push(format!("\nKey Achievements:\n{}", self.achievements_str()));
        }
        if let Some(rate) = &self.rate {
            parts.push(format!("\nRate: {}", rate));
        }
        if let Some(availability) = &self.availability {
            parts.push(format!("Availability: {}", availability));
        }
        if let Some(portfolio) = &self.portfolio_url {
            parts.push(format!("Portfolio: {}", portfolio));
        }
        if let Some(notes) = &self.notes {
            parts.push(format!("\nAdditional Notes:\n{}", notes));
        }

        parts.join("\n")
    }
}

fn read_profile(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ListingError::ProfileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(fs::read_to_string(path)?)
}

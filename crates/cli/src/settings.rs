//! Layered settings: defaults, then an optional TOML file, then
//! `GIG_SCOUT_*` environment variables.
//!
//! Nested keys use `__` in the environment (`GIG_SCOUT_FILTERS__MIN_BUDGET`)
//! and the filter lists accept comma-separated values
//! (`GIG_SCOUT_FILTERS__REQUIRED_SKILLS=python,django`).

use anyhow::{Context, Result, bail};
use config::{Config, Environment, File, FileFormat};
use listings::JobFilter;
use outreach::AiProvider;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Settings file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "gig-scout.toml";

const ENV_PREFIX: &str = "GIG_SCOUT";

const LIST_KEYS: [&str; 5] = [
    "filters.required_skills",
    "filters.include_keywords",
    "filters.exclude_keywords",
    "filters.location_whitelist",
    "filters.location_blacklist",
];

const MAX_PAGES_LIMIT: u32 = 50;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub search_query: String,
    pub max_pages: u32,
    pub output_path: PathBuf,
    pub search_url: String,

    pub ai_provider: String,
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    /// Provider default when unset
    pub llm_model: Option<String>,
    pub profile_path: PathBuf,

    pub log_level: String,
    /// Seconds between cover letter requests
    pub cover_letter_delay: f64,

    pub filters: JobFilter,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search_query: "Python Developer".to_string(),
            max_pages: 5,
            output_path: PathBuf::from("./output"),
            search_url: sources::DEFAULT_SEARCH_URL.to_string(),
            ai_provider: "gemini".to_string(),
            gemini_api_key: None,
            openai_api_key: None,
            llm_model: None,
            profile_path: PathBuf::from("./profile.yaml"),
            log_level: "info".to_string(),
            cover_letter_delay: 1.0,
            filters: JobFilter::default(),
        }
    }
}

/// The `GIG_SCOUT_*` environment source.
pub fn environment() -> Environment {
    LIST_KEYS
        .iter()
        .fold(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .try_parsing(true),
            |env, key| env.with_list_parse_key(key),
        )
}

impl Settings {
    /// Load settings from `config_file` (or `gig-scout.toml` if present)
    /// and the process environment.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        Self::from_sources(config_file, environment())
    }

    /// Load settings from an explicit environment source.
    ///
    /// An explicit `config_file` must exist; the default one is optional.
    pub fn from_sources(config_file: Option<&Path>, env: Environment) -> Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path).format(FileFormat::Toml).required(true),
            None => File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
        };

        let mut settings: Settings = Config::builder()
            .add_source(file)
            .add_source(env)
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Invalid settings")?;

        settings.tidy_filter_lists();
        settings.validate()?;
        Ok(settings)
    }

    /// Trim the configured filter lists and drop blank entries, so a
    /// trailing comma never turns into a match-everything keyword.
    fn tidy_filter_lists(&mut self) {
        let filters = &mut self.filters;
        for list in [
            &mut filters.required_skills,
            &mut filters.include_keywords,
            &mut filters.exclude_keywords,
            &mut filters.location_whitelist,
            &mut filters.location_blacklist,
        ] {
            *list = list
                .iter()
                .map(|entry| entry.trim())
                .filter(|entry| !entry.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_max_pages(self.max_pages)?;
        if !self.cover_letter_delay.is_finite() || self.cover_letter_delay < 0.0 {
            bail!("cover_letter_delay must be a non-negative number of seconds");
        }
        self.provider()?;
        self.search_url()?;
        self.filters.validate().context("Invalid filter settings")?;
        Ok(())
    }

    pub fn provider(&self) -> Result<AiProvider> {
        self.ai_provider
            .parse()
            .with_context(|| format!("Invalid ai_provider '{}'", self.ai_provider))
    }

    pub fn search_url(&self) -> Result<Url> {
        Url::parse(&self.search_url)
            .with_context(|| format!("Invalid search_url '{}'", self.search_url))
    }

    /// The key configured for `provider`, if any.
    pub fn api_key(&self, provider: AiProvider) -> Option<&str> {
        match provider {
            AiProvider::OpenAi => self.openai_api_key.as_deref(),
            AiProvider::Gemini => self.gemini_api_key.as_deref(),
            AiProvider::Ollama => None,
        }
    }

    /// Whether the selected provider can be called.
    ///
    /// Blank keys and template placeholders (`your-...`) do not count.
    /// A local Ollama server needs no key.
    pub fn has_ai_key(&self) -> bool {
        match self.provider() {
            Ok(provider) if !provider.requires_key() => true,
            Ok(provider) => self
                .api_key(provider)
                .map(str::trim)
                .is_some_and(|key| !key.is_empty() && !key.starts_with("your-")),
            Err(_) => false,
        }
    }

    pub fn model(&self) -> Option<String> {
        self.llm_model
            .as_deref()
            .map(str::trim)
            .filter(|model| !model.is_empty())
            .map(str::to_string)
    }

    pub fn letter_delay(&self) -> Duration {
        Duration::from_secs_f64(self.cover_letter_delay)
    }
}

/// Page counts outside `1..=50` are rejected.
pub fn check_max_pages(pages: u32) -> Result<u32> {
    if !(1..=MAX_PAGES_LIMIT).contains(&pages) {
        bail!("max pages must be between 1 and {}, got {}", MAX_PAGES_LIMIT, pages);
    }
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn env_from(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(map))
    }

    fn no_file(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("empty.toml");
        fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::from_sources(Some(&no_file(&dir)), env_from(&[])).unwrap();

        assert_eq!(settings.search_query, "Python Developer");
        assert_eq!(settings.max_pages, 5);
        assert_eq!(settings.output_path, PathBuf::from("./output"));
        assert_eq!(settings.provider().unwrap(), AiProvider::Gemini);
        assert_eq!(settings.letter_delay(), Duration::from_secs(1));
        assert_eq!(settings.filters, JobFilter::default());
        assert!(!settings.has_ai_key());
    }

    #[test]
    fn test_environment_overrides() {
        let dir = TempDir::new().unwrap();
        let env = env_from(&[
            ("GIG_SCOUT_SEARCH_QUERY", "Rust Developer"),
            ("GIG_SCOUT_MAX_PAGES", "3"),
            ("GIG_SCOUT_AI_PROVIDER", "openai"),
            ("GIG_SCOUT_OPENAI_API_KEY", "sk-test"),
            ("GIG_SCOUT_FILTERS__MIN_BUDGET", "500"),
            ("GIG_SCOUT_FILTERS__REQUIRED_SKILLS", "python,django"),
            ("GIG_SCOUT_FILTERS__MAX_AGE_HOURS", "48"),
        ]);
        let settings = Settings::from_sources(Some(&no_file(&dir)), env).unwrap();

        assert_eq!(settings.search_query, "Rust Developer");
        assert_eq!(settings.max_pages, 3);
        assert!(settings.has_ai_key());
        assert_eq!(settings.filters.min_budget, Some(500.0));
        assert_eq!(settings.filters.required_skills, vec!["python", "django"]);
        assert_eq!(settings.filters.max_age_hours, Some(48));
    }

    #[test]
    fn test_toml_file_under_environment() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gig-scout.toml");
        fs::write(
            &path,
            r#"
search_query = "Data Engineer"
output_path = "./leads"
llm_model = "gpt-4o"

[filters]
exclude_keywords = ["unpaid", "equity only"]
location_blacklist = ["Mars"]
"#,
        )
        .unwrap();

        let env = env_from(&[("GIG_SCOUT_SEARCH_QUERY", "ML Engineer")]);
        let settings = Settings::from_sources(Some(&path), env).unwrap();

        assert_eq!(settings.search_query, "ML Engineer");
        assert_eq!(settings.output_path, PathBuf::from("./leads"));
        assert_eq!(settings.model().as_deref(), Some("gpt-4o"));
        assert_eq!(settings.filters.exclude_keywords, vec!["unpaid", "equity only"]);
        assert_eq!(settings.filters.location_blacklist, vec!["Mars"]);
    }

    #[test]
    fn test_filter_lists_are_tidied() {
        let dir = TempDir::new().unwrap();
        let env = env_from(&[
            ("GIG_SCOUT_FILTERS__EXCLUDE_KEYWORDS", "junior, unpaid ,,"),
            ("GIG_SCOUT_FILTERS__LOCATION_BLACKLIST", " India ,"),
        ]);
        let settings = Settings::from_sources(Some(&no_file(&dir)), env).unwrap();

        assert_eq!(settings.filters.exclude_keywords, vec!["junior", "unpaid"]);
        assert_eq!(settings.filters.location_blacklist, vec!["India"]);
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(Settings::from_sources(Some(&missing), env_from(&[])).is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = TempDir::new().unwrap();
        let file = no_file(&dir);

        for vars in [
            [("GIG_SCOUT_MAX_PAGES", "0")],
            [("GIG_SCOUT_MAX_PAGES", "51")],
            [("GIG_SCOUT_AI_PROVIDER", "claude-ish")],
            [("GIG_SCOUT_COVER_LETTER_DELAY", "-1")],
            [("GIG_SCOUT_FILTERS__MIN_BUDGET", "-5")],
        ] {
            assert!(
                Settings::from_sources(Some(&file), env_from(&vars)).is_err(),
                "expected {:?} to be rejected",
                vars
            );
        }
    }

    #[test]
    fn test_has_ai_key() {
        let mut settings = Settings::default();
        assert!(!settings.has_ai_key());

        settings.gemini_api_key = Some("your-gemini-key-here".to_string());
        assert!(!settings.has_ai_key());

        settings.gemini_api_key = Some("  ".to_string());
        assert!(!settings.has_ai_key());

        settings.gemini_api_key = Some("AIza-real".to_string());
        assert!(settings.has_ai_key());

        settings.ai_provider = "openai".to_string();
        assert!(!settings.has_ai_key());

        settings.ai_provider = "ollama".to_string();
        assert!(settings.has_ai_key());
    }

    #[test]
    fn test_blank_model_uses_provider_default() {
        let settings = Settings {
            llm_model: Some(" ".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.model(), None);
    }

    #[test]
    fn test_check_max_pages() {
        assert_eq!(check_max_pages(1).unwrap(), 1);
        assert_eq!(check_max_pages(50).unwrap(), 50);
        assert!(check_max_pages(0).is_err());
    }
}

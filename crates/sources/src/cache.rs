//! On-disk cache of scraped listings.
//!
//! Lets a scrape be saved once and re-filtered later without touching the
//! network.

use crate::JobSource;
use crate::error::Result;
use async_trait::async_trait;
use listings::JobListing;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct JobCache {
    path: PathBuf,
}

impl JobCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write listings as pretty-printed JSON, creating parent directories.
    pub fn save(&self, jobs: &[JobListing]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(jobs)?)?;

        info!("Cached {} jobs to {}", jobs.len(), self.path.display());
        Ok(())
    }

    /// Read listings back. Every record is re-validated on the way in.
    pub fn load(&self) -> Result<Vec<JobListing>> {
        let content = fs::read_to_string(&self.path)?;
        let jobs: Vec<JobListing> = serde_json::from_str(&content)?;

        info!("Loaded {} cached jobs from {}", jobs.len(), self.path.display());
        Ok(jobs)
    }
}

/// Replays the cached scrape. The query and page limit are ignored.
#[async_trait]
impl JobSource for JobCache {
    fn name(&self) -> &str {
        "JobCache"
    }

    async fn fetch_jobs(&self, _query: &str, _max_pages: u32) -> Result<Vec<JobListing>> {
        self.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use listings::Extracted;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let cache = JobCache::new(dir.path().join("nested").join("jobs.json"));
        assert!(!cache.path().exists());

        let jobs = vec![
            JobListing::new("Cached", "desc", "https://www.upwork.com/jobs/~1")
                .unwrap()
                .with_hourly_rate("$50/hr")
                .with_skills(["Rust"]),
        ];
        cache.save(&jobs).unwrap();
        assert!(cache.path().is_file());

        let loaded = cache.load().unwrap();
        assert_eq!(loaded, jobs);
        assert_eq!(loaded[0].budget_value(), Extracted::Known(50.0));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let cache = JobCache::new(dir.path().join("absent.json"));
        assert!(matches!(cache.load(), Err(SourceError::Io(_))));
    }

    #[tokio::test]
    async fn test_cache_as_job_source() {
        let dir = TempDir::new().unwrap();
        let cache = JobCache::new(dir.path().join("jobs.json"));
        cache
            .save(&[JobListing::new("Replayed", "desc", "https://www.upwork.com/jobs/~9").unwrap()])
            .unwrap();

        let jobs = cache.fetch_jobs("ignored", 1).await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title(), "Replayed");
    }
}

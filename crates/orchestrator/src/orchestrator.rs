//! # Lead Orchestrator
//!
//! This module coordinates one run of the pipeline:
//! 1. Scrape listings from the job source
//! 2. Cache the raw scrape (optional)
//! 3. Apply the filtering engine on a blocking thread
//! 4. Generate cover letters for the qualified jobs (optional)
//! 5. Export the workbook and the cover letter text files

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{info, warn};

use export::WorkbookExporter;
use listings::JobListing;
use outreach::CoverLetterGenerator;
use pipeline::JobFilterEngine;
use sources::{JobCache, JobSource};

/// Per-run parameters
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub query: String,
    pub max_pages: u32,
    pub skip_cover_letters: bool,
    /// Pause between cover letter requests
    pub letter_delay: Duration,
    /// Workbook directory name; timestamped when `None`
    pub workbook_name: Option<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            query: "Python Developer".to_string(),
            max_pages: 5,
            skip_cover_letters: false,
            letter_delay: Duration::from_secs(1),
            workbook_name: None,
        }
    }
}

/// What a run produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub total_jobs: usize,
    pub filtered_jobs: usize,
    pub with_cover_letters: usize,
    /// Workbook directory; `None` when nothing was exported
    pub output_path: Option<PathBuf>,
    pub cover_letter_files: Vec<PathBuf>,
    pub elapsed: Duration,
}

/// Main orchestrator that coordinates the pipeline
#[derive(Clone)]
pub struct LeadOrchestrator {
    source: Arc<dyn JobSource>,
    engine: Arc<JobFilterEngine>,
    generator: Option<Arc<CoverLetterGenerator>>,
    exporter: Arc<WorkbookExporter>,
    cache: Option<Arc<JobCache>>,
}

impl LeadOrchestrator {
    pub fn new(
        source: Arc<dyn JobSource>,
        engine: JobFilterEngine,
        exporter: WorkbookExporter,
    ) -> Self {
        Self {
            source,
            engine: Arc::new(engine),
            generator: None,
            exporter: Arc::new(exporter),
            cache: None,
        }
    }

    /// Enable cover letter generation.
    pub fn with_generator(mut self, generator: CoverLetterGenerator) -> Self {
        self.generator = Some(Arc::new(generator));
        self
    }

    /// Save every scrape to `cache` before filtering.
    pub fn with_cache(mut self, cache: JobCache) -> Self {
        self.cache = Some(Arc::new(cache));
        self
    }

    /// Scrape, then process. Nothing is exported when the scrape is empty.
    pub async fn run(&self, options: &RunOptions) -> Result<RunSummary> {
        let start_time = Instant::now();

        info!(
            "Scraping '{}' (up to {} pages) with {}",
            options.query,
            options.max_pages,
            self.source.name()
        );
        let all_jobs = self
            .source
            .fetch_jobs(&options.query, options.max_pages)
            .await
            .context("Scraping failed")?;

        if all_jobs.is_empty() {
            warn!("No jobs found, nothing to export");
            return Ok(RunSummary {
                elapsed: start_time.elapsed(),
                ..Default::default()
            });
        }
        info!("Scraped {} jobs", all_jobs.len());

        if let Some(cache) = &self.cache {
            cache.save(&all_jobs).context("Failed to cache scraped jobs")?;
        }

        let mut summary = self.process(all_jobs, options).await?;
        summary.elapsed = start_time.elapsed();
        Ok(summary)
    }

    /// Filter, write letters and export an already scraped batch.
    ///
    /// When no job passes the filters, all jobs are still exported along
    /// with an empty filtered sheet.
    pub async fn process(&self, all_jobs: Vec<JobListing>, options: &RunOptions) -> Result<RunSummary> {
        let start_time = Instant::now();

        let mut filtered = self.apply_filters(all_jobs.clone()).await?;

        if filtered.is_empty() {
            warn!("No jobs passed filters. Exporting all jobs without cover letters.");
            let output_path = self
                .exporter
                .export(&all_jobs, Some(&[]), None, options.workbook_name.as_deref())
                .context("Failed to export workbook")?;

            return Ok(RunSummary {
                total_jobs: all_jobs.len(),
                output_path: Some(output_path),
                elapsed: start_time.elapsed(),
                ..Default::default()
            });
        }
        info!("{} jobs passed filters", filtered.len());

        let with_cover_letters = self.write_cover_letters(&mut filtered, options).await;

        let output_path = self
            .exporter
            .export(
                &all_jobs,
                Some(&filtered),
                Some(&filtered),
                options.workbook_name.as_deref(),
            )
            .context("Failed to export workbook")?;

        let cover_letter_files = if with_cover_letters > 0 {
            self.exporter
                .export_cover_letters_txt(&filtered, None)
                .context("Failed to export cover letters")?
        } else {
            Vec::new()
        };

        let summary = RunSummary {
            total_jobs: all_jobs.len(),
            filtered_jobs: filtered.len(),
            with_cover_letters,
            output_path: Some(output_path),
            cover_letter_files,
            elapsed: start_time.elapsed(),
        };

        info!(
            "Pipeline complete: {} total, {} filtered, {} with cover letters in {:.2?}",
            summary.total_jobs, summary.filtered_jobs, summary.with_cover_letters, summary.elapsed
        );
        Ok(summary)
    }

    /// Run the engine off the async runtime
    async fn apply_filters(&self, jobs: Vec<JobListing>) -> Result<Vec<JobListing>> {
        let engine = self.engine.clone();
        tokio::task::spawn_blocking(move || engine.apply_all(jobs))
            .await
            .context("Filter task panicked")
    }

    async fn write_cover_letters(&self, jobs: &mut [JobListing], options: &RunOptions) -> usize {
        if options.skip_cover_letters {
            info!("Skipping cover letters (disabled for this run)");
            return 0;
        }

        match &self.generator {
            Some(generator) => generator.generate_batch(jobs, options.letter_delay).await,
            None => {
                warn!("Skipping cover letters (no language model configured)");
                0
            }
        }
    }
}

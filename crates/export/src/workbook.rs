//! Workbook export: one directory per run, one CSV file per sheet.

use crate::error::Result;
use chrono::Local;
use csv::Writer;
use listings::JobListing;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Column headers of every job sheet, in order.
pub const JOB_COLUMNS: [&str; 9] = [
    "Title",
    "Budget",
    "Client Location",
    "Posted",
    "Skills",
    "Description",
    "Job URL",
    "Cover Letter",
    "Scraped At",
];

/// Descriptions longer than this many characters are cut and marked "...".
const DESCRIPTION_PREVIEW_CHARS: usize = 500;
/// Longest title fragment used in a cover letter file name.
const FILE_TITLE_CHARS: usize = 50;

pub const SUMMARY_FILE: &str = "summary.csv";
pub const ALL_JOBS_FILE: &str = "all_jobs.csv";
pub const FILTERED_JOBS_FILE: &str = "filtered_jobs.csv";
pub const COVER_LETTERS_FILE: &str = "with_cover_letters.csv";

fn description_preview(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_PREVIEW_CHARS {
        let preview: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
        format!("{}...", preview)
    } else {
        description.to_string()
    }
}

fn job_record(job: &JobListing) -> [String; 9] {
    [
        job.title().to_string(),
        job.budget_display().to_string(),
        job.client_location().unwrap_or("Not specified").to_string(),
        job.posted_time().to_string(),
        job.skills().join(", "),
        description_preview(job.description()),
        job.job_url().to_string(),
        job.cover_letter().unwrap_or_default().to_string(),
        job.scraped_at().to_rfc3339(),
    ]
}

fn write_job_sheet(path: &Path, jobs: &[JobListing]) -> Result<()> {
    let mut writer = Writer::from_path(path)?;
    writer.write_record(JOB_COLUMNS)?;
    for job in jobs {
        writer.write_record(job_record(job))?;
    }
    writer.flush()?;
    Ok(())
}

/// Replace anything but letters, digits, space, '-' and '_' with '_'.
fn safe_file_title(title: &str) -> String {
    title
        .chars()
        .map(|c| if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_') { c } else { '_' })
        .take(FILE_TITLE_CHARS)
        .collect()
}

/// Writes run results to disk.
pub struct WorkbookExporter {
    output_dir: PathBuf,
}

impl WorkbookExporter {
    /// Create an exporter, creating `output_dir` if needed.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Export a run as a workbook directory.
    ///
    /// ## Sheets
    /// - `summary.csv`: counts and export time
    /// - `all_jobs.csv`: every scraped job
    /// - `filtered_jobs.csv`: only when given and its size differs from `all_jobs`
    /// - `with_cover_letters.csv`: jobs from `with_letters` that have a letter,
    ///   only when there is at least one
    ///
    /// # Arguments
    /// * `name` - Workbook directory name; defaults to `jobs_<YYYYmmdd_HHMMSS>`
    ///
    /// # Returns
    /// The path of the workbook directory
    pub fn export(
        &self,
        all_jobs: &[JobListing],
        filtered: Option<&[JobListing]>,
        with_letters: Option<&[JobListing]>,
        name: Option<&str>,
    ) -> Result<PathBuf> {
        let name = name
            .map(str::to_string)
            .unwrap_or_else(|| format!("jobs_{}", Local::now().format("%Y%m%d_%H%M%S")));
        let workbook = self.output_dir.join(name);
        fs::create_dir_all(&workbook)?;

        info!("Exporting to: {}", workbook.display());

        write_job_sheet(&workbook.join(ALL_JOBS_FILE), all_jobs)?;

        if let Some(filtered) = filtered.filter(|f| f.len() != all_jobs.len()) {
            write_job_sheet(&workbook.join(FILTERED_JOBS_FILE), filtered)?;
        }

        let lettered: Vec<JobListing> = with_letters
            .unwrap_or_default()
            .iter()
            .filter(|job| job.cover_letter().is_some())
            .cloned()
            .collect();
        if !lettered.is_empty() {
            write_job_sheet(&workbook.join(COVER_LETTERS_FILE), &lettered)?;
        }

        let mut summary = Writer::from_path(workbook.join(SUMMARY_FILE))?;
        summary.write_record(["Metric", "Value"])?;
        summary.write_record(["Total Jobs Scraped".to_string(), all_jobs.len().to_string()])?;
        summary.write_record([
            "Jobs After Filtering".to_string(),
            filtered.map_or(all_jobs.len(), <[JobListing]>::len).to_string(),
        ])?;
        summary.write_record(["Jobs with Cover Letters".to_string(), lettered.len().to_string()])?;
        summary.write_record([
            "Export Time".to_string(),
            Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
        ])?;
        summary.flush()?;

        info!("Workbook export complete: {}", workbook.display());
        Ok(workbook)
    }

    /// Write each cover letter to its own text file.
    ///
    /// Files are named `NNN_<title>.txt`, where `NNN` is the job's 1-based
    /// position in `jobs`. Jobs without a letter are skipped but still use
    /// up their number. `dir` defaults to `<output_dir>/cover_letters`.
    pub fn export_cover_letters_txt(
        &self,
        jobs: &[JobListing],
        dir: Option<&Path>,
    ) -> Result<Vec<PathBuf>> {
        let dir = dir.map_or_else(|| self.output_dir.join("cover_letters"), Path::to_path_buf);
        fs::create_dir_all(&dir)?;

        let mut exported = Vec::new();
        for (i, job) in jobs.iter().enumerate() {
            let Some(letter) = job.cover_letter() else {
                continue;
            };

            let path = dir.join(format!("{:03}_{}.txt", i + 1, safe_file_title(job.title())));
            let content = format!(
                "JOB: {}\nURL: {}\nBUDGET: {}\nSKILLS: {}\n\n---\n\nCOVER LETTER:\n\n{}\n",
                job.title(),
                job.job_url(),
                job.budget_display(),
                job.skills().join(", "),
                letter
            );
            fs::write(&path, content)?;
            exported.push(path);
        }

        info!("Exported {} cover letters to {}", exported.len(), dir.display());
        Ok(exported)
    }
}

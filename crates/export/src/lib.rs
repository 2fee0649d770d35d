//! Spreadsheet export of scraped and qualified jobs.
//!
//! A run is written as a workbook directory holding one CSV file per sheet,
//! plus optional plain-text files with each generated cover letter.

pub mod error;
pub mod workbook;

pub use error::{ExportError, Result};
pub use workbook::{
    WorkbookExporter, ALL_JOBS_FILE, COVER_LETTERS_FILE, FILTERED_JOBS_FILE, JOB_COLUMNS,
    SUMMARY_FILE,
};

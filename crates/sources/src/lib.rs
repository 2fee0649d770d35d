//! # Sources Crate
//!
//! This crate fetches job listings from a freelance marketplace.
//!
//! ## Components
//!
//! ### MarketplaceSpider
//! Walks the paginated search results for a query:
//! - Builds one search URL per page
//! - Extracts job cards from HTML with a [`JobTileSchema`], or reads JSON
//!   bodies directly
//! - De-duplicates listings by URL
//!
//! ### JobCache
//! Saves a scrape as JSON so it can be filtered again offline.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{JobSource, MarketplaceSpider};
//!
//! let spider = MarketplaceSpider::upwork()?;
//! let jobs = spider.fetch_jobs("Python Developer", 5).await?;
//! ```

pub mod cache;
pub mod error;
pub mod extract;
pub mod search;
pub mod spider;

pub use cache::JobCache;
pub use error::{Result, SourceError};
pub use extract::{extract_job_tiles, parse_extracted_json, CompiledSchema, JobTileSchema};
pub use search::{build_search_url, DEFAULT_SEARCH_URL};
pub use spider::MarketplaceSpider;

use async_trait::async_trait;
use listings::JobListing;

/// Anything that can produce job listings for a search query.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Returns the name of this source (for logging)
    fn name(&self) -> &str;

    /// Fetch listings for `query`, reading at most `max_pages` result pages.
    async fn fetch_jobs(&self, query: &str, max_pages: u32) -> Result<Vec<JobListing>>;
}

//! Paginated crawler for marketplace search results.

use crate::error::{Result, SourceError};
use crate::extract::{parse_extracted_json, CompiledSchema, JobTileSchema};
use crate::search::{build_search_url, DEFAULT_SEARCH_URL};
use crate::JobSource;
use async_trait::async_trait;
use listings::{JobListing, RawJobListing};
use rand::Rng;
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Pause between result pages, chosen uniformly from this range.
const DEFAULT_PAGE_DELAY: (Duration, Duration) =
    (Duration::from_millis(2000), Duration::from_millis(4000));

/// Crawls search result pages and turns job cards into listings.
///
/// ## Algorithm
/// For each page from 1 to `max_pages`:
/// 1. Wait a random delay (pages after the first)
/// 2. GET the page; on a transport error or non-success status, log and
///    move on to the next page
/// 3. Extract raw records (JSON bodies directly, HTML through the schema)
/// 4. Convert records to listings, skipping any without a usable URL
/// 5. Stop early if a page after the first yields nothing
///
/// Listings are de-duplicated by URL, keeping the first occurrence.
pub struct MarketplaceSpider {
    client: Client,
    search_url: Url,
    schema: CompiledSchema,
    page_delay: Option<(Duration, Duration)>,
}

impl MarketplaceSpider {
    /// Create a spider for the given search endpoint.
    pub fn new(search_url: Url) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            search_url,
            schema: JobTileSchema::upwork().compile()?,
            page_delay: Some(DEFAULT_PAGE_DELAY),
        })
    }

    /// Spider for the default marketplace.
    pub fn upwork() -> Result<Self> {
        Self::new(Url::parse(DEFAULT_SEARCH_URL)?)
    }

    pub fn with_schema(mut self, schema: &JobTileSchema) -> Result<Self> {
        self.schema = schema.compile()?;
        Ok(self)
    }

    /// Set the random delay range between pages.
    pub fn with_page_delay(mut self, min: Duration, max: Duration) -> Self {
        self.page_delay = Some((min, max.max(min)));
        self
    }

    pub fn without_page_delay(mut self) -> Self {
        self.page_delay = None;
        self
    }

    fn next_delay(&self) -> Option<Duration> {
        self.page_delay
            .map(|(min, max)| rand::rng().random_range(min..=max))
    }

    async fn fetch_page(&self, url: &Url) -> Result<String> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    fn extract(&self, body: &str) -> Vec<RawJobListing> {
        let trimmed = body.trim_start();
        if trimmed.starts_with('[') || trimmed.starts_with('{') {
            parse_extracted_json(body)
        } else {
            self.schema.extract(body)
        }
    }

    fn to_listings(&self, raw_jobs: Vec<RawJobListing>) -> Vec<JobListing> {
        raw_jobs
            .into_iter()
            .filter_map(|raw| match JobListing::from_raw(raw, &self.search_url) {
                Ok(job) => Some(job),
                Err(e) => {
                    debug!("Skipping job record: {}", e);
                    None
                }
            })
            .collect()
    }

    /// Crawl up to `max_pages` result pages for `query`.
    #[instrument(skip(self), fields(source = "marketplace"))]
    pub async fn scrape(&self, query: &str, max_pages: u32) -> Vec<JobListing> {
        info!("Starting scrape: query='{}', max_pages={}", query, max_pages);
        let mut all_jobs = Vec::new();

        for page in 1..=max_pages {
            let url = build_search_url(&self.search_url, query, page);
            info!("Scraping page {}/{}: {}", page, max_pages, url);

            if page > 1 {
                if let Some(delay) = self.next_delay() {
                    debug!("Page delay: {:.2}s", delay.as_secs_f64());
                    tokio::time::sleep(delay).await;
                }
            }

            let body = match self.fetch_page(&url).await {
                Ok(body) => body,
                Err(e) => {
                    error!("Failed to fetch page {}: {}", page, e);
                    continue;
                }
            };

            let jobs = self.to_listings(self.extract(&body));
            if jobs.is_empty() {
                warn!("No jobs extracted from page {}", page);
                if page > 1 {
                    info!("No more results, stopping pagination");
                    break;
                }
                continue;
            }

            info!("Found {} jobs on page {}", jobs.len(), page);
            all_jobs.extend(jobs);
        }

        let unique = dedup_by_url(all_jobs);
        info!("Scraping complete. Total unique jobs: {}", unique.len());
        unique
    }
}

/// Drop listings whose URL was already seen, preserving order.
pub fn dedup_by_url(jobs: Vec<JobListing>) -> Vec<JobListing> {
    let mut seen = HashSet::new();
    jobs.into_iter()
        .filter(|job| seen.insert(job.job_url().as_str().to_string()))
        .collect()
}

#[async_trait]
impl JobSource for MarketplaceSpider {
    fn name(&self) -> &str {
        "MarketplaceSpider"
    }

    async fn fetch_jobs(&self, query: &str, max_pages: u32) -> Result<Vec<JobListing>> {
        Ok(self.scrape(query, max_pages).await)
    }
}

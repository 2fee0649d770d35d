//! # Listings Crate
//!
//! Domain data for the lead-qualification pipeline: scraped job postings,
//! the criteria used to filter them, and the freelancer profile used to
//! write cover letters.
//!
//! ## Main Components
//!
//! - **types**: `JobListing`, `RawJobListing` and the `Extracted` tri-state
//! - **criteria**: `JobFilter`, the bundle of filter parameters
//! - **profile**: `UserProfile`, loaded from YAML or plain text
//! - **parser**: parsers for budget and posted-time text
//! - **error**: Error types for construction and loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use listings::{Extracted, JobListing};
//!
//! let job = JobListing::new("Python Developer", "Build an API", "https://www.upwork.com/jobs/~1")?
//!     .with_hourly_rate("$35-$60/hr")
//!     .with_posted_time("2 hours ago");
//!
//! assert_eq!(job.budget_value(), Extracted::Known(35.0));
//! assert_eq!(job.age_hours(), Extracted::Known(2.0));
//! ```

pub mod criteria;
pub mod error;
pub mod parser;
pub mod profile;
pub mod types;

pub use criteria::JobFilter;
pub use error::{ListingError, Result};
pub use profile::UserProfile;
pub use types::{Extracted, JobListing, RawJobListing};

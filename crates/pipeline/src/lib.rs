//! Pipeline for qualifying scraped job listings.
//!
//! This crate provides:
//! - Filter trait and one implementation per predicate
//! - FilterPipeline for composing filters in order
//! - JobFilterEngine, which pairs criteria with the standard pipeline
//!
//! ## Architecture
//! Listings pass through the predicates in a fixed order:
//! 1. Budget (numeric budget within range)
//! 2. Skills (enough required skills mentioned)
//! 3. Keywords (no excluded word, some included word)
//! 4. Location (not blacklisted, whitelisted if known)
//! 5. Age (posted recently enough)
//!
//! Each stage only sees what the previous stage kept. A field that cannot be
//! interpreted never causes a listing to be dropped.
//!
//! ## Example Usage
//! ```ignore
//! use listings::JobFilter;
//! use pipeline::JobFilterEngine;
//!
//! let criteria = JobFilter::new()
//!     .with_min_budget(500.0)
//!     .with_required_skills(["Python"], 1)
//!     .with_exclude_keywords(["junior"]);
//!
//! let engine = JobFilterEngine::new(criteria);
//! let qualified = engine.apply_all(jobs);
//! ```

pub mod engine;
pub mod filter_pipeline;
pub mod filters;
pub mod traits;

// Re-export main types
pub use engine::JobFilterEngine;
pub use filter_pipeline::FilterPipeline;
pub use traits::Filter;

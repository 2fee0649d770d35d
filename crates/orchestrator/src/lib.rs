//! Orchestrator crate for the lead-qualification pipeline.
//!
//! This crate contains the orchestrator that wires the crawler, the
//! filtering engine, the cover letter generator and the exporter together.

pub mod orchestrator;

pub use orchestrator::{LeadOrchestrator, RunOptions, RunSummary};

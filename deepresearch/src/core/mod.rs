//! Core data model for the research pipeline.
//!
//! This module provides:
//! - The stage status enum with its fixed progression order
//! - The accumulating record threaded through the pipeline
//! - The terminal outcome returned to callers

mod outcome;
mod record;
mod status;

pub use outcome::RunOutcome;
pub use record::{
    CitationOutput, DraftOutput, FactCheckOutput, ResearchOutput, ResearchRecord,
};
pub use status::StageStatus;

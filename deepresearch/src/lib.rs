//! # Deepresearch
//!
//! A multi-stage research and drafting pipeline.
//!
//! Deepresearch turns a topic into a cited, fact-checked answer by running
//! five sequential stages, each backed by an external text-generation or
//! web-search collaborator:
//!
//! - **Research**: generate search queries, run them, synthesize the results
//! - **Draft**: produce an initial answer from the synthesis
//! - **Fact check**: verify the draft against the research and correct it
//! - **Citation**: extract, reformat, and validate the draft's sources
//! - **Improve**: produce the final polished answer
//!
//! State flows through the pipeline as an immutable [`core::ResearchRecord`];
//! every stage returns a fresh record and the runner keeps the full snapshot
//! history, from which a reconciliation pass selects the canonical answer.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use deepresearch::prelude::*;
//!
//! let pipeline = Pipeline::standard(text_generator, search_provider, &config);
//! let runner = Runner::new(pipeline);
//! let outcome = runner.run(RunRequest::new("solar panel efficiency")).await;
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, missing_docs, rust_2018_idioms)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod core;
pub mod errors;
pub mod pipeline;
pub mod providers;
pub mod stages;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::core::{
        CitationOutput, DraftOutput, FactCheckOutput, ResearchOutput, ResearchRecord, RunOutcome,
        StageStatus,
    };
    pub use crate::errors::ResearchError;
    pub use crate::pipeline::{Pipeline, RunRequest, Runner};
    pub use crate::providers::{
        PromptTemplate, SearchDepth, SearchHit, SearchProvider, SearchResponse, TextGenerator,
    };
    pub use crate::stages::Stage;
}

//! Stage trait and the five pipeline stages.
//!
//! A stage consumes the most recent [`ResearchRecord`] snapshot and returns
//! a new one: either its own output field populated with the status
//! advanced, or the same record marked as failed. Stages never return `Err`
//! and never panic by contract; collaborator failures are degraded or
//! folded into the returned record's error message.

mod citation;
mod draft;
mod fact_check;
mod improve;
pub mod prompts;
mod research;

pub use citation::CitationStage;
pub use draft::DraftStage;
pub use fact_check::FactCheckStage;
pub use improve::ImproveStage;
pub use research::ResearchStage;

use crate::core::ResearchRecord;
use async_trait::async_trait;
use std::fmt::Debug;

/// Trait for pipeline stages.
#[async_trait]
pub trait Stage: Send + Sync + Debug {
    /// Returns the name of the stage.
    fn name(&self) -> &str;

    /// Executes the stage against the current record.
    ///
    /// Always returns a record: success advances the status, failure sets
    /// [`crate::core::StageStatus::Error`] with a message naming the stage
    /// and the underlying cause.
    async fn execute(&self, record: &ResearchRecord) -> ResearchRecord;
}

//! The terminal outcome of a pipeline run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ResearchOutput, StageStatus};

/// The reconciled result of one pipeline run.
///
/// Exactly one of these is produced per invocation: either
/// [`StageStatus::Complete`] with a non-empty final answer, or
/// [`StageStatus::Error`] with an error message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    /// The research topic.
    pub topic: String,
    /// Either `Complete` or `Error`.
    pub status: StageStatus,
    /// The canonical final answer, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_answer: Option<String>,
    /// The best available research output, present on success when any
    /// snapshot carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub research: Option<ResearchOutput>,
    /// The error message, present on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Correlation ID for the run.
    pub run_id: Uuid,
    /// When the outcome was produced.
    pub finished_at: DateTime<Utc>,
}

impl RunOutcome {
    /// Creates a successful outcome.
    #[must_use]
    pub fn complete(
        topic: impl Into<String>,
        final_answer: impl Into<String>,
        research: Option<ResearchOutput>,
    ) -> Self {
        Self {
            topic: topic.into(),
            status: StageStatus::Complete,
            final_answer: Some(final_answer.into()),
            research,
            error: None,
            run_id: Uuid::new_v4(),
            finished_at: Utc::now(),
        }
    }

    /// Creates a failed outcome.
    #[must_use]
    pub fn failure(topic: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            status: StageStatus::Error,
            final_answer: None,
            research: None,
            error: Some(error.into()),
            run_id: Uuid::new_v4(),
            finished_at: Utc::now(),
        }
    }

    /// Sets the run correlation ID.
    #[must_use]
    pub fn with_run_id(mut self, run_id: Uuid) -> Self {
        self.run_id = run_id;
        self
    }

    /// Whether the run completed with an answer.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == StageStatus::Complete
    }
}

//! The accumulating record threaded through the pipeline.
//!
//! A [`ResearchRecord`] is created once per run and then rebuilt, never
//! mutated, by each stage: the `with_*` constructors consume the current
//! value and return a new one with exactly one more output field populated
//! and the status advanced. The runner retains every snapshot.

use serde::{Deserialize, Serialize};

use super::StageStatus;
use crate::providers::{SearchDepth, SearchResponse};

/// Output of the research stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResearchOutput {
    /// The generated search queries, in generation order.
    pub queries: Vec<String>,
    /// One search response per query, in query order.
    pub searches: Vec<SearchResponse>,
    /// The synthesized summary of all search results.
    pub synthesis: String,
}

/// Output of the drafting stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DraftOutput {
    /// The initial draft produced from the research synthesis.
    pub initial_draft: String,
    /// The drafting stage's answer; equal to the initial draft because
    /// improvement runs as its own stage.
    pub final_answer: String,
}

/// Output of the fact-checking stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FactCheckOutput {
    /// The fact-check report.
    pub report: String,
    /// The draft with identified inaccuracies corrected.
    pub corrected_draft: String,
}

/// Output of the citation stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CitationOutput {
    /// The citation analysis report.
    pub analysis: String,
    /// The draft with citations reformatted to the configured style.
    pub formatted_draft: String,
    /// The validation report split out of the validator's response.
    pub validation_report: String,
    /// The validated document split out of the validator's response.
    pub final_draft: String,
}

/// The state record passed between pipeline stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchRecord {
    /// The research topic, immutable for the run.
    pub topic: String,
    /// The configured search depth, immutable for the run.
    pub depth: SearchDepth,
    /// The configured number of search queries, immutable for the run.
    pub query_count: usize,
    /// Research stage output, populated exactly once.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub research: Option<ResearchOutput>,
    /// Drafting stage output, populated exactly once.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<DraftOutput>,
    /// Fact-checking stage output, populated exactly once.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fact_check: Option<FactCheckOutput>,
    /// Citation stage output, populated exactly once.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation: Option<CitationOutput>,
    /// The final improved answer, set only by the improvement stage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_answer: Option<String>,
    /// The run status, advancing forward or jumping to error.
    pub status: StageStatus,
    /// The error message; set iff `status` is [`StageStatus::Error`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResearchRecord {
    /// Creates the initial record for a run.
    #[must_use]
    pub fn new(topic: impl Into<String>, depth: SearchDepth, query_count: usize) -> Self {
        Self {
            topic: topic.into(),
            depth,
            query_count,
            research: None,
            draft: None,
            fact_check: None,
            citation: None,
            final_answer: None,
            status: StageStatus::Research,
            error: None,
        }
    }

    /// Returns a new record with the research output set and status
    /// advanced to [`StageStatus::Draft`].
    #[must_use]
    pub fn with_research(mut self, research: ResearchOutput) -> Self {
        self.research = Some(research);
        self.status = StageStatus::Draft;
        self
    }

    /// Returns a new record with the draft output set and status advanced
    /// to [`StageStatus::FactCheck`].
    #[must_use]
    pub fn with_draft(mut self, draft: DraftOutput) -> Self {
        self.draft = Some(draft);
        self.status = StageStatus::FactCheck;
        self
    }

    /// Returns a new record with the fact-check output set and status
    /// advanced to [`StageStatus::Citation`].
    #[must_use]
    pub fn with_fact_check(mut self, fact_check: FactCheckOutput) -> Self {
        self.fact_check = Some(fact_check);
        self.status = StageStatus::Citation;
        self
    }

    /// Returns a new record with the citation output set and status
    /// advanced to [`StageStatus::Improve`].
    #[must_use]
    pub fn with_citation(mut self, citation: CitationOutput) -> Self {
        self.citation = Some(citation);
        self.status = StageStatus::Improve;
        self
    }

    /// Returns a new record with the final answer set and status advanced
    /// to [`StageStatus::Complete`].
    #[must_use]
    pub fn with_final_answer(mut self, answer: impl Into<String>) -> Self {
        self.final_answer = Some(answer.into());
        self.status = StageStatus::Complete;
        self
    }

    /// Returns a new record marked as failed with the given message.
    #[must_use]
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self.status = StageStatus::Error;
        self
    }

    /// The best draft text available so far.
    ///
    /// Preference order: citation stage's validated draft, then the
    /// fact-checked corrected draft, then the initial draft.
    #[must_use]
    pub fn best_draft(&self) -> Option<&str> {
        self.citation
            .as_ref()
            .map(|c| c.final_draft.as_str())
            .or_else(|| self.fact_check.as_ref().map(|f| f.corrected_draft.as_str()))
            .or_else(|| self.draft.as_ref().map(|d| d.initial_draft.as_str()))
    }

    /// Whether a non-empty final answer has been set.
    #[must_use]
    pub fn has_final_answer(&self) -> bool {
        self.final_answer
            .as_ref()
            .is_some_and(|a| !a.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn initial() -> ResearchRecord {
        ResearchRecord::new("rust adoption", SearchDepth::Basic, 3)
    }

    #[test]
    fn test_initial_record() {
        let record = initial();
        assert_eq!(record.status, StageStatus::Research);
        assert!(record.research.is_none());
        assert!(record.final_answer.is_none());
        assert!(record.error.is_none());
    }

    #[test]
    fn test_status_advances_with_outputs() {
        let record = initial()
            .with_research(ResearchOutput::default())
            .with_draft(DraftOutput::default())
            .with_fact_check(FactCheckOutput::default())
            .with_citation(CitationOutput::default())
            .with_final_answer("done");

        assert_eq!(record.status, StageStatus::Complete);
        assert!(record.has_final_answer());
    }

    #[test]
    fn test_copy_on_write_preserves_previous_snapshot() {
        let before = initial();
        let after = before.clone().with_research(ResearchOutput {
            queries: vec!["q1".to_string()],
            searches: Vec::new(),
            synthesis: "summary".to_string(),
        });

        assert!(before.research.is_none());
        assert_eq!(before.status, StageStatus::Research);
        assert_eq!(after.status, StageStatus::Draft);
    }

    #[test]
    fn test_error_sets_message() {
        let record = initial().with_error("Research error: quota exhausted");
        assert_eq!(record.status, StageStatus::Error);
        assert_eq!(
            record.error.as_deref(),
            Some("Research error: quota exhausted")
        );
    }

    #[test]
    fn test_best_draft_preference() {
        let mut record = initial();
        assert_eq!(record.best_draft(), None);

        record.draft = Some(DraftOutput {
            initial_draft: "initial".to_string(),
            final_answer: "initial".to_string(),
        });
        assert_eq!(record.best_draft(), Some("initial"));

        record.fact_check = Some(FactCheckOutput {
            report: "ok".to_string(),
            corrected_draft: "corrected".to_string(),
        });
        assert_eq!(record.best_draft(), Some("corrected"));

        record.citation = Some(CitationOutput {
            final_draft: "validated".to_string(),
            ..Default::default()
        });
        assert_eq!(record.best_draft(), Some("validated"));
    }

    #[test]
    fn test_has_final_answer_rejects_blank() {
        let record = initial().with_final_answer("   ");
        assert!(!record.has_final_answer());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let record = initial().with_research(ResearchOutput {
            queries: vec!["q".to_string()],
            searches: Vec::new(),
            synthesis: "s".to_string(),
        });

        let json = serde_json::to_string(&record).unwrap();
        let restored: ResearchRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record.status, restored.status);
        assert_eq!(record.research, restored.research);
    }
}

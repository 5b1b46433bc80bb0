//! Improvement stage: final editorial pass over the best available draft.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use super::{prompts, Stage};
use crate::core::ResearchRecord;
use crate::providers::TextGenerator;

/// Runs an editorial improvement pass over the best draft produced so far
/// and records it as the final answer.
///
/// The cited draft is preferred, then the fact-checked one, then the
/// initial draft. A failed improvement call keeps the input draft as the
/// final answer rather than failing the run this late.
#[derive(Debug)]
pub struct ImproveStage {
    text: Arc<dyn TextGenerator>,
}

impl ImproveStage {
    /// Creates a new improvement stage.
    #[must_use]
    pub fn new(text: Arc<dyn TextGenerator>) -> Self {
        Self { text }
    }
}

#[async_trait]
impl Stage for ImproveStage {
    fn name(&self) -> &str {
        "improve"
    }

    async fn execute(&self, record: &ResearchRecord) -> ResearchRecord {
        let Some(draft) = record.best_draft().map(ToString::to_string) else {
            return record
                .clone()
                .with_error("Improvement error: no draft available".to_string());
        };

        info!(topic = %record.topic, "improving final draft");
        let vars = HashMap::from([
            ("research_topic".to_string(), record.topic.clone()),
            ("draft".to_string(), draft.clone()),
        ]);

        let final_answer = match self.text.generate(&prompts::IMPROVEMENT, &vars).await {
            Ok(improved) => improved,
            Err(err) => {
                warn!(%err, "improvement failed, keeping input draft as final answer");
                draft
            }
        };

        record.clone().with_final_answer(final_answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        CitationOutput, DraftOutput, FactCheckOutput, ResearchOutput, StageStatus,
    };
    use crate::providers::SearchDepth;
    use crate::testing::MockTextGenerator;
    use pretty_assertions::assert_eq;

    fn cited_record() -> ResearchRecord {
        ResearchRecord::new("topic", SearchDepth::Basic, 1)
            .with_research(ResearchOutput {
                queries: Vec::new(),
                searches: Vec::new(),
                synthesis: "synthesis".to_string(),
            })
            .with_draft(DraftOutput {
                initial_draft: "initial".to_string(),
                final_answer: "initial".to_string(),
            })
            .with_fact_check(FactCheckOutput {
                report: "clean".to_string(),
                corrected_draft: "corrected".to_string(),
            })
            .with_citation(CitationOutput {
                analysis: "analysis".to_string(),
                formatted_draft: "formatted".to_string(),
                validation_report: "ok".to_string(),
                final_draft: "cited final".to_string(),
            })
    }

    #[tokio::test]
    async fn test_improve_success_uses_cited_draft() {
        let text = Arc::new(MockTextGenerator::new());
        text.script("improvement", "the polished answer");

        let stage = ImproveStage::new(Arc::clone(&text) as Arc<dyn TextGenerator>);
        let output = stage.execute(&cited_record()).await;

        assert_eq!(output.status, StageStatus::Complete);
        assert_eq!(output.final_answer.as_deref(), Some("the polished answer"));

        let calls = text.calls();
        assert_eq!(calls[0].vars.get("draft").unwrap(), "cited final");
    }

    #[tokio::test]
    async fn test_improve_failure_keeps_input_draft() {
        let text = Arc::new(MockTextGenerator::new());
        text.fail("improvement");

        let output = ImproveStage::new(text).execute(&cited_record()).await;

        // Still completes; the unimproved draft is the answer.
        assert_eq!(output.status, StageStatus::Complete);
        assert_eq!(output.final_answer.as_deref(), Some("cited final"));
    }

    #[tokio::test]
    async fn test_falls_back_to_initial_draft() {
        let text = Arc::new(MockTextGenerator::new());
        text.script("improvement", "improved");
        let record = ResearchRecord::new("topic", SearchDepth::Basic, 1)
            .with_research(ResearchOutput {
                queries: Vec::new(),
                searches: Vec::new(),
                synthesis: "s".to_string(),
            })
            .with_draft(DraftOutput {
                initial_draft: "only draft".to_string(),
                final_answer: "only draft".to_string(),
            });

        let stage = ImproveStage::new(Arc::clone(&text) as Arc<dyn TextGenerator>);
        let output = stage.execute(&record).await;

        assert_eq!(output.status, StageStatus::Complete);
        assert_eq!(text.calls()[0].vars.get("draft").unwrap(), "only draft");
    }

    #[tokio::test]
    async fn test_missing_draft_is_stage_error() {
        let text = Arc::new(MockTextGenerator::new());
        let bare = ResearchRecord::new("topic", SearchDepth::Basic, 1);

        let output = ImproveStage::new(text).execute(&bare).await;

        assert_eq!(output.status, StageStatus::Error);
        assert!(output.error.unwrap().contains("no draft available"));
    }
}

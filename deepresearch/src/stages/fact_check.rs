//! Fact-checking stage: verify the draft against the research and correct it.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use super::{prompts, Stage};
use crate::core::{FactCheckOutput, ResearchRecord};
use crate::providers::TextGenerator;

/// Produces a fact-check report for the initial draft, then a corrected
/// draft based on that report.
///
/// Both sub-steps degrade rather than abort: a failed report call yields an
/// error-text report (correction then returns the draft unchanged per its
/// prompt), and a failed correction call falls back to the uncorrected
/// input.
#[derive(Debug)]
pub struct FactCheckStage {
    text: Arc<dyn TextGenerator>,
}

impl FactCheckStage {
    /// Creates a new fact-checking stage.
    #[must_use]
    pub fn new(text: Arc<dyn TextGenerator>) -> Self {
        Self { text }
    }
}

#[async_trait]
impl Stage for FactCheckStage {
    fn name(&self) -> &str {
        "fact_check"
    }

    async fn execute(&self, record: &ResearchRecord) -> ResearchRecord {
        let Some(research) = record.research.as_ref() else {
            return record
                .clone()
                .with_error("Fact check error: missing research output".to_string());
        };
        let Some(draft) = record.draft.as_ref() else {
            return record
                .clone()
                .with_error("Fact check error: missing draft output".to_string());
        };

        info!(topic = %record.topic, "fact-checking draft");
        let report_vars = HashMap::from([
            ("research_topic".to_string(), record.topic.clone()),
            ("research_synthesis".to_string(), research.synthesis.clone()),
            ("draft".to_string(), draft.initial_draft.clone()),
        ]);
        let report = match self.text.generate(&prompts::FACT_CHECK, &report_vars).await {
            Ok(report) => report,
            Err(err) => {
                warn!(%err, "fact-check report failed");
                format!("Error during fact-checking: {err}")
            }
        };

        let correction_vars = HashMap::from([
            ("research_topic".to_string(), record.topic.clone()),
            ("draft".to_string(), draft.initial_draft.clone()),
            ("fact_check_report".to_string(), report.clone()),
        ]);
        let corrected_draft = match self
            .text
            .generate(&prompts::CORRECTION, &correction_vars)
            .await
        {
            Ok(corrected) => corrected,
            Err(err) => {
                warn!(%err, "draft correction failed, keeping uncorrected draft");
                draft.initial_draft.clone()
            }
        };

        record.clone().with_fact_check(FactCheckOutput {
            report,
            corrected_draft,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DraftOutput, ResearchOutput, StageStatus};
    use crate::providers::SearchDepth;
    use crate::testing::MockTextGenerator;
    use pretty_assertions::assert_eq;

    fn drafted_record() -> ResearchRecord {
        ResearchRecord::new("topic", SearchDepth::Basic, 1)
            .with_research(ResearchOutput {
                queries: Vec::new(),
                searches: Vec::new(),
                synthesis: "synthesis".to_string(),
            })
            .with_draft(DraftOutput {
                initial_draft: "the draft".to_string(),
                final_answer: "the draft".to_string(),
            })
    }

    #[tokio::test]
    async fn test_fact_check_success() {
        let text = Arc::new(MockTextGenerator::new());
        text.script("fact_check", "one inaccuracy found");
        text.script("correction", "the corrected draft");

        let output = FactCheckStage::new(text).execute(&drafted_record()).await;

        assert_eq!(output.status, StageStatus::Citation);
        let fc = output.fact_check.unwrap();
        assert_eq!(fc.report, "one inaccuracy found");
        assert_eq!(fc.corrected_draft, "the corrected draft");
    }

    #[tokio::test]
    async fn test_correction_failure_keeps_input_draft() {
        let text = Arc::new(MockTextGenerator::new());
        text.script("fact_check", "report");
        text.fail("correction");

        let output = FactCheckStage::new(text).execute(&drafted_record()).await;

        assert_eq!(output.status, StageStatus::Citation);
        assert_eq!(output.fact_check.unwrap().corrected_draft, "the draft");
    }

    #[tokio::test]
    async fn test_report_failure_degrades_but_continues() {
        let text = Arc::new(MockTextGenerator::new());
        text.fail("fact_check");
        text.script("correction", "still corrected");

        let output = FactCheckStage::new(text).execute(&drafted_record()).await;

        assert_eq!(output.status, StageStatus::Citation);
        let fc = output.fact_check.unwrap();
        assert!(fc.report.contains("Error during fact-checking"));
        assert_eq!(fc.corrected_draft, "still corrected");
    }

    #[tokio::test]
    async fn test_missing_draft_is_stage_error() {
        let text = Arc::new(MockTextGenerator::new());
        let record = ResearchRecord::new("topic", SearchDepth::Basic, 1).with_research(
            ResearchOutput {
                queries: Vec::new(),
                searches: Vec::new(),
                synthesis: "s".to_string(),
            },
        );

        let output = FactCheckStage::new(text).execute(&record).await;

        assert_eq!(output.status, StageStatus::Error);
        assert!(output.error.unwrap().contains("missing draft output"));
    }
}

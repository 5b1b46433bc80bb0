//! Drafting stage: first structured answer from the research synthesis.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use super::{prompts, Stage};
use crate::core::{DraftOutput, ResearchRecord};
use crate::providers::TextGenerator;

/// Produces the initial draft from the research synthesis.
///
/// Improvement is deliberately not part of this stage; the improve stage
/// owns it, so the draft output's answer equals the initial draft.
#[derive(Debug)]
pub struct DraftStage {
    text: Arc<dyn TextGenerator>,
}

impl DraftStage {
    /// Creates a new drafting stage.
    #[must_use]
    pub fn new(text: Arc<dyn TextGenerator>) -> Self {
        Self { text }
    }
}

#[async_trait]
impl Stage for DraftStage {
    fn name(&self) -> &str {
        "draft"
    }

    async fn execute(&self, record: &ResearchRecord) -> ResearchRecord {
        let Some(research) = record.research.as_ref() else {
            return record
                .clone()
                .with_error("Drafting error: missing research output".to_string());
        };

        info!(topic = %record.topic, "drafting answer");
        let vars = HashMap::from([
            ("research_topic".to_string(), record.topic.clone()),
            ("research_synthesis".to_string(), research.synthesis.clone()),
        ]);

        match self.text.generate(&prompts::DRAFTING, &vars).await {
            Ok(draft) => record.clone().with_draft(DraftOutput {
                initial_draft: draft.clone(),
                final_answer: draft,
            }),
            Err(err) => record
                .clone()
                .with_error(format!("Drafting error: {err}")),
        }
    }
}

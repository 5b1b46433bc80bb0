//! Pipeline definition and execution.
//!
//! This module provides:
//! - The ordered stage list and its routing rule
//! - The runner that drives a pipeline and collects snapshots
//! - Reconciliation of the snapshot history into one canonical outcome

mod reconcile;
mod runner;


pub use reconcile::reconcile;
pub use runner::{RunRequest, Runner};

use std::sync::Arc;

use crate::config::Config;
use crate::providers::{SearchProvider, TextGenerator};
use crate::stages::{
    CitationStage, DraftStage, FactCheckStage, ImproveStage, ResearchStage, Stage,
};

/// An ordered list of stages with a single routing rule: after any stage,
/// stop if it reported an error, otherwise run the next stage in order.
///
/// The pipeline itself holds no mutable state.
#[derive(Debug)]
pub struct Pipeline {
    stages: Vec<Arc<dyn Stage>>,
}

impl Pipeline {
    /// Creates a pipeline from an explicit stage list.
    #[must_use]
    pub fn new(stages: Vec<Arc<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// Wires the standard five-stage research pipeline.
    #[must_use]
    pub fn standard(
        text: Arc<dyn TextGenerator>,
        search: Arc<dyn SearchProvider>,
        config: &Config,
    ) -> Self {
        Self::new(vec![
            Arc::new(ResearchStage::new(
                Arc::clone(&text),
                search,
                config.max_search_results,
            )),
            Arc::new(DraftStage::new(Arc::clone(&text))),
            Arc::new(FactCheckStage::new(Arc::clone(&text))),
            Arc::new(CitationStage::new(
                Arc::clone(&text),
                config.citation_style.clone(),
            )),
            Arc::new(ImproveStage::new(text)),
        ])
    }

    /// The stages in execution order.
    #[must_use]
    pub fn stages(&self) -> &[Arc<dyn Stage>] {
        &self.stages
    }

    /// Number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the pipeline has no stages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockSearchProvider, MockTextGenerator};

    #[test]
    fn test_standard_pipeline_stage_order() {
        let text = Arc::new(MockTextGenerator::new());
        let search = Arc::new(MockSearchProvider::with_canned_hit());
        let pipeline = Pipeline::standard(text, search, &Config::default());

        let names: Vec<_> = pipeline.stages().iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec!["research", "draft", "fact_check", "citation", "improve"]
        );
    }
}

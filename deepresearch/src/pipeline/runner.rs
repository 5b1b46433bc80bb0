//! Drives a pipeline to completion and reconciles the outcome.

use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{reconcile, Pipeline};
use crate::core::{ResearchRecord, RunOutcome};
use crate::providers::SearchDepth;

/// Parameters for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// The research topic.
    pub topic: String,
    /// Search depth for every query in the run.
    pub depth: SearchDepth,
    /// How many search queries to generate.
    pub query_count: usize,
}

impl RunRequest {
    /// Creates a request with the default depth and query count.
    #[must_use]
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            depth: SearchDepth::Basic,
            query_count: 3,
        }
    }

    /// Sets the search depth.
    #[must_use]
    pub fn with_depth(mut self, depth: SearchDepth) -> Self {
        self.depth = depth;
        self
    }

    /// Sets the number of queries to generate.
    #[must_use]
    pub fn with_query_count(mut self, query_count: usize) -> Self {
        self.query_count = query_count;
        self
    }
}

/// Executes a [`Pipeline`] stage by stage, keeping every snapshot.
///
/// The runner appends the initial record and each stage's returned record
/// to an ordered history, stops at the first stage-reported error, captures
/// the terminal stage's record directly, and hands the whole history to
/// [`reconcile`] for the canonical outcome.
///
/// Each stage runs in its own spawned task, so a panic inside a stage is
/// contained here and reported as a workflow execution error rather than
/// unwinding through the caller.
#[derive(Debug)]
pub struct Runner {
    pipeline: Pipeline,
}

impl Runner {
    /// Creates a runner for the given pipeline.
    #[must_use]
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    /// Runs the pipeline once and returns the reconciled outcome.
    pub async fn run(&self, request: RunRequest) -> RunOutcome {
        let run_id = Uuid::new_v4();
        info!(%run_id, topic = %request.topic, depth = %request.depth, "starting run");

        let initial = ResearchRecord::new(
            request.topic.clone(),
            request.depth,
            request.query_count,
        );
        let mut history = vec![initial.clone()];
        let mut terminal_record = None;
        let mut current = initial;

        let last_index = self.pipeline.len().saturating_sub(1);
        for (index, stage) in self.pipeline.stages().iter().enumerate() {
            let task_stage = Arc::clone(stage);
            let input = current.clone();
            let handle =
                tokio::spawn(async move { task_stage.execute(&input).await });

            let next = match handle.await {
                Ok(record) => record,
                Err(err) => {
                    error!(%run_id, stage = stage.name(), %err, "stage task failed");
                    return RunOutcome::failure(
                        request.topic,
                        format!("workflow execution error: {err}"),
                    )
                    .with_run_id(run_id);
                }
            };

            history.push(next.clone());
            if index == last_index {
                terminal_record = Some(next.clone());
            }
            if next.status.is_error() {
                warn!(
                    %run_id,
                    stage = stage.name(),
                    error = next.error.as_deref().unwrap_or(""),
                    "stage reported an error, stopping"
                );
                break;
            }
            current = next;
        }

        let outcome =
            reconcile(&request.topic, &history, terminal_record.as_ref()).with_run_id(run_id);
        info!(%run_id, status = %outcome.status, "run finished");
        outcome
    }
}

//! Selection of the canonical final answer from a run's snapshot history.

use tracing::{debug, warn};

use crate::core::{ResearchOutput, ResearchRecord, RunOutcome, StageStatus};

/// Reconciles a run's snapshot history into one canonical outcome.
///
/// `improve` is the record returned by the terminal stage, captured
/// directly by the runner; `history` is every snapshot observed during the
/// run, in execution order. Candidates are tried in a fixed precedence and
/// the first match wins:
///
/// 1. the terminal stage's record, if it completed with an answer
/// 2. the most recent completed snapshot with an answer
/// 3. the last snapshot anywhere in the history carrying an answer,
///    whatever its status
/// 4. the terminal stage's record, if it carries an answer at all
/// 5. the final snapshot, if it carries an answer
///
/// When nothing matches, the outcome is an error: the last snapshot's own
/// error message when it has one, otherwise "no final answer was produced".
///
/// The research output attached to a successful outcome is taken from the
/// chosen record, falling back to the most recent snapshot that has one.
#[must_use]
pub fn reconcile(
    topic: &str,
    history: &[ResearchRecord],
    improve: Option<&ResearchRecord>,
) -> RunOutcome {
    let chosen = improve
        .filter(|r| r.status == StageStatus::Complete && r.has_final_answer())
        .or_else(|| last_complete_with_answer(history))
        .or_else(|| last_with_answer(history))
        .or_else(|| improve.filter(|r| r.has_final_answer()))
        .or_else(|| final_snapshot_with_answer(history));

    match chosen {
        Some(record) => {
            debug!(topic, status = %record.status, "reconciled final answer");
            let answer = record.final_answer.clone().unwrap_or_default();
            let research = record
                .research
                .clone()
                .or_else(|| best_research(history));
            RunOutcome::complete(topic, answer, research)
        }
        None => {
            warn!(topic, snapshots = history.len(), "no usable final answer in history");
            let message = history
                .last()
                .and_then(|r| r.error.clone())
                .unwrap_or_else(|| "no final answer was produced".to_string());
            RunOutcome::failure(topic, message)
        }
    }
}

/// Most recent snapshot that both completed and carries an answer.
fn last_complete_with_answer(history: &[ResearchRecord]) -> Option<&ResearchRecord> {
    history
        .iter()
        .rev()
        .find(|r| r.status == StageStatus::Complete && r.has_final_answer())
}

/// Most recent snapshot carrying an answer, regardless of status.
fn last_with_answer(history: &[ResearchRecord]) -> Option<&ResearchRecord> {
    history.iter().rev().find(|r| r.has_final_answer())
}

/// The final snapshot, when it carries an answer.
fn final_snapshot_with_answer(history: &[ResearchRecord]) -> Option<&ResearchRecord> {
    history.last().filter(|r| r.has_final_answer())
}

/// Most recent research output anywhere in the history.
fn best_research(history: &[ResearchRecord]) -> Option<ResearchOutput> {
    history.iter().rev().find_map(|r| r.research.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DraftOutput, ResearchOutput};
    use crate::providers::SearchDepth;
    use pretty_assertions::assert_eq;

    fn record() -> ResearchRecord {
        ResearchRecord::new("topic", SearchDepth::Basic, 2)
    }

    fn research(synthesis: &str) -> ResearchOutput {
        ResearchOutput {
            queries: vec!["q1".to_string(), "q2".to_string()],
            searches: Vec::new(),
            synthesis: synthesis.to_string(),
        }
    }

    /// Puts a non-empty answer on a record without moving it to `Complete`.
    fn with_intermediate_answer(record: ResearchRecord, answer: &str) -> ResearchRecord {
        record
            .with_research(research("s"))
            .with_draft(DraftOutput {
                initial_draft: answer.to_string(),
                final_answer: answer.to_string(),
            })
    }

    #[test]
    fn test_terminal_record_wins_when_complete() {
        let improve = record()
            .with_research(research("terminal research"))
            .with_draft(DraftOutput {
                initial_draft: "d".to_string(),
                final_answer: "d".to_string(),
            })
            .with_final_answer("direct answer");
        // A competing completed snapshot in the history must lose.
        let stale = record()
            .with_research(research("stale"))
            .with_draft(DraftOutput {
                initial_draft: "old".to_string(),
                final_answer: "old".to_string(),
            })
            .with_final_answer("stale answer");

        let outcome = reconcile("topic", &[record(), stale], Some(&improve));

        assert!(outcome.is_complete());
        assert_eq!(outcome.final_answer.as_deref(), Some("direct answer"));
        assert_eq!(outcome.research.unwrap().synthesis, "terminal research");
    }

    #[test]
    fn test_latest_completed_snapshot() {
        let completed = record()
            .with_research(research("s"))
            .with_draft(DraftOutput {
                initial_draft: "d".to_string(),
                final_answer: "d".to_string(),
            })
            .with_final_answer("completed answer");

        let outcome = reconcile("topic", &[record(), completed], None);

        assert!(outcome.is_complete());
        assert_eq!(outcome.final_answer.as_deref(), Some("completed answer"));
    }

    #[test]
    fn test_completed_snapshot_beats_intermediate_answer() {
        // Both a completed snapshot and a later intermediate answer exist;
        // the completed one must win even though it is older.
        let completed = record()
            .with_research(research("s"))
            .with_draft(DraftOutput {
                initial_draft: "d".to_string(),
                final_answer: "d".to_string(),
            })
            .with_final_answer("completed answer");
        let intermediate = with_intermediate_answer(record(), "intermediate answer");

        let outcome = reconcile("topic", &[completed, intermediate], None);

        assert_eq!(outcome.final_answer.as_deref(), Some("completed answer"));
    }

    #[test]
    fn test_intermediate_answer_when_nothing_completed() {
        let first = with_intermediate_answer(record(), "first");
        let second = with_intermediate_answer(record(), "second");

        let outcome = reconcile("topic", &[first, second, record()], None);

        assert!(outcome.is_complete());
        // The later of the two intermediate answers.
        assert_eq!(outcome.final_answer.as_deref(), Some("second"));
    }

    #[test]
    fn test_terminal_record_answer_without_complete_status() {
        let improve = with_intermediate_answer(record(), "improve answer");

        let outcome = reconcile("topic", &[record()], Some(&improve));

        assert!(outcome.is_complete());
        assert_eq!(outcome.final_answer.as_deref(), Some("improve answer"));
    }

    #[test]
    fn test_final_snapshot_answer() {
        let last = with_intermediate_answer(record(), "last answer");
        assert_eq!(
            final_snapshot_with_answer(&[record(), last.clone()])
                .and_then(|r| r.final_answer.as_deref()),
            Some("last answer")
        );
        assert!(final_snapshot_with_answer(&[last, record()]).is_none());
    }

    #[test]
    fn test_no_answer_anywhere_is_error() {
        let outcome = reconcile("topic", &[record(), record()], None);

        assert_eq!(outcome.status, StageStatus::Error);
        assert_eq!(
            outcome.error.as_deref(),
            Some("no final answer was produced")
        );
    }

    #[test]
    fn test_stage_error_message_surfaces() {
        let failed = record().with_error("Drafting error: model offline".to_string());

        let outcome = reconcile("topic", &[record(), failed], None);

        assert_eq!(outcome.status, StageStatus::Error);
        assert_eq!(
            outcome.error.as_deref(),
            Some("Drafting error: model offline")
        );
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let history = vec![
            record(),
            with_intermediate_answer(record(), "answer"),
        ];

        let first = reconcile("topic", &history, None);
        let second = reconcile("topic", &history, None);

        assert_eq!(first.status, second.status);
        assert_eq!(first.final_answer, second.final_answer);
        assert_eq!(
            first.research.map(|r| r.synthesis),
            second.research.map(|r| r.synthesis)
        );
    }

    #[test]
    fn test_research_falls_back_to_history() {
        // The chosen record has an answer but no research of its own.
        let researched = record().with_research(research("from history"));
        let chosen = ResearchRecord {
            final_answer: Some("bare answer".to_string()),
            status: StageStatus::Complete,
            ..record()
        };

        let outcome = reconcile("topic", &[researched, chosen], None);

        assert_eq!(outcome.research.unwrap().synthesis, "from history");
    }
}

//! Citation stage: extract, reformat, and validate the draft's sources.

use async_trait::async_trait;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use tracing::{info, warn};

use super::{prompts, Stage};
use crate::core::{CitationOutput, ResearchRecord};
use crate::providers::TextGenerator;

/// Extracts citations from the best available draft, reformats them to a
/// configured style, and validates the result.
///
/// The validator returns a single text blob containing both a validation
/// report and the validated document; an ordered chain of split heuristics
/// separates the two because the blob's shape is not guaranteed.
#[derive(Debug)]
pub struct CitationStage {
    text: Arc<dyn TextGenerator>,
    citation_style: String,
}

impl CitationStage {
    /// Creates a new citation stage using the given citation style.
    #[must_use]
    pub fn new(text: Arc<dyn TextGenerator>, citation_style: impl Into<String>) -> Self {
        Self {
            text,
            citation_style: citation_style.into(),
        }
    }
}

/// A validator response separated into its report and document parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationSplit {
    /// The validation report.
    pub report: String,
    /// The validated document.
    pub document: String,
}

#[allow(clippy::unwrap_used)]
static SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\n\s*(?:-{3,}|\*{3,}|_{3,})\s*\n)|(?:\n\s*(?P<heading>#{1,6}[ \t]+))")
        .unwrap()
});

/// Explicit `## Validation Report` / `## Final Document` section markers.
fn split_by_markers(text: &str) -> Option<ValidationSplit> {
    if !(text.contains("## Validation Report") && text.contains("## Final Document")) {
        return None;
    }
    let (head, tail) = text.split_once("## Final Document")?;
    Some(ValidationSplit {
        report: head.replace("## Validation Report", "").trim().to_string(),
        document: tail.trim().to_string(),
    })
}

/// A separator line (`---`, `***`, `___`) or markdown heading mid-text.
///
/// A separator line is consumed; a heading stays with the document.
fn split_by_separator(text: &str) -> Option<ValidationSplit> {
    let captures = SEPARATOR_RE.captures(text)?;
    let matched = captures.get(0)?;

    let report = text[..matched.start()].trim().to_string();
    let document = match captures.name("heading") {
        Some(heading) => text[heading.start()..].trim().to_string(),
        None => text[matched.end()..].trim().to_string(),
    };

    if report.is_empty() || document.is_empty() {
        return None;
    }
    Some(ValidationSplit { report, document })
}

/// First blank-line paragraph break: first paragraph is the report, the
/// rest is the document.
fn split_by_paragraph(text: &str) -> Option<ValidationSplit> {
    let (head, tail) = text.split_once("\n\n")?;
    let report = head.trim().to_string();
    let document = tail.trim().to_string();
    if report.is_empty() || document.is_empty() {
        return None;
    }
    Some(ValidationSplit { report, document })
}

const SPLIT_HEURISTICS: &[fn(&str) -> Option<ValidationSplit>] =
    &[split_by_markers, split_by_separator, split_by_paragraph];

/// Splits a validator response into (report, document).
///
/// Heuristics are tried in order, each only if the previous found no
/// match; when none match, the entire text is the document.
#[must_use]
pub fn split_validation(text: &str) -> ValidationSplit {
    for heuristic in SPLIT_HEURISTICS {
        if let Some(split) = heuristic(text) {
            return split;
        }
    }
    ValidationSplit {
        report: "No validation issues found.".to_string(),
        document: text.trim().to_string(),
    }
}

#[async_trait]
impl Stage for CitationStage {
    fn name(&self) -> &str {
        "citation"
    }

    async fn execute(&self, record: &ResearchRecord) -> ResearchRecord {
        let Some(research) = record.research.as_ref() else {
            return record
                .clone()
                .with_error("Citation error: missing research output".to_string());
        };
        // Prefer the fact-checked draft over the initial one.
        let Some(draft) = record.best_draft().map(ToString::to_string) else {
            return record
                .clone()
                .with_error("Citation error: no draft available".to_string());
        };

        info!(topic = %record.topic, style = %self.citation_style, "processing citations");

        let analysis_vars = HashMap::from([("draft".to_string(), draft.clone())]);
        let analysis = match self
            .text
            .generate(&prompts::CITATION_EXTRACTION, &analysis_vars)
            .await
        {
            Ok(analysis) => analysis,
            Err(err) => {
                warn!(%err, "citation extraction failed");
                format!("Error extracting citations: {err}")
            }
        };

        let formatting_vars = HashMap::from([
            ("research_topic".to_string(), record.topic.clone()),
            ("draft".to_string(), draft.clone()),
            ("citation_analysis".to_string(), analysis.clone()),
            ("research_synthesis".to_string(), research.synthesis.clone()),
            ("citation_style".to_string(), self.citation_style.clone()),
        ]);
        let formatted_draft = match self
            .text
            .generate(&prompts::CITATION_FORMATTING, &formatting_vars)
            .await
        {
            Ok(formatted) => formatted,
            Err(err) => {
                warn!(%err, "citation formatting failed, keeping input draft");
                draft.clone()
            }
        };

        let validation_vars =
            HashMap::from([("formatted_draft".to_string(), formatted_draft.clone())]);
        let (validation_report, final_draft) = match self
            .text
            .generate(&prompts::CITATION_VALIDATION, &validation_vars)
            .await
        {
            Ok(validation) => {
                let split = split_validation(&validation);
                (split.report, split.document)
            }
            Err(err) => {
                warn!(%err, "citation validation failed, keeping formatted draft");
                (
                    format!("Error validating citations: {err}"),
                    formatted_draft.clone(),
                )
            }
        };

        record.clone().with_citation(CitationOutput {
            analysis,
            formatted_draft,
            validation_report,
            final_draft,
        })
    }
}

//! Mock providers and stages for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

use crate::core::ResearchRecord;
use crate::errors::ResearchError;
use crate::providers::{
    PromptTemplate, SearchDepth, SearchHit, SearchProvider, SearchResponse, TextGenerator,
};
use crate::stages::Stage;

/// A recorded text-generation call.
#[derive(Debug, Clone)]
pub struct RecordedGeneration {
    /// Name of the template that was rendered.
    pub template: String,
    /// Variables passed for rendering.
    pub vars: HashMap<String, String>,
}

/// A mock text generator with per-template scripted replies.
///
/// Unscripted templates reply with `generated:{template}` so tests only
/// script the calls they assert on. Templates marked with [`fail`]
/// return a generation error instead.
///
/// [`fail`]: MockTextGenerator::fail
#[derive(Debug, Default)]
pub struct MockTextGenerator {
    replies: Mutex<HashMap<String, String>>,
    failures: Mutex<HashSet<String>>,
    calls: Mutex<Vec<RecordedGeneration>>,
}

impl MockTextGenerator {
    /// Creates a new mock generator with no scripted replies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a reply for the named template.
    pub fn script(&self, template: impl Into<String>, reply: impl Into<String>) {
        self.replies.lock().insert(template.into(), reply.into());
    }

    /// Makes calls for the named template fail.
    pub fn fail(&self, template: impl Into<String>) {
        self.failures.lock().insert(template.into());
    }

    /// Returns all recorded calls in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedGeneration> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(
        &self,
        template: &PromptTemplate,
        vars: &HashMap<String, String>,
    ) -> Result<String, ResearchError> {
        self.calls.lock().push(RecordedGeneration {
            template: template.name().to_string(),
            vars: vars.clone(),
        });

        if self.failures.lock().contains(template.name()) {
            return Err(ResearchError::generation(format!(
                "mock failure for {}",
                template.name()
            )));
        }

        Ok(self
            .replies
            .lock()
            .get(template.name())
            .cloned()
            .unwrap_or_else(|| format!("generated:{}", template.name())))
    }
}

/// A mock search provider that records queries.
#[derive(Debug)]
pub struct MockSearchProvider {
    fail: bool,
    hits_per_query: usize,
    queries: Mutex<Vec<String>>,
}

impl MockSearchProvider {
    /// Creates a provider that returns one canned hit per query.
    #[must_use]
    pub fn with_canned_hit() -> Self {
        Self {
            fail: false,
            hits_per_query: 1,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Creates a provider whose every search fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            hits_per_query: 0,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Returns all searched queries in order.
    #[must_use]
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    async fn search(
        &self,
        query: &str,
        _max_results: usize,
        _depth: SearchDepth,
    ) -> Result<SearchResponse, ResearchError> {
        self.queries.lock().push(query.to_string());

        if self.fail {
            return Err(ResearchError::search("mock search failure"));
        }

        let hits = (0..self.hits_per_query)
            .map(|i| SearchHit {
                title: format!("Result {} for {query}", i + 1),
                url: format!("https://example.com/{}", i + 1),
                content: format!("Snippet about {query}"),
                score: 0.9,
            })
            .collect();
        Ok(SearchResponse {
            query: query.to_string(),
            hits,
        })
    }
}

/// A stage that returns a preset record, recording how often it ran.
#[derive(Debug)]
pub struct ScriptedStage {
    name: String,
    output: Mutex<ResearchRecord>,
    call_count: Mutex<usize>,
}

impl ScriptedStage {
    /// Creates a stage that always returns `output`.
    #[must_use]
    pub fn new(name: impl Into<String>, output: ResearchRecord) -> Self {
        Self {
            name: name.into(),
            output: Mutex::new(output),
            call_count: Mutex::new(0),
        }
    }

    /// Replaces the record to return.
    pub fn set_output(&self, output: ResearchRecord) {
        *self.output.lock() = output;
    }

    /// Returns how many times the stage ran.
    #[must_use]
    pub fn call_count(&self) -> usize {
        *self.call_count.lock()
    }
}

#[async_trait]
impl Stage for ScriptedStage {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&self, _record: &ResearchRecord) -> ResearchRecord {
        *self.call_count.lock() += 1;
        self.output.lock().clone()
    }
}

/// A stage that panics when executed.
#[derive(Debug)]
pub struct PanickingStage {
    name: String,
}

impl PanickingStage {
    /// Creates a new panicking stage.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Stage for PanickingStage {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&self, _record: &ResearchRecord) -> ResearchRecord {
        panic!("{} stage panicked", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::prompts;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_mock_generator_default_reply() {
        let text = MockTextGenerator::new();
        let reply = text
            .generate(&prompts::DRAFTING, &HashMap::new())
            .await
            .unwrap();
        assert_eq!(reply, "generated:drafting");
        assert_eq!(text.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_mock_generator_scripted_failure() {
        let text = MockTextGenerator::new();
        text.fail("drafting");
        let err = text
            .generate(&prompts::DRAFTING, &HashMap::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("mock failure for drafting"));
    }

    #[tokio::test]
    async fn test_mock_search_records_queries() {
        let search = MockSearchProvider::with_canned_hit();
        let response = search.search("rust", 5, SearchDepth::Basic).await.unwrap();

        assert_eq!(response.hits.len(), 1);
        assert_eq!(search.queries(), vec!["rust"]);
    }

    #[tokio::test]
    async fn test_scripted_stage_counts_calls() {
        let record = ResearchRecord::new("t", SearchDepth::Basic, 1);
        let stage = ScriptedStage::new("scripted", record.clone());

        stage.execute(&record).await;
        stage.execute(&record).await;

        assert_eq!(stage.call_count(), 2);
    }
}

//! Research stage: query generation, search, and synthesis.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{prompts, Stage};
use crate::core::{ResearchOutput, ResearchRecord};
use crate::providers::{SearchProvider, SearchResponse, TextGenerator};

/// Gathers information on the topic in three sequential sub-steps:
/// generate queries, search each one, synthesize the combined results.
///
/// Query generation failure degrades to using the raw topic as the sole
/// query, and a failed search yields an empty hit list for that query; only
/// a failed synthesis call fails the stage, since without it there is no
/// usable research text at all.
#[derive(Debug)]
pub struct ResearchStage {
    text: Arc<dyn TextGenerator>,
    search: Arc<dyn SearchProvider>,
    max_results: usize,
}

impl ResearchStage {
    /// Creates a new research stage.
    #[must_use]
    pub fn new(
        text: Arc<dyn TextGenerator>,
        search: Arc<dyn SearchProvider>,
        max_results: usize,
    ) -> Self {
        Self {
            text,
            search,
            max_results,
        }
    }

    async fn generate_queries(&self, record: &ResearchRecord) -> Vec<String> {
        let vars = HashMap::from([
            ("research_topic".to_string(), record.topic.clone()),
            ("num_queries".to_string(), record.query_count.to_string()),
        ]);

        match self.text.generate(&prompts::QUERY_GENERATION, &vars).await {
            Ok(output) => {
                let queries = parse_queries(&output);
                if queries.is_empty() {
                    warn!("query generation returned no usable queries, using topic");
                    vec![record.topic.clone()]
                } else {
                    debug!(count = queries.len(), "generated search queries");
                    queries
                }
            }
            Err(err) => {
                warn!(%err, "query generation failed, using topic as sole query");
                vec![record.topic.clone()]
            }
        }
    }

    async fn run_searches(&self, record: &ResearchRecord, queries: &[String]) -> Vec<SearchResponse> {
        let mut searches = Vec::with_capacity(queries.len());
        for (i, query) in queries.iter().enumerate() {
            debug!(index = i + 1, total = queries.len(), query, "searching");
            match self.search.search(query, self.max_results, record.depth).await {
                Ok(response) => searches.push(response),
                Err(err) => {
                    warn!(query, %err, "search failed, recording empty results");
                    searches.push(SearchResponse::empty(query.clone()));
                }
            }
        }
        searches
    }
}

/// Splits query-generation output into clean queries: one per line, with
/// any leading `N.` numbering stripped.
fn parse_queries(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|line| {
            let line = line.trim();
            match line.split_once('.') {
                Some((prefix, rest)) if prefix.trim().chars().all(|c| c.is_ascii_digit())
                    && !prefix.trim().is_empty() =>
                {
                    rest.trim().to_string()
                }
                _ => line.to_string(),
            }
        })
        .filter(|q| !q.is_empty())
        .collect()
}

/// Formats all search responses into the markdown block layout the
/// synthesis prompt expects.
fn format_search_results(searches: &[SearchResponse]) -> String {
    let mut formatted = String::new();
    for response in searches {
        formatted.push_str(&format!("\n## RESULTS FOR: {}\n\n", response.query));

        if response.hits.is_empty() {
            formatted.push_str("No results found for this query.\n\n");
            continue;
        }

        for (j, hit) in response.hits.iter().enumerate() {
            formatted.push_str(&format!("### Result {}: {}\n", j + 1, hit.title));
            formatted.push_str(&format!("URL: {}\n", hit.url));
            formatted.push_str(&format!("Content: {}\n\n", hit.content));
        }
    }
    formatted
}

#[async_trait]
impl Stage for ResearchStage {
    fn name(&self) -> &str {
        "research"
    }

    async fn execute(&self, record: &ResearchRecord) -> ResearchRecord {
        info!(topic = %record.topic, "starting research");

        let queries = self.generate_queries(record).await;
        let searches = self.run_searches(record, &queries).await;
        let formatted = format_search_results(&searches);

        let vars = HashMap::from([
            ("research_topic".to_string(), record.topic.clone()),
            ("search_results".to_string(), formatted),
        ]);
        match self.text.generate(&prompts::SYNTHESIS, &vars).await {
            Ok(synthesis) => {
                info!("research completed");
                record.clone().with_research(ResearchOutput {
                    queries,
                    searches,
                    synthesis,
                })
            }
            Err(err) => record
                .clone()
                .with_error(format!("Research error: {err}")),
        }
    }
}

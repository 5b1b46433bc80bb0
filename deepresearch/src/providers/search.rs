//! Web-search protocol and the Tavily client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::errors::ResearchError;

/// How thorough a search should be.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    /// Fast, shallow search.
    #[default]
    Basic,
    /// Slower, more comprehensive search.
    Advanced,
}

impl SearchDepth {
    /// The wire representation used by search backends.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for SearchDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single ranked search hit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    /// The page title.
    pub title: String,
    /// The page URL.
    pub url: String,
    /// A content snippet.
    pub content: String,
    /// Relevance score assigned by the backend.
    #[serde(default)]
    pub score: f64,
}

/// The ranked results for one query.
///
/// An empty hit list is a valid non-error outcome.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    /// The query these hits answer.
    pub query: String,
    /// Hits in rank order.
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

impl SearchResponse {
    /// Creates an empty response for a query.
    #[must_use]
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            hits: Vec::new(),
        }
    }
}

/// Protocol for the web-search collaborator.
#[async_trait]
pub trait SearchProvider: Send + Sync + Debug {
    /// Runs one search query.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
        depth: SearchDepth,
    ) -> Result<SearchResponse, ResearchError>;
}

#[cfg(feature = "remote")]
pub use remote::TavilySearch;

#[cfg(feature = "remote")]
mod remote {
    use super::{SearchDepth, SearchHit, SearchProvider, SearchResponse};
    use crate::errors::ResearchError;
    use async_trait::async_trait;
    use serde::Deserialize;

    const TAVILY_ENDPOINT: &str = "https://api.tavily.com/search";

    /// Search client backed by the Tavily API.
    #[derive(Debug, Clone)]
    pub struct TavilySearch {
        client: reqwest::Client,
        api_key: String,
        endpoint: String,
    }

    #[derive(Debug, Deserialize)]
    struct TavilyResponse {
        #[serde(default)]
        results: Vec<TavilyHit>,
    }

    #[derive(Debug, Deserialize)]
    struct TavilyHit {
        #[serde(default)]
        title: String,
        #[serde(default)]
        url: String,
        #[serde(default)]
        content: String,
        #[serde(default)]
        score: f64,
    }

    impl TavilySearch {
        /// Creates a new client with the given API key.
        #[must_use]
        pub fn new(api_key: impl Into<String>) -> Self {
            Self {
                client: reqwest::Client::new(),
                api_key: api_key.into(),
                endpoint: TAVILY_ENDPOINT.to_string(),
            }
        }

        /// Overrides the API endpoint, for testing against a local server.
        #[must_use]
        pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
            self.endpoint = endpoint.into();
            self
        }
    }

    #[async_trait]
    impl SearchProvider for TavilySearch {
        async fn search(
            &self,
            query: &str,
            max_results: usize,
            depth: SearchDepth,
        ) -> Result<SearchResponse, ResearchError> {
            tracing::debug!(query, max_results, depth = %depth, "tavily search");

            let body = serde_json::json!({
                "api_key": self.api_key,
                "query": query,
                "max_results": max_results,
                "search_depth": depth.as_str(),
            });

            let response = self
                .client
                .post(&self.endpoint)
                .json(&body)
                .send()
                .await
                .map_err(ResearchError::search)?;

            if !response.status().is_success() {
                return Err(ResearchError::Search(format!(
                    "tavily returned status {}",
                    response.status()
                )));
            }

            let parsed: TavilyResponse =
                response.json().await.map_err(ResearchError::search)?;

            let hits = parsed
                .results
                .into_iter()
                .map(|hit| SearchHit {
                    title: hit.title,
                    url: hit.url,
                    content: hit.content,
                    score: hit.score,
                })
                .collect();

            Ok(SearchResponse {
                query: query.to_string(),
                hits,
            })
        }
    }
}

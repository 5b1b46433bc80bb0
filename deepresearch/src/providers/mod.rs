//! External collaborator interfaces and clients.
//!
//! This module provides:
//! - Prompt templates with variable substitution
//! - The text-generation protocol and its Gemini client
//! - The web-search protocol and its Tavily client
//!
//! The remote HTTP clients are gated behind the `remote` feature; the
//! protocols themselves are always available so the pipeline can run
//! against any implementation, including the mocks in [`crate::testing`].

mod prompt;
mod search;
mod text;

pub use prompt::PromptTemplate;
pub use search::{SearchDepth, SearchHit, SearchProvider, SearchResponse};
pub use text::TextGenerator;

#[cfg(feature = "remote")]
pub use search::TavilySearch;
#[cfg(feature = "remote")]
pub use text::GeminiGenerator;

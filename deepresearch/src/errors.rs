//! Error types for the deepresearch pipeline.
//!
//! Collaborator failures (text generation, search) are recoverable: stages
//! substitute degraded fallback values where one exists and only convert to a
//! terminal error when no usable text can be produced.

use thiserror::Error;

/// The main error type for deepresearch operations.
#[derive(Debug, Error)]
pub enum ResearchError {
    /// The text-generation collaborator failed.
    #[error("text generation failed: {0}")]
    TextGeneration(String),

    /// The search collaborator failed.
    #[error("search failed: {0}")]
    Search(String),

    /// A stage found a required upstream field unpopulated.
    #[error("missing upstream field: {0}")]
    MissingField(&'static str),

    /// Required configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The pipeline driver itself failed, outside any stage.
    #[error("workflow execution error: {0}")]
    Workflow(String),

    /// An HTTP transport error from a remote collaborator.
    #[cfg(feature = "remote")]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ResearchError {
    /// Creates a text-generation error from any displayable cause.
    #[must_use]
    pub fn generation(cause: impl std::fmt::Display) -> Self {
        Self::TextGeneration(cause.to_string())
    }

    /// Creates a search error from any displayable cause.
    #[must_use]
    pub fn search(cause: impl std::fmt::Display) -> Self {
        Self::Search(cause.to_string())
    }
}

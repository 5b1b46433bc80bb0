//! Text-generation protocol and the Gemini client.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;

use super::PromptTemplate;
use crate::errors::ResearchError;

/// Protocol for the text-generation collaborator.
///
/// Implementations render the template with the given variables and return
/// generated text. Failures (network, quota, model unavailable) surface as
/// [`ResearchError::TextGeneration`]; callers decide whether to degrade or
/// abort.
#[async_trait]
pub trait TextGenerator: Send + Sync + Debug {
    /// Generates text from a rendered prompt template.
    async fn generate(
        &self,
        template: &PromptTemplate,
        vars: &HashMap<String, String>,
    ) -> Result<String, ResearchError>;
}

#[cfg(feature = "remote")]
pub use remote::GeminiGenerator;

#[cfg(feature = "remote")]
mod remote {
    use super::{HashMap, PromptTemplate, ResearchError, TextGenerator};
    use async_trait::async_trait;
    use serde::Deserialize;

    const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
    const LIVENESS_PROMPT: &str = "Respond with 'ok' if you can read this message.";

    /// Text-generation client backed by the Google Generative Language API.
    ///
    /// Construction probes the primary model with a liveness prompt and
    /// walks the ranked fallback list until one answers, so a dead primary
    /// model fails the whole client only when every fallback is dead too.
    #[derive(Debug, Clone)]
    pub struct GeminiGenerator {
        client: reqwest::Client,
        api_key: String,
        model: String,
        endpoint: String,
    }

    #[derive(Debug, Deserialize)]
    struct GenerateResponse {
        #[serde(default)]
        candidates: Vec<Candidate>,
    }

    #[derive(Debug, Deserialize)]
    struct Candidate {
        content: Content,
    }

    #[derive(Debug, Deserialize)]
    struct Content {
        #[serde(default)]
        parts: Vec<Part>,
    }

    #[derive(Debug, Deserialize)]
    struct Part {
        #[serde(default)]
        text: String,
    }

    impl GeminiGenerator {
        /// Connects to the first live model among the primary and fallbacks.
        pub async fn connect(
            api_key: impl Into<String>,
            primary_model: &str,
            fallback_models: &[String],
        ) -> Result<Self, ResearchError> {
            let mut generator = Self {
                client: reqwest::Client::new(),
                api_key: api_key.into(),
                model: primary_model.to_string(),
                endpoint: GEMINI_ENDPOINT.to_string(),
            };

            let mut candidates = vec![primary_model.to_string()];
            candidates.extend(
                fallback_models
                    .iter()
                    .filter(|m| m.as_str() != primary_model)
                    .cloned(),
            );

            let mut last_error = None;
            for model in candidates {
                tracing::debug!(%model, "probing model liveness");
                generator.model = model.clone();
                match generator.generate_text(LIVENESS_PROMPT).await {
                    Ok(reply) if !reply.trim().is_empty() => {
                        tracing::info!(%model, "model initialized");
                        return Ok(generator);
                    }
                    Ok(_) => {
                        tracing::warn!(%model, "model answered liveness probe with empty text");
                        last_error =
                            Some(ResearchError::TextGeneration(format!(
                                "model {model} returned an empty liveness response"
                            )));
                    }
                    Err(err) => {
                        tracing::warn!(%model, %err, "model failed liveness probe");
                        last_error = Some(err);
                    }
                }
            }

            Err(last_error.unwrap_or_else(|| {
                ResearchError::TextGeneration("no candidate models configured".to_string())
            }))
        }

        /// The model the client settled on.
        #[must_use]
        pub fn model(&self) -> &str {
            &self.model
        }

        /// Overrides the API endpoint, for testing against a local server.
        #[must_use]
        pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
            self.endpoint = endpoint.into();
            self
        }

        async fn generate_text(&self, prompt: &str) -> Result<String, ResearchError> {
            let url = format!(
                "{}/{}:generateContent?key={}",
                self.endpoint, self.model, self.api_key
            );
            let body = serde_json::json!({
                "contents": [{"parts": [{"text": prompt}]}],
            });

            let response = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(ResearchError::generation)?;

            if !response.status().is_success() {
                return Err(ResearchError::TextGeneration(format!(
                    "model {} returned status {}",
                    self.model,
                    response.status()
                )));
            }

            let parsed: GenerateResponse =
                response.json().await.map_err(ResearchError::generation)?;

            let text = parsed
                .candidates
                .into_iter()
                .next()
                .map(|c| {
                    c.content
                        .parts
                        .into_iter()
                        .map(|p| p.text)
                        .collect::<String>()
                })
                .unwrap_or_default();

            if text.is_empty() {
                return Err(ResearchError::TextGeneration(format!(
                    "model {} returned no candidates",
                    self.model
                )));
            }

            Ok(text)
        }
    }

    #[async_trait]
    impl TextGenerator for GeminiGenerator {
        async fn generate(
            &self,
            template: &PromptTemplate,
            vars: &HashMap<String, String>,
        ) -> Result<String, ResearchError> {
            tracing::debug!(template = template.name(), model = %self.model, "generating");
            self.generate_text(&template.render(vars)).await
        }
    }
}

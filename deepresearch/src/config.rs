//! Runtime configuration loaded from the environment.

use serde::{Deserialize, Serialize};

use crate::errors::ResearchError;

/// Environment variable holding the text-generation API key.
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Environment variable holding the search API key.
pub const TAVILY_API_KEY_VAR: &str = "TAVILY_API_KEY";

/// Pipeline configuration.
///
/// [`Config::from_env`] reads the API keys from the process environment
/// (after `dotenvy` has had a chance to populate it from a `.env` file);
/// everything else starts from defaults and can be adjusted by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Key for the text-generation API.
    #[serde(skip_serializing, default)]
    pub gemini_api_key: Option<String>,
    /// Key for the search API.
    #[serde(skip_serializing, default)]
    pub tavily_api_key: Option<String>,
    /// Primary generation model.
    pub model: String,
    /// Models to try, in order, if the primary fails its liveness probe.
    pub fallback_models: Vec<String>,
    /// Maximum hits requested per search query.
    pub max_search_results: usize,
    /// Citation style applied by the citation stage.
    pub citation_style: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            tavily_api_key: None,
            model: "gemini-2.0-flash".to_string(),
            fallback_models: vec![
                "gemini-1.5-flash".to_string(),
                "gemini-2.0-flash".to_string(),
                "gemini-flash".to_string(),
            ],
            max_search_results: 10,
            citation_style: "APA".to_string(),
        }
    }
}

impl Config {
    /// Builds a configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: std::env::var(GEMINI_API_KEY_VAR).ok().filter(|k| !k.is_empty()),
            tavily_api_key: std::env::var(TAVILY_API_KEY_VAR).ok().filter(|k| !k.is_empty()),
            ..Self::default()
        }
    }

    /// Verifies that every required API key is present.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Config`] naming every missing variable.
    pub fn validate(&self) -> Result<(), ResearchError> {
        let mut missing = Vec::new();
        if self.gemini_api_key.is_none() {
            missing.push(GEMINI_API_KEY_VAR);
        }
        if self.tavily_api_key.is_none() {
            missing.push(TAVILY_API_KEY_VAR);
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ResearchError::Config(format!(
                "missing environment variables: {}",
                missing.join(", ")
            )))
        }
    }
}

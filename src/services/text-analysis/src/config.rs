//! Configuration module for the text analysis service
//!
//! The configuration is resolved once at startup (environment, optional
//! `.env`, then CLI overrides) and handed to constructors by value. Nothing
//! below `main` reads the environment.

use crate::error::{AnalysisError, Result};
use crate::providers::ProviderKind;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use text_insight_shared::ServerConfig;

/// Main configuration structure for the text analysis service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Active provider for the lifetime of the process
    pub provider: ProviderKind,

    /// Longest accepted input, in characters
    pub max_chars: usize,

    /// Per-request time bound enforced by the HTTP layer
    pub request_timeout_ms: u64,

    /// Model identifiers for the model-backed providers
    pub models: ModelConfig,

    /// Where the model-backed providers reach their models
    pub inference: InferenceConfig,

    /// Directory served as static files for unmatched routes
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub sentiment_model: String,
    pub summarizer_model: String,
    pub spacy_model: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceConfig {
    pub hf_api_url: String,
    #[serde(skip_serializing)]
    pub hf_api_token: Option<String>,
    pub spacy_api_url: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            provider: ProviderKind::Simple,
            max_chars: 10_000,
            request_timeout_ms: 8_000,
            models: ModelConfig::default(),
            inference: InferenceConfig::default(),
            static_dir: None,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            sentiment_model: "distilbert-base-uncased-finetuned-sst-2-english".to_string(),
            summarizer_model: "facebook/bart-large-cnn".to_string(),
            spacy_model: "en_core_web_sm".to_string(),
        }
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            hf_api_url: "https://api-inference.huggingface.co".to_string(),
            hf_api_token: None,
            spacy_api_url: "http://127.0.0.1:8080".to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let server = ServerConfig {
            host: lookup("HOST").unwrap_or(defaults.server.host),
            port: parse_or("PORT", &lookup, defaults.server.port)?,
        };

        let provider = lookup("PROVIDER")
            .map(|value| ProviderKind::from_env_value(&value))
            .unwrap_or(defaults.provider);

        let models = ModelConfig {
            sentiment_model: lookup("SENTIMENT_MODEL").unwrap_or(defaults.models.sentiment_model),
            summarizer_model: lookup("SUMMARIZER_MODEL")
                .unwrap_or(defaults.models.summarizer_model),
            spacy_model: lookup("SPACY_MODEL").unwrap_or(defaults.models.spacy_model),
        };

        let inference = InferenceConfig {
            hf_api_url: lookup("HF_API_URL").unwrap_or(defaults.inference.hf_api_url),
            hf_api_token: lookup("HF_API_TOKEN").filter(|token| !token.is_empty()),
            spacy_api_url: lookup("SPACY_API_URL").unwrap_or(defaults.inference.spacy_api_url),
        };

        Ok(Self {
            server,
            provider,
            max_chars: parse_or("MAX_CHARS", &lookup, defaults.max_chars)?,
            request_timeout_ms: parse_or(
                "REQUEST_TIMEOUT_MS",
                &lookup,
                defaults.request_timeout_ms,
            )?,
            models,
            inference,
            static_dir: lookup("STATIC_DIR")
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(AnalysisError::config("Host cannot be empty"));
        }

        if self.server.port == 0 {
            return Err(AnalysisError::config(format!(
                "Invalid port: {}",
                self.server.port
            )));
        }

        if self.max_chars == 0 {
            return Err(AnalysisError::config("MAX_CHARS must be greater than 0"));
        }

        if self.request_timeout_ms == 0 {
            return Err(AnalysisError::config(
                "REQUEST_TIMEOUT_MS must be greater than 0",
            ));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AnalysisError::config(format!("Invalid {}: {}", key, e))),
        None => Ok(default),
    }
}

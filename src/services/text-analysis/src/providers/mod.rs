//! Analysis providers
//!
//! Every backend implements the same three capabilities:
//! - sentiment polarity
//! - keyphrase extraction
//! - one-sentence summary
//!
//! Exactly one provider is built at startup and shared for the life of the
//! process. Callers validate input before invoking a provider; a provider only
//! fails with `ProviderUnavailable` when its backing model cannot be reached.

use crate::config::AnalysisConfig;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use text_insight_shared::SentimentResult;
use tracing::info;

pub mod huggingface;
pub mod simple;
pub mod syntax;

pub use huggingface::HuggingFaceProvider;
pub use simple::SimpleProvider;
pub use syntax::SyntaxProvider;

/// Upper bound on keyphrases returned by any provider
pub const MAX_KEYPHRASES: usize = 10;

/// Upper bound, in characters, on a returned summary
pub const MAX_SUMMARY_CHARS: usize = 280;

/// Model identifiers reported in response metadata, keyed by role
pub type ModelMap = BTreeMap<String, Option<String>>;

/// Trait that all analysis providers must implement
///
/// `Ok(None)` means the method had nothing to say about the text (for
/// example no sentence could be found); it is not a failure.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Stable provider name, reported in health checks and response metadata
    fn name(&self) -> &str;

    /// Models backing each capability
    fn models(&self) -> ModelMap {
        ModelMap::new()
    }

    async fn analyze_sentiment(&self, text: &str) -> Result<Option<SentimentResult>>;

    async fn extract_keyphrases(&self, text: &str) -> Result<Option<Vec<String>>>;

    async fn summarize(&self, text: &str) -> Result<Option<String>>;
}

/// Provider selector accepted in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Simple,
    Hf,
    Spacy,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Simple => "simple",
            ProviderKind::Hf => "hf",
            ProviderKind::Spacy => "spacy",
        }
    }

    /// Lenient parse used for environment input: unknown names select `simple`.
    pub fn from_env_value(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(ProviderKind::Simple),
            "hf" => Ok(ProviderKind::Hf),
            "spacy" => Ok(ProviderKind::Spacy),
            other => Err(format!("unknown provider: {}", other)),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the provider selected by configuration.
///
/// Model-backed providers do not contact their backends here; that happens
/// lazily on first use.
pub fn build_provider(config: &AnalysisConfig) -> Arc<dyn AnalysisProvider> {
    info!("Building analysis provider: {}", config.provider);

    match config.provider {
        ProviderKind::Hf => Arc::new(HuggingFaceProvider::new(
            &config.models,
            &config.inference,
            config.request_timeout(),
        )),
        ProviderKind::Spacy => Arc::new(SyntaxProvider::new(
            &config.models,
            &config.inference,
            config.request_timeout(),
        )),
        ProviderKind::Simple => Arc::new(SimpleProvider::new()),
    }
}

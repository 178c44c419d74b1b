//! Syntactic-model provider
//!
//! Keyphrases come from the noun chunks and named entities of a parsed
//! document, summaries from its first parsed sentence. Sentiment falls back
//! to the lexicon scorer since a syntactic model has no polarity head.

use super::{AnalysisProvider, ModelMap, SimpleProvider, MAX_KEYPHRASES, MAX_SUMMARY_CHARS};
use crate::config::{InferenceConfig, ModelConfig};
use crate::error::{AnalysisError, Result};
use crate::text::{dedup_preserving_order, truncate_chars};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use text_insight_shared::SentimentResult;
use tokio::sync::OnceCell;
use tracing::{debug, info};

const PROVIDER_NAME: &str = "spacy";

pub struct SyntaxProvider {
    api_url: String,
    model: String,
    timeout: Duration,
    client: OnceCell<Client>,
    sentiment: SimpleProvider,
}

#[derive(Debug, Serialize)]
struct ParseRequest<'a> {
    model: &'a str,
    text: &'a str,
}

/// Parsed document as returned by the syntax service
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ParsedDocument {
    pub sents: Vec<String>,
    pub noun_chunks: Vec<String>,
    pub ents: Vec<String>,
}

impl ParsedDocument {
    /// Noun chunks, then entities, first occurrence wins.
    pub fn keyphrases(&self) -> Vec<String> {
        let chunks = dedup_preserving_order(trimmed(&self.noun_chunks));
        let entities = dedup_preserving_order(trimmed(&self.ents));

        let mut merged = dedup_preserving_order(chunks.into_iter().chain(entities));
        merged.truncate(MAX_KEYPHRASES);
        merged
    }

    pub fn lead_sentence(&self) -> Option<String> {
        self.sents
            .iter()
            .map(|sentence| sentence.trim())
            .next()
            .map(|sentence| truncate_chars(sentence, MAX_SUMMARY_CHARS))
    }
}

fn trimmed(items: &[String]) -> impl Iterator<Item = String> + '_ {
    items
        .iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
}

impl SyntaxProvider {
    pub fn new(models: &ModelConfig, inference: &InferenceConfig, timeout: Duration) -> Self {
        Self {
            api_url: inference.spacy_api_url.trim_end_matches('/').to_string(),
            model: models.spacy_model.clone(),
            timeout,
            client: OnceCell::new(),
            sentiment: SimpleProvider::new(),
        }
    }

    async fn client(&self) -> Result<&Client> {
        self.client.get_or_try_init(|| self.load_model()).await
    }

    /// Build a client and confirm the model is loaded on the syntax service.
    async fn load_model(&self) -> Result<Client> {
        info!("Loading syntax model: {}", self.model);

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| unavailable(format!("Failed to create HTTP client: {}", e)))?;

        let response = client
            .get(format!("{}/models/{}", self.api_url, self.model))
            .send()
            .await
            .map_err(|e| unavailable(format!("Syntax service unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(unavailable(format!(
                "Syntax model {} not available: HTTP {}",
                self.model,
                response.status()
            )));
        }

        info!("Syntax model ready: {}", self.model);
        Ok(client)
    }

    async fn parse(&self, text: &str) -> Result<ParsedDocument> {
        let client = self.client().await?;
        debug!("Parsing {} characters with {}", text.len(), self.model);

        let response = client
            .post(format!("{}/parse", self.api_url))
            .json(&ParseRequest {
                model: &self.model,
                text,
            })
            .send()
            .await
            .map_err(|e| unavailable(format!("Parse request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(unavailable(format!(
                "Parse failed with HTTP {}",
                response.status()
            )));
        }

        response
            .json::<ParsedDocument>()
            .await
            .map_err(|e| unavailable(format!("Unexpected parse response: {}", e)))
    }
}

fn unavailable(message: String) -> AnalysisError {
    AnalysisError::provider_unavailable(PROVIDER_NAME, message)
}

#[async_trait]
impl AnalysisProvider for SyntaxProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn models(&self) -> ModelMap {
        ModelMap::from([
            ("sentiment".to_string(), None),
            ("syntax".to_string(), Some(self.model.clone())),
        ])
    }

    async fn analyze_sentiment(&self, text: &str) -> Result<Option<SentimentResult>> {
        self.sentiment.analyze_sentiment(text).await
    }

    async fn extract_keyphrases(&self, text: &str) -> Result<Option<Vec<String>>> {
        let document = self.parse(text).await?;
        Ok(Some(document.keyphrases()))
    }

    async fn summarize(&self, text: &str) -> Result<Option<String>> {
        let document = self.parse(text).await?;
        Ok(document.lead_sentence())
    }
}

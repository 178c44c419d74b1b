//! Hugging Face inference provider
//!
//! Sentiment and summaries come from hosted transformer models; keyphrases
//! reuse the heuristic extractor. Each model handle is created on first use
//! and cached for the life of the process.

use super::{AnalysisProvider, ModelMap, SimpleProvider};
use crate::config::{InferenceConfig, ModelConfig};
use crate::error::{AnalysisError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use text_insight_shared::{SentimentLabel, SentimentResult};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

const PROVIDER_NAME: &str = "hf";

/// Generation bounds passed to the summarizer
const SUMMARY_MAX_LENGTH: u32 = 200;
const SUMMARY_MIN_LENGTH: u32 = 30;

pub struct HuggingFaceProvider {
    api_url: String,
    api_token: Option<String>,
    sentiment_model: String,
    summarizer_model: String,
    timeout: Duration,
    sentiment: OnceCell<ModelHandle>,
    summarizer: OnceCell<ModelHandle>,
    keyphrases: SimpleProvider,
}

/// A verified, ready-to-call model endpoint
#[derive(Clone)]
struct ModelHandle {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Clone, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

// Text classification answers either `[[{..}, ..]]` or `[{..}, ..]`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassificationOutput {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl ClassificationOutput {
    fn into_best(self) -> Option<LabelScore> {
        let candidates = match self {
            ClassificationOutput::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
            ClassificationOutput::Flat(items) => items,
        };
        candidates
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

#[derive(Debug, Deserialize)]
struct SummaryOutput {
    summary_text: Option<String>,
}

#[derive(Debug, Serialize)]
struct SummaryParameters {
    max_length: u32,
    min_length: u32,
    do_sample: bool,
}

impl HuggingFaceProvider {
    pub fn new(models: &ModelConfig, inference: &InferenceConfig, timeout: Duration) -> Self {
        Self {
            api_url: inference.hf_api_url.trim_end_matches('/').to_string(),
            api_token: inference.hf_api_token.clone(),
            sentiment_model: models.sentiment_model.clone(),
            summarizer_model: models.summarizer_model.clone(),
            timeout,
            sentiment: OnceCell::new(),
            summarizer: OnceCell::new(),
            keyphrases: SimpleProvider::new(),
        }
    }

    async fn sentiment_handle(&self) -> Result<&ModelHandle> {
        self.sentiment
            .get_or_try_init(|| self.load_model(&self.sentiment_model))
            .await
    }

    async fn summarizer_handle(&self) -> Result<&ModelHandle> {
        self.summarizer
            .get_or_try_init(|| self.load_model(&self.summarizer_model))
            .await
    }

    /// Build a client and confirm the model endpoint answers.
    async fn load_model(&self, model: &str) -> Result<ModelHandle> {
        info!("Loading Hugging Face model: {}", model);

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| unavailable(format!("Failed to create HTTP client: {}", e)))?;

        let endpoint = format!("{}/models/{}", self.api_url, model);
        let response = self
            .authorize(client.get(&endpoint))
            .send()
            .await
            .map_err(|e| unavailable(format!("Model {} unreachable: {}", model, e)))?;

        if !response.status().is_success() {
            warn!(
                "Model {} failed to load with status {}",
                model,
                response.status()
            );
            return Err(unavailable(format!(
                "Model {} not available: HTTP {}",
                model,
                response.status()
            )));
        }

        info!("Hugging Face model ready: {}", model);
        Ok(ModelHandle { client, endpoint })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn infer<T>(&self, handle: &ModelHandle, payload: serde_json::Value) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        debug!("Running inference against {}", handle.endpoint);

        let response = self
            .authorize(handle.client.post(&handle.endpoint))
            .json(&payload)
            .send()
            .await
            .map_err(|e| unavailable(format!("Inference request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(unavailable(format!("Inference error {}: {}", status, body)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| unavailable(format!("Unexpected inference response: {}", e)))
    }
}

fn unavailable(message: String) -> AnalysisError {
    AnalysisError::provider_unavailable(PROVIDER_NAME, message)
}

fn map_label(label: &str) -> SentimentLabel {
    let label = label.to_lowercase();
    if label.starts_with("pos") {
        SentimentLabel::Positive
    } else if label.starts_with("neg") {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

#[async_trait]
impl AnalysisProvider for HuggingFaceProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn models(&self) -> ModelMap {
        ModelMap::from([
            (
                "sentiment".to_string(),
                Some(self.sentiment_model.clone()),
            ),
            (
                "summarizer".to_string(),
                Some(self.summarizer_model.clone()),
            ),
            ("keyphrases".to_string(), None),
        ])
    }

    async fn analyze_sentiment(&self, text: &str) -> Result<Option<SentimentResult>> {
        let handle = self.sentiment_handle().await?;
        let output: ClassificationOutput = self.infer(handle, json!({ "inputs": text })).await?;

        let best = output
            .into_best()
            .ok_or_else(|| unavailable("Sentiment model returned no labels".to_string()))?;

        Ok(Some(SentimentResult::with_label(
            map_label(&best.label),
            best.score,
        )))
    }

    async fn extract_keyphrases(&self, text: &str) -> Result<Option<Vec<String>>> {
        self.keyphrases.extract_keyphrases(text).await
    }

    async fn summarize(&self, text: &str) -> Result<Option<String>> {
        let handle = self.summarizer_handle().await?;
        let parameters = SummaryParameters {
            max_length: SUMMARY_MAX_LENGTH,
            min_length: SUMMARY_MIN_LENGTH,
            do_sample: false,
        };
        let output: Vec<SummaryOutput> = self
            .infer(handle, json!({ "inputs": text, "parameters": parameters }))
            .await?;

        Ok(output.into_iter().next().and_then(|item| item.summary_text))
    }
}

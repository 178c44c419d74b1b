//! Analysis orchestration
//!
//! Validates a request, fans the enabled capabilities out to the active
//! provider concurrently and assembles a single response. A failure in any
//! dispatched capability fails the whole request; partial results are
//! discarded.

use crate::error::{AnalysisError, Result};
use crate::providers::AnalysisProvider;
use std::sync::Arc;
use std::time::Instant;
use text_insight_shared::{AnalysisOptions, MetaInfo, TextAnalysisResponse};
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct TextAnalysisService {
    provider: Arc<dyn AnalysisProvider>,
    max_chars: usize,
}

impl TextAnalysisService {
    pub fn new(provider: Arc<dyn AnalysisProvider>, max_chars: usize) -> Self {
        Self {
            provider,
            max_chars,
        }
    }

    pub fn provider(&self) -> &Arc<dyn AnalysisProvider> {
        &self.provider
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Reject empty text and text longer than `max_chars` characters.
    pub fn validate(&self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Err(AnalysisError::invalid_input("text must not be empty"));
        }

        let length = text.chars().count();
        if length > self.max_chars {
            return Err(AnalysisError::invalid_input(format!(
                "text length {} exceeds maximum of {}",
                length, self.max_chars
            )));
        }

        Ok(())
    }

    pub async fn analyze(
        &self,
        text: &str,
        options: AnalysisOptions,
    ) -> Result<TextAnalysisResponse> {
        self.validate(text)?;

        let start = Instant::now();
        debug!(
            "Dispatching to {}: sentiment={}, keyphrases={}, summary={}",
            self.provider.name(),
            options.sentiment,
            options.keyphrases,
            options.summary
        );

        let provider = self.provider.as_ref();
        let sentiment = async {
            if options.sentiment {
                provider.analyze_sentiment(text).await
            } else {
                Ok(None)
            }
        };
        let keyphrases = async {
            if options.keyphrases {
                provider.extract_keyphrases(text).await
            } else {
                Ok(None)
            }
        };
        let summary = async {
            if options.summary {
                provider.summarize(text).await
            } else {
                Ok(None)
            }
        };

        let (sentiment, keyphrases, summary) = tokio::try_join!(sentiment, keyphrases, summary)
            .map_err(|e| {
                warn!("Provider {} failed: {}", self.provider.name(), e);
                AnalysisError::inference(e)
            })?;

        let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            "Analyzed {} characters with {} in {}ms",
            text.chars().count(),
            self.provider.name(),
            elapsed_ms
        );

        Ok(TextAnalysisResponse {
            sentiment,
            keyphrases,
            summary,
            meta: MetaInfo {
                provider: self.provider.name().to_string(),
                models: self.provider.models(),
                elapsed_ms,
            },
        })
    }
}

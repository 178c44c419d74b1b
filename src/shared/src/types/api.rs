//! API request and response type definitions
//!
//! This module contains the HTTP API models exchanged between clients and the
//! text analysis service.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::core::SentimentResult;

// =============================================================================
// Analysis API Types
// =============================================================================

/// Which analyses to run; every flag defaults to `true`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    pub sentiment: bool,
    pub keyphrases: bool,
    pub summary: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            sentiment: true,
            keyphrases: true,
            summary: true,
        }
    }
}

impl AnalysisOptions {
    pub fn none() -> Self {
        Self {
            sentiment: false,
            keyphrases: false,
            summary: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextAnalysisRequest {
    pub text: String,
    /// Accepted for compatibility; analyses are English-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<AnalysisOptions>,
}

impl TextAnalysisRequest {
    pub fn options_or_default(&self) -> AnalysisOptions {
        self.options.unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaInfo {
    pub provider: String,
    pub models: BTreeMap<String, Option<String>>,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysisResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyphrases: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub meta: MetaInfo,
}

// =============================================================================
// Health and Error API Types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub provider: String,
}

impl HealthResponse {
    pub fn ok(provider: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            provider: provider.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Envelope for every error returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

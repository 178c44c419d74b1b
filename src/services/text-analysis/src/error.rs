//! Error handling for the text analysis service
//!
//! Only two failure classes are visible to clients: `validation_error` for
//! input the caller can fix, and `inference_error` for everything else.
//! Internal detail is logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use text_insight_shared::ErrorResponse;
use thiserror::Error;

/// Result type alias for text analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Empty or over-length text, or a malformed request body
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// A provider's backing model could not be initialised or run
    #[error("Provider unavailable: {provider}: {message}")]
    ProviderUnavailable { provider: String, message: String },

    /// A dispatched provider call failed while serving a request
    #[error("Inference unavailable: {source}")]
    InferenceUnavailable {
        #[source]
        source: Box<AnalysisError>,
    },

    /// The requested analyses did not finish within the request time bound
    #[error("Analysis timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AnalysisError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        AnalysisError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn provider_unavailable(provider: impl Into<String>, message: impl Into<String>) -> Self {
        AnalysisError::ProviderUnavailable {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        AnalysisError::Config {
            message: message.into(),
        }
    }

    pub fn timeout(timeout: std::time::Duration) -> Self {
        AnalysisError::Timeout {
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AnalysisError::Internal {
            message: message.into(),
        }
    }

    /// Wrap a provider failure raised during request dispatch.
    pub fn inference(source: AnalysisError) -> Self {
        match source {
            AnalysisError::InferenceUnavailable { .. } => source,
            other => AnalysisError::InferenceUnavailable {
                source: Box::new(other),
            },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AnalysisError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            AnalysisError::ProviderUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AnalysisError::InferenceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AnalysisError::Timeout { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AnalysisError::Config { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AnalysisError::Internal { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AnalysisError::InvalidInput { .. } => "validation_error",
            _ => "inference_error",
        }
    }

    /// Message safe to show to clients.
    pub fn public_message(&self) -> &'static str {
        match self {
            AnalysisError::InvalidInput { .. } => "invalid_request",
            _ => "service_unavailable",
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AnalysisError::InvalidInput { .. } => {
                tracing::info!("Client error: {}", self);
            }
            AnalysisError::ProviderUnavailable { .. }
            | AnalysisError::InferenceUnavailable { .. }
            | AnalysisError::Timeout { .. } => {
                tracing::warn!("Inference error: {}", self);
            }
            AnalysisError::Config { .. } | AnalysisError::Internal { .. } => {
                tracing::error!("Server error: {}", self);
            }
        }

        let body = ErrorResponse::new(self.error_code(), self.public_message());
        (status, Json(body)).into_response()
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        AnalysisError::internal(format!("HTTP request failed: {}", err))
    }
}

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        AnalysisError::internal(format!("I/O error: {}", err))
    }
}

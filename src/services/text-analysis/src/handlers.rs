//! Request handlers for the text analysis API

use crate::error::{AnalysisError, Result};
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use text_insight_shared::{HealthResponse, TextAnalysisRequest, TextAnalysisResponse};
use tracing::{info, warn};

/// Run the requested analyses over the submitted text
pub async fn analyze(
    State(state): State<AppState>,
    payload: std::result::Result<Json<TextAnalysisRequest>, JsonRejection>,
) -> Result<Json<TextAnalysisResponse>> {
    let Json(request) =
        payload.map_err(|rejection| AnalysisError::invalid_input(rejection.body_text()))?;
    let options = request.options_or_default();

    info!(
        "Analyze request: {} characters, sentiment={}, keyphrases={}, summary={}",
        request.text.chars().count(),
        options.sentiment,
        options.keyphrases,
        options.summary
    );

    let timeout = state.config.request_timeout();
    let response = tokio::time::timeout(timeout, state.service.analyze(&request.text, options))
        .await
        .map_err(|_| {
            warn!(
                "Analysis with {} exceeded {}ms",
                state.service.provider_name(),
                timeout.as_millis()
            );
            AnalysisError::timeout(timeout)
        })??;
    Ok(Json(response))
}

/// Liveness check reporting the active provider
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.service.provider_name()))
}

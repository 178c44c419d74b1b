//! HTTP routes for the text analysis service

use crate::handlers;
use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

/// Build the main router for the text analysis service
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/analyze", post(handlers::analyze))
        .route("/health", get(handlers::health));

    // Static assets answer anything the API does not
    if let Some(dir) = state.config.static_dir.clone() {
        info!("Serving static files from {}", dir.display());
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .into_inner(),
        )
        .with_state(state)
}

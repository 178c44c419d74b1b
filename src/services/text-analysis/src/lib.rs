//! # Text Analysis Service
//!
//! Accepts a body of text and returns up to three independent analyses:
//! - sentiment polarity (positive / negative / neutral with a score)
//! - keyphrases (at most ten, phrases before single words)
//! - a one-sentence summary (at most 280 characters)
//!
//! The analyses are computed by one of several interchangeable providers,
//! selected once at startup:
//! - `simple`: lexicon and frequency heuristics, no external model
//! - `hf`: hosted transformer models for sentiment and summaries
//! - `spacy`: a syntactic model for noun-chunk keyphrases and sentences
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use text_analysis_service::{providers::SimpleProvider, TextAnalysisService};
//! use text_insight_shared::AnalysisOptions;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = TextAnalysisService::new(Arc::new(SimpleProvider::new()), 10_000);
//!     let response = service
//!         .analyze("I love this! It is great and amazing.", AnalysisOptions::default())
//!         .await?;
//!     println!("{:?}", response.sentiment);
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod handlers;
pub mod providers;
pub mod routes;
pub mod service;
pub mod text;

pub use config::AnalysisConfig;
pub use error::{AnalysisError, Result};
pub use providers::{build_provider, AnalysisProvider, ProviderKind};
pub use routes::create_router;
pub use service::TextAnalysisService;

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AnalysisConfig>,
    pub service: TextAnalysisService,
}

impl AppState {
    /// Build state around an already-selected provider.
    pub fn new(config: AnalysisConfig, provider: Arc<dyn AnalysisProvider>) -> Self {
        let service = TextAnalysisService::new(provider, config.max_chars);
        Self {
            config: Arc::new(config),
            service,
        }
    }

    /// Build state with the provider named in the configuration.
    pub fn from_config(config: AnalysisConfig) -> Self {
        let provider = build_provider(&config);
        Self::new(config, provider)
    }
}

/// Router for the given configuration
pub fn build_app(config: AnalysisConfig) -> axum::Router {
    create_router(AppState::from_config(config))
}

//! Shared type definitions for the Text Insight services
//!
//! `core` holds the analysis domain values, `api` the HTTP request and
//! response bodies built from them.

pub mod api;
pub mod core;

pub use core::{SentimentLabel, SentimentResult, NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD};

pub use api::{
    AnalysisOptions, ErrorBody, ErrorResponse, HealthResponse, MetaInfo, TextAnalysisRequest,
    TextAnalysisResponse,
};

//! Core analysis value types
//!
//! These are the values every provider produces, independent of how they are
//! carried over the wire.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scores strictly above this are positive
pub const POSITIVE_THRESHOLD: f64 = 0.6;

/// Scores strictly below this are negative
pub const NEGATIVE_THRESHOLD: f64 = 0.4;

// ============================================================================
// SENTIMENT
// ============================================================================

/// Polarity of a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Classify a polarity score in `[0, 1]`.
    pub fn from_score(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if score < NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sentiment label together with its score, rounded to 4 decimals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    pub score: f64,
}

impl SentimentResult {
    /// Result for text that carries no sentiment signal at all.
    pub fn no_signal() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            score: 0.5,
        }
    }

    /// Build a result whose label is derived from the score thresholds.
    pub fn from_score(score: f64) -> Self {
        let score = round_score(score);
        Self {
            label: SentimentLabel::from_score(score),
            score,
        }
    }

    /// Build a result with a label chosen elsewhere (e.g. by a model).
    pub fn with_label(label: SentimentLabel, score: f64) -> Self {
        Self {
            label,
            score: round_score(score),
        }
    }
}

// Exact ties go to the even neighbour, so 1/32 becomes 0.0312.
fn round_score(score: f64) -> f64 {
    (score.clamp(0.0, 1.0) * 10_000.0).round_ties_even() / 10_000.0
}

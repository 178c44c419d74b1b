//! Heuristic provider
//!
//! Dependency-free analysis built from a fixed lexicon, word frequencies and
//! the lead sentence. Results are deterministic and easy to inspect; they make
//! no claim to match model-backed output.

use super::{AnalysisProvider, MAX_KEYPHRASES, MAX_SUMMARY_CHARS};
use crate::error::Result;
use crate::text::{dedup_preserving_order, normalize, split_sentences, truncate_chars};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use text_insight_shared::SentimentResult;

const POSITIVE_WORDS: [&str; 10] = [
    "good",
    "great",
    "excellent",
    "love",
    "like",
    "awesome",
    "amazing",
    "happy",
    "satisfied",
    "fantastic",
];

const NEGATIVE_WORDS: [&str; 10] = [
    "bad", "terrible", "awful", "hate", "dislike", "sad", "angry", "slow", "bug", "issue",
];

const STOP_WORDS: [&str; 19] = [
    "the", "is", "a", "an", "and", "or", "of", "to", "in", "on", "for", "with", "that", "this",
    "it", "as", "at", "by", "from",
];

/// Single words shorter than this never become keyphrases
const MIN_KEYWORD_CHARS: usize = 3;

static POSITIVE: Lazy<HashSet<&'static str>> = Lazy::new(|| POSITIVE_WORDS.into_iter().collect());
static NEGATIVE: Lazy<HashSet<&'static str>> = Lazy::new(|| NEGATIVE_WORDS.into_iter().collect());
static STOP: Lazy<HashSet<&'static str>> = Lazy::new(|| STOP_WORDS.into_iter().collect());

// Letter runs with internal apostrophes, e.g. "don't".
static SENTIMENT_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z']+").expect("valid regex"));

// At least two characters, starting with a letter; hyphens and apostrophes allowed.
static CONTENT_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z][a-zA-Z\-']+").expect("valid regex"));

#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleProvider;

impl SimpleProvider {
    pub fn new() -> Self {
        Self
    }

    /// Lexicon score: share of positive hits among all lexicon hits.
    pub fn sentiment(&self, text: &str) -> SentimentResult {
        let lowered = normalize(text).to_lowercase();
        let (positive, negative) = SENTIMENT_TOKEN.find_iter(&lowered).fold(
            (0usize, 0usize),
            |(positive, negative), token| {
                let word = token.as_str();
                (
                    positive + usize::from(POSITIVE.contains(word)),
                    negative + usize::from(NEGATIVE.contains(word)),
                )
            },
        );

        if positive + negative == 0 {
            return SentimentResult::no_signal();
        }

        SentimentResult::from_score(positive as f64 / (positive + negative) as f64)
    }

    /// Leading bigram of each sentence, then the most frequent content words.
    pub fn keyphrases(&self, text: &str) -> Vec<String> {
        let phrases = split_sentences(text)
            .into_iter()
            .filter_map(|sentence| leading_bigram(&sentence));

        let mut merged = dedup_preserving_order(phrases.chain(top_keywords(text)));
        merged.truncate(MAX_KEYPHRASES);
        merged
    }

    /// Normalised first sentence, capped at 280 characters.
    pub fn lead_sentence(&self, text: &str) -> Option<String> {
        split_sentences(text)
            .first()
            .map(|sentence| truncate_chars(&normalize(sentence), MAX_SUMMARY_CHARS))
    }
}

fn content_tokens(text: &str) -> Vec<String> {
    let lowered = normalize(text).to_lowercase();
    CONTENT_TOKEN
        .find_iter(&lowered)
        .map(|token| token.as_str())
        .filter(|word| !STOP.contains(word))
        .map(str::to_string)
        .collect()
}

fn top_keywords(text: &str) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for word in content_tokens(text) {
        if word.chars().count() >= MIN_KEYWORD_CHARS {
            *counts.entry(word).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|(a_word, a_count), (b_word, b_count)| {
        b_count.cmp(a_count).then_with(|| a_word.cmp(b_word))
    });

    ranked
        .into_iter()
        .take(MAX_KEYPHRASES)
        .map(|(word, _)| word)
        .collect()
}

// Only the first two content words of a sentence, not a sliding window.
fn leading_bigram(sentence: &str) -> Option<String> {
    let words = content_tokens(sentence);
    match words.as_slice() {
        [first, second, ..] => Some(format!("{} {}", first, second)),
        _ => None,
    }
}

#[async_trait]
impl AnalysisProvider for SimpleProvider {
    fn name(&self) -> &str {
        "simple"
    }

    async fn analyze_sentiment(&self, text: &str) -> Result<Option<SentimentResult>> {
        Ok(Some(self.sentiment(text)))
    }

    async fn extract_keyphrases(&self, text: &str) -> Result<Option<Vec<String>>> {
        Ok(Some(self.keyphrases(text)))
    }

    async fn summarize(&self, text: &str) -> Result<Option<String>> {
        Ok(self.lead_sentence(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use text_insight_shared::SentimentLabel;

    #[test]
    fn test_lexicons_are_disjoint() {
        assert!(POSITIVE.is_disjoint(&NEGATIVE));
        assert_eq!(POSITIVE.len(), 10);
        assert_eq!(NEGATIVE.len(), 10);
    }

    #[test]
    fn test_positive_sentiment() {
        let result = SimpleProvider::new().sentiment("I love this! It is great and amazing.");
        assert_eq!(result.label, SentimentLabel::Positive);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_negative_sentiment() {
        let result =
            SimpleProvider::new().sentiment("This is bad and terrible, a real issue and bug.");
        assert_eq!(result.label, SentimentLabel::Negative);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_mixed_sentiment_is_neutral() {
        let result = SimpleProvider::new().sentiment("Good service but slow delivery.");
        assert_eq!(result.label, SentimentLabel::Neutral);
        assert_eq!(result.score, 0.5);
    }

    #[test]
    fn test_mixed_sentiment_rounds_to_four_places() {
        let result = SimpleProvider::new().sentiment("good great bad");
        assert_eq!(result.score, 0.6667);
        assert_eq!(result.label, SentimentLabel::Positive);
    }

    #[test]
    fn test_sentiment_score_ties_round_to_even() {
        let text = format!("good {}", "bad ".repeat(31));
        let result = SimpleProvider::new().sentiment(&text);
        assert_eq!(result.score, 0.0312);
        assert_eq!(result.label, SentimentLabel::Negative);
    }

    #[test]
    fn test_keyphrases_one_bigram_per_sentence() {
        let phrases = SimpleProvider::new()
            .keyphrases("Rust compilers are fast. Borrow checker rules help. Tests pass.");
        assert_eq!(
            &phrases[..3],
            &["rust compilers", "borrow checker", "tests pass"]
        );
    }

    #[test]
    fn test_sentiment_is_case_insensitive() {
        let result = SimpleProvider::new().sentiment("AWESOME. Fantastic!");
        assert_eq!(result.label, SentimentLabel::Positive);
    }

    #[test]
    fn test_no_signal_sentiment() {
        let result = SimpleProvider::new().sentiment("The meeting is at noon.");
        assert_eq!(result, SentimentResult::no_signal());
    }

    #[test]
    fn test_sentiment_ignores_negation() {
        // bag of words: "not" carries no weight
        let result = SimpleProvider::new().sentiment("not good");
        assert_eq!(result.label, SentimentLabel::Positive);
    }

    #[test]
    fn test_keyphrases_phrases_first_then_words() {
        let phrases = SimpleProvider::new().keyphrases("I love this! It is great and amazing.");
        assert_eq!(phrases, vec!["great amazing", "amazing", "great", "love"]);
    }

    #[test]
    fn test_keyphrases_rank_by_frequency_then_alphabet() {
        let phrases = SimpleProvider::new().keyphrases("rust rust tokio tokio serde axum");
        assert_eq!(
            phrases,
            vec!["rust rust", "rust", "tokio", "axum", "serde"]
        );
    }

    #[test]
    fn test_keyphrases_drop_stop_words_and_short_tokens() {
        let phrases = SimpleProvider::new().keyphrases("It is on the go.");
        assert!(phrases.is_empty());
    }

    #[test]
    fn test_keyphrases_keep_hyphenated_words() {
        let phrases = SimpleProvider::new().keyphrases("State-of-the-art parsing.");
        assert_eq!(
            phrases,
            vec!["state-of-the-art parsing", "parsing", "state-of-the-art"]
        );
    }

    #[test]
    fn test_keyphrases_capped_at_ten() {
        let text = "alpha bravo. charlie delta. echo foxtrot. golf hotel. india juliet. \
                    kilo lima. mike november. oscar papa. quebec romeo. sierra tango. \
                    uniform victor. whiskey xray.";
        let phrases = SimpleProvider::new().keyphrases(text);
        assert_eq!(phrases.len(), MAX_KEYPHRASES);
        assert_eq!(phrases[0], "alpha bravo");
        assert_eq!(phrases[9], "sierra tango");
    }

    #[test]
    fn test_lead_sentence_summary() {
        let provider = SimpleProvider::new();
        assert_eq!(
            provider.lead_sentence("Hello world."),
            Some("Hello world.".to_string())
        );
        assert_eq!(
            provider.lead_sentence("First   line\nwraps. Second one."),
            Some("First line wraps.".to_string())
        );
        assert_eq!(provider.lead_sentence("   "), None);
    }

    #[test]
    fn test_lead_sentence_truncated() {
        let text = format!("{} end.", "word ".repeat(100));
        let summary = SimpleProvider::new().lead_sentence(&text).unwrap();
        assert_eq!(summary.chars().count(), MAX_SUMMARY_CHARS);
        assert!(normalize(&text).starts_with(&summary));
    }

    #[tokio::test]
    async fn test_provider_trait_operations() {
        let provider = SimpleProvider::new();
        assert_eq!(provider.name(), "simple");
        assert!(provider.models().is_empty());

        let sentiment = provider.analyze_sentiment("great").await.unwrap();
        assert_eq!(sentiment.unwrap().label, SentimentLabel::Positive);

        let keyphrases = provider.extract_keyphrases("great tools").await.unwrap();
        assert_eq!(keyphrases.unwrap()[0], "great tools");

        let summary = provider.summarize("Hello world.").await.unwrap();
        assert_eq!(summary.as_deref(), Some("Hello world."));
    }

    #[test]
    fn test_trait_matches_inherent_methods() {
        let provider = SimpleProvider::new();
        let text = "Release notes are ready. The fast build is great but the flaky test is bad.";

        tokio_test::block_on(async {
            let sentiment = provider.analyze_sentiment(text).await.unwrap();
            assert_eq!(sentiment, Some(provider.sentiment(text)));

            let keyphrases = provider.extract_keyphrases(text).await.unwrap();
            assert_eq!(keyphrases, Some(provider.keyphrases(text)));

            let summary = provider.summarize(text).await.unwrap();
            assert_eq!(summary, provider.lead_sentence(text));
        });
    }

    proptest! {
        #[test]
        fn prop_no_lexicon_hits_is_neutral(text in "[qxzv ]{0,60}") {
            prop_assert_eq!(SimpleProvider::new().sentiment(&text), SentimentResult::no_signal());
        }

        #[test]
        fn prop_keyphrases_bounded_and_distinct(text in "[a-z .!?']{0,300}") {
            let phrases = SimpleProvider::new().keyphrases(&text);
            prop_assert!(phrases.len() <= MAX_KEYPHRASES);
            let distinct: HashSet<&String> = phrases.iter().collect();
            prop_assert_eq!(distinct.len(), phrases.len());
            prop_assert!(phrases.iter().all(|p| !p.is_empty()));
        }

        #[test]
        fn prop_summary_is_prefix_of_first_sentence(text in "[a-zA-Z .!?\n]{0,600}") {
            if let Some(summary) = SimpleProvider::new().lead_sentence(&text) {
                let first = normalize(&split_sentences(&text)[0]);
                prop_assert!(summary.chars().count() <= MAX_SUMMARY_CHARS);
                prop_assert!(first.starts_with(&summary));
            }
        }
    }
}

//! Lexicon-based sentiment classification.
//!
//! Compares positive and negative lexicon hit counts. Confidence is the
//! normalized margin `|p - n| / max(1, p + n)`, so polarity-free text
//! reports neutral with confidence 0.

use crate::lexicon::{count_hits, NEGATIVE_WORDS, POSITIVE_WORDS};
use crate::models::{Sentiment, SentimentReport};

/// Classify the sentiment of a piece of content.
pub fn analyze_sentiment(text: &str) -> SentimentReport {
    let text_lower = text.to_lowercase();
    let positive = count_hits(&text_lower, POSITIVE_WORDS);
    let negative = count_hits(&text_lower, NEGATIVE_WORDS);

    let sentiment = if positive > negative {
        Sentiment::Positive
    } else if negative > positive {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    };

    let confidence =
        (positive as f64 - negative as f64).abs() / (positive + negative).max(1) as f64;

    SentimentReport {
        sentiment,
        confidence,
    }
}

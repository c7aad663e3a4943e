//! Engagement scoring from lexicon hits, questions, and numerals.
//!
//! Counts action, positive, and negative lexicon words case-insensitively,
//! detects questions and numeric tokens, and combines them into a weighted
//! score clamped to [0, 100]. Weights come from `[scoring.engagement]`
//! configuration.

use crate::config::EngagementWeights;
use crate::lexicon::{count_hits, ACTION_WORDS, NEGATIVE_WORDS, POSITIVE_WORDS};
use crate::models::EngagementReport;

/// Analyze the engagement potential of a piece of content.
pub fn analyze_engagement(text: &str, weights: &EngagementWeights) -> EngagementReport {
    let text_lower = text.to_lowercase();

    let action_words_count = count_hits(&text_lower, ACTION_WORDS);
    let positive_words_count = count_hits(&text_lower, POSITIVE_WORDS);
    let negative_words_count = count_hits(&text_lower, NEGATIVE_WORDS);

    let question_count = text.matches('?').count();
    let has_questions = question_count > 0;
    let has_numbers = text.chars().any(|c| c.is_ascii_digit());

    let mut score = weights.base_score;
    score += (action_words_count as f64 * weights.action_word_points)
        .min(weights.action_points_cap);
    score += (positive_words_count as f64 * weights.positive_word_points)
        .min(weights.positive_points_cap);
    score -= negative_words_count as f64 * weights.negative_word_penalty;
    score += question_count as f64 * weights.question_points;
    if has_numbers {
        score += weights.number_bonus;
    }

    EngagementReport {
        engagement_score: score.clamp(0.0, 100.0),
        action_words_count,
        positive_words_count,
        negative_words_count,
        has_questions,
        question_count,
        has_numbers,
    }
}

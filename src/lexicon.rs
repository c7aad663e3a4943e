//! Static word lists backing the lexicon-driven scorers.
//!
//! All matching against these lists is case-insensitive substring matching
//! performed by the callers; the lists themselves are lowercase.

/// Words signalling positive sentiment.
pub static POSITIVE_WORDS: &[&str] = &[
    "amazing",
    "excellent",
    "fantastic",
    "great",
    "outstanding",
    "wonderful",
    "perfect",
    "best",
    "love",
    "incredible",
];

/// Words signalling negative sentiment.
pub static NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "worst",
    "hate",
    "disappointing",
    "poor",
    "failure",
    "useless",
];

/// Call-to-action verbs that raise engagement.
pub static ACTION_WORDS: &[&str] = &[
    "buy",
    "get",
    "discover",
    "learn",
    "start",
    "join",
    "subscribe",
    "download",
    "register",
    "click",
    "shop",
];

/// Vowels for the syllable-counting heuristic. `y` counts as a vowel.
pub static VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

/// Counts lexicon entries appearing in `text_lower` (already lowercased).
/// Each distinct entry counts once regardless of repetition, matching the
/// presence-based semantics of the scorers.
pub fn count_hits(text_lower: &str, lexicon: &[&str]) -> usize {
    lexicon.iter().filter(|w| text_lower.contains(*w)).count()
}

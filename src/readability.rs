//! Sentence/word/syllable statistics and the Flesch-style reading-ease score.
//!
//! A pure function of the input text: identical text always yields
//! identical numbers. Degenerate input (no words) reports all-zero
//! metrics rather than dividing by zero.

use crate::lexicon::VOWELS;
use crate::models::ReadabilityReport;

/// Analyze readability of a piece of content.
///
/// Sentences are delimited by runs of `.`, `!`, or `?`; words by
/// whitespace. The sentence count is floored at 1 so texts without
/// terminal punctuation still score.
pub fn analyze_readability(text: &str) -> ReadabilityReport {
    let words: Vec<&str> = text.split_whitespace().collect();
    let total_words = words.len();

    if total_words == 0 {
        return ReadabilityReport {
            reading_ease_score: 0.0,
            avg_words_per_sentence: 0.0,
            total_words: 0,
            total_sentences: 0,
        };
    }

    let total_sentences = text
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count()
        .max(1);

    let avg_words_per_sentence = total_words as f64 / total_sentences as f64;

    let total_syllables: usize = words.iter().map(|w| count_syllables(w)).sum();
    let avg_syllables_per_word = total_syllables as f64 / total_words as f64;

    let raw = 206.835 - 1.015 * avg_words_per_sentence - 84.6 * avg_syllables_per_word;
    let reading_ease_score = raw.clamp(0.0, 100.0);

    ReadabilityReport {
        reading_ease_score,
        avg_words_per_sentence,
        total_words,
        total_sentences,
    }
}

/// Estimate the syllable count of a word.
///
/// Surrounding punctuation is stripped first so the silent-`e` correction
/// still applies to words ending a sentence. Each run of consecutive
/// vowels counts as one syllable, a trailing silent `e` subtracts one,
/// and every word counts at least one.
pub fn count_syllables(word: &str) -> usize {
    let word = word
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    let mut count = 0usize;
    let mut previous_was_vowel = false;

    for ch in word.chars() {
        let is_vowel = VOWELS.contains(&ch);
        if is_vowel && !previous_was_vowel {
            count += 1;
        }
        previous_was_vowel = is_vowel;
    }

    if word.ends_with('e') {
        count = count.saturating_sub(1);
    }

    count.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syllable_counts() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("water"), 2);
        assert_eq!(count_syllables("beautiful"), 3);
        // Silent trailing e
        assert_eq!(count_syllables("make"), 1);
        // Floor of one even for vowelless tokens
        assert_eq!(count_syllables("tsk"), 1);
    }

    #[test]
    fn test_punctuation_stripped_before_counting() {
        // Sentence-final punctuation must not defeat the silent-e rule
        assert_eq!(count_syllables("make."), count_syllables("make"));
        assert_eq!(count_syllables("make!"), 1);
        assert_eq!(count_syllables("\"ready?\""), 2);
        assert_eq!(count_syllables("water,"), 2);
    }

    #[test]
    fn test_empty_text_all_zero() {
        let report = analyze_readability("");
        assert_eq!(report.total_words, 0);
        assert_eq!(report.total_sentences, 0);
        assert_eq!(report.reading_ease_score, 0.0);
        assert_eq!(report.avg_words_per_sentence, 0.0);
    }

    #[test]
    fn test_sentence_splitting() {
        let report = analyze_readability("First sentence. Second one! A third? ");
        assert_eq!(report.total_sentences, 3);
        assert_eq!(report.total_words, 6);
    }

    #[test]
    fn test_no_terminal_punctuation_counts_one_sentence() {
        let report = analyze_readability("just a fragment with no period");
        assert_eq!(report.total_sentences, 1);
        assert_eq!(report.avg_words_per_sentence, 6.0);
    }

    #[test]
    fn test_score_clamped_to_range() {
        // Very short, simple text pushes the raw formula above 100
        let simple = analyze_readability("Go. Do. Be.");
        assert!(simple.reading_ease_score <= 100.0);
        assert!(simple.reading_ease_score >= 0.0);

        let complex = analyze_readability(
            "Notwithstanding extraordinary organizational complexities, multidimensional \
             considerations unequivocally necessitate comprehensive reevaluation procedures \
             incorporating institutional accountability mechanisms alongside operational \
             sustainability imperatives",
        );
        assert!(complex.reading_ease_score >= 0.0);
    }

    #[test]
    fn test_determinism() {
        let text = "Discover the amazing power of focused writing. Keep sentences short.";
        let a = analyze_readability(text);
        let b = analyze_readability(text);
        assert_eq!(a, b);
    }
}

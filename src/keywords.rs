//! Keyword frequency and density analysis.
//!
//! Matches each supplied keyword case-insensitively as a substring of the
//! content and reports per-keyword frequency, the found subset, and the
//! overall density as a percentage of total words.

use crate::models::KeywordReport;

/// Analyze keyword usage in `text` for the supplied keyword list.
///
/// Density is `total occurrences / total words * 100`, and 0 when the
/// keyword list is empty or the text has no words.
pub fn analyze_keywords(text: &str, keywords: &[String]) -> KeywordReport {
    if keywords.is_empty() {
        return KeywordReport {
            keyword_density: 0.0,
            keywords_found: Vec::new(),
            keyword_frequency: Vec::new(),
            total_keyword_occurrences: 0,
        };
    }

    let text_lower = text.to_lowercase();
    let total_words = text.split_whitespace().count();

    let mut keyword_frequency = Vec::new();
    let mut keywords_found = Vec::new();
    let mut total_keyword_occurrences = 0usize;

    for keyword in keywords {
        let keyword_lower = keyword.to_lowercase();
        if keyword_lower.is_empty() {
            continue;
        }
        let count = text_lower.matches(&keyword_lower).count();
        if count > 0 {
            keyword_frequency.push((keyword.clone(), count));
            keywords_found.push(keyword.clone());
            total_keyword_occurrences += count;
        }
    }

    let keyword_density = if total_words == 0 {
        0.0
    } else {
        total_keyword_occurrences as f64 / total_words as f64 * 100.0
    };

    KeywordReport {
        keyword_density,
        keywords_found,
        keyword_frequency,
        total_keyword_occurrences,
    }
}

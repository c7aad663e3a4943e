//! Rule-based SEO recommendations.
//!
//! Each rule is evaluated against configurable thresholds and emits an
//! advisory string; output order is fixed by rule priority. When nothing
//! fires, a single affirmative recommendation is returned.

use crate::config::SeoThresholds;
use crate::models::{EngagementReport, KeywordReport, ReadabilityReport};

/// Generate SEO improvement recommendations for a piece of content.
///
/// Takes the already-computed analyzer reports so the caller runs each
/// analyzer exactly once per pipeline pass.
pub fn seo_recommendations(
    keywords: &[String],
    thresholds: &SeoThresholds,
    readability: &ReadabilityReport,
    engagement: &EngagementReport,
    keyword_analysis: &KeywordReport,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    let word_count = readability.total_words;
    if word_count < thresholds.min_word_count {
        recommendations.push(format!(
            "Content is short. Consider adding more detail (aim for {}-{} words).",
            thresholds.min_word_count, thresholds.max_word_count
        ));
    } else if word_count > thresholds.max_word_count {
        recommendations
            .push("Content is very long. Consider breaking it into multiple pieces.".to_string());
    }

    if !keywords.is_empty() {
        let density = keyword_analysis.keyword_density;
        if density < thresholds.min_density_percent {
            recommendations.push(
                "Keyword density is low. Try to naturally incorporate more target keywords."
                    .to_string(),
            );
        } else if density > thresholds.max_density_percent {
            recommendations.push(
                "Keyword density is high. Reduce keyword usage to avoid keyword stuffing."
                    .to_string(),
            );
        }

        let missing: Vec<&String> = keywords
            .iter()
            .filter(|k| !keyword_analysis.keywords_found.contains(k))
            .take(3)
            .collect();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|s| s.as_str()).collect();
            recommendations.push(format!("Missing keywords: {}", names.join(", ")));
        }
    }

    if readability.reading_ease_score < thresholds.reading_ease_floor {
        recommendations
            .push("Text is hard to read. Simplify language and shorten sentences.".to_string());
    }

    if engagement.action_words_count == 0 {
        recommendations.push("Add a call to action to drive reader response.".to_string());
    }

    if !engagement.has_questions {
        recommendations.push("Consider adding questions to increase engagement.".to_string());
    }

    if !engagement.has_numbers {
        recommendations.push(
            "Adding numbers or statistics can improve credibility and engagement.".to_string(),
        );
    }

    if recommendations.is_empty() {
        recommendations.push("Content looks good! No major SEO issues detected.".to_string());
    }

    recommendations
}

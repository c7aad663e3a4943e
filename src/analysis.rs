//! Score aggregation and cross-content comparison.
//!
//! [`content_report`] runs the full analyzer pipeline (readability →
//! engagement → keyword → SEO) and combines the sub-scores into an overall
//! score using the configured weights. [`compare_records`] ranks multiple
//! scored records and surfaces the best performers.

use chrono::Utc;
use serde::Serialize;

use crate::config::ScoringConfig;
use crate::engagement::analyze_engagement;
use crate::keywords::analyze_keywords;
use crate::models::{AnalysisResult, ContentRecord};
use crate::readability::analyze_readability;
use crate::seo::seo_recommendations;

/// Run the full analyzer pipeline over a piece of content.
///
/// Idempotent: the same text and keywords always produce the same scores
/// (only `analyzed_at` varies).
pub fn content_report(text: &str, keywords: &[String], scoring: &ScoringConfig) -> AnalysisResult {
    let readability = analyze_readability(text);
    let engagement = analyze_engagement(text, &scoring.engagement);
    let keyword_analysis = analyze_keywords(text, keywords);
    let recommendations = seo_recommendations(
        keywords,
        &scoring.seo,
        &readability,
        &engagement,
        &keyword_analysis,
    );

    let in_band = keyword_analysis.keyword_density >= scoring.seo.min_density_percent
        && keyword_analysis.keyword_density <= scoring.seo.max_density_percent;
    let keyword_subscore = if in_band { 100.0 } else { 50.0 };

    let overall_score = scoring.readability_weight * readability.reading_ease_score
        + scoring.engagement_weight * engagement.engagement_score
        + scoring.keyword_weight * keyword_subscore;

    AnalysisResult {
        overall_score,
        readability,
        engagement,
        keyword_analysis,
        seo_recommendations: recommendations,
        analyzed_at: Utc::now(),
    }
}

/// Density-band SEO subscore surfaced as `ContentRecord.seo_score`.
///
/// 90 when density falls inside the configured band, 60 below it, 70 above
/// it, and a flat 50 when no keywords were requested.
pub fn seo_subscore(text: &str, keywords: &[String], scoring: &ScoringConfig) -> f64 {
    if keywords.is_empty() {
        return 50.0;
    }
    let density = analyze_keywords(text, keywords).keyword_density;
    if density >= scoring.seo.min_density_percent && density <= scoring.seo.max_density_percent {
        90.0
    } else if density < scoring.seo.min_density_percent {
        60.0
    } else {
        70.0
    }
}

/// Per-record score summary inside a comparison response.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonEntry {
    pub content_id: String,
    pub overall_score: f64,
    pub readability_score: f64,
    pub engagement_score: f64,
    pub keyword_density: f64,
}

/// Winners of an N-way comparison.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonInsights {
    pub best_overall_content_id: String,
    pub best_readability_content_id: String,
    pub best_engagement_content_id: String,
}

/// Full comparison response: per-record summaries plus winners.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub comparison_count: usize,
    pub content_comparisons: Vec<ComparisonEntry>,
    pub insights: ComparisonInsights,
}

/// Compare multiple content records by re-running the analyzer pipeline.
///
/// Records are evaluated in creation order (ties on timestamp fall back to
/// id order) and a later record only displaces the leader with a strictly
/// greater score, so ties go to the earliest-created record. Returns `None`
/// on empty input.
pub fn compare_records(records: &[ContentRecord], scoring: &ScoringConfig) -> Option<Comparison> {
    if records.is_empty() {
        return None;
    }

    let mut ordered: Vec<&ContentRecord> = records.iter().collect();
    ordered.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });

    let entries: Vec<ComparisonEntry> = ordered
        .iter()
        .map(|rec| {
            let report = content_report(&rec.content, &rec.keywords, scoring);
            ComparisonEntry {
                content_id: rec.id.clone(),
                overall_score: report.overall_score,
                readability_score: report.readability.reading_ease_score,
                engagement_score: report.engagement.engagement_score,
                keyword_density: report.keyword_analysis.keyword_density,
            }
        })
        .collect();

    let best_by = |score: fn(&ComparisonEntry) -> f64| -> String {
        let mut best = &entries[0];
        for entry in &entries[1..] {
            if score(entry) > score(best) {
                best = entry;
            }
        }
        best.content_id.clone()
    };

    let insights = ComparisonInsights {
        best_overall_content_id: best_by(|e| e.overall_score),
        best_readability_content_id: best_by(|e| e.readability_score),
        best_engagement_content_id: best_by(|e| e.engagement_score),
    };

    Some(Comparison {
        comparison_count: entries.len(),
        content_comparisons: entries,
        insights,
    })
}

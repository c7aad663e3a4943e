//! Core data models used throughout Copysmith.
//!
//! These types represent the generation requests, scored content records,
//! campaigns, and analysis reports that flow through the generation and
//! analytics pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A content-generation request. Immutable once issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default = "default_length")]
    pub length: usize,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub platform: Option<String>,
}

fn default_tone() -> String {
    "neutral".to_string()
}

fn default_length() -> usize {
    250
}

impl GenerationRequest {
    /// Rejects malformed requests before they reach the cache or provider.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.prompt.trim().is_empty() {
            anyhow::bail!("prompt must not be empty");
        }
        if self.length == 0 || self.length > 5000 {
            anyhow::bail!("length must be between 1 and 5000 (got {})", self.length);
        }
        Ok(())
    }
}

/// Sentiment label produced by the lexicon classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// A generated and scored piece of content. Scores are set once at
/// generation time and never mutated afterwards; re-running the analyzer
/// pipeline on `content` reproduces them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: String,
    pub prompt: String,
    pub tone: String,
    pub length: usize,
    pub keywords: Vec<String>,
    pub platform: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub quality_score: f64,
    pub seo_score: f64,
    pub sentiment: Sentiment,
    pub confidence: f64,
}

/// A marketing campaign grouping content records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub description: String,
    pub content_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub target_audience: Option<String>,
}

/// Request body for creating a campaign.
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignCreateRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content_ids: Vec<String>,
    #[serde(default)]
    pub target_audience: Option<String>,
}

impl CampaignCreateRequest {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.name.trim().len() < 3 {
            anyhow::bail!("campaign name must be at least 3 characters long");
        }
        Ok(())
    }
}

/// Sentence/word/syllable statistics and the derived reading-ease score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadabilityReport {
    pub reading_ease_score: f64,
    pub avg_words_per_sentence: f64,
    pub total_words: usize,
    pub total_sentences: usize,
}

/// Engagement signals and the weighted engagement score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementReport {
    pub engagement_score: f64,
    pub action_words_count: usize,
    pub positive_words_count: usize,
    pub negative_words_count: usize,
    pub has_questions: bool,
    pub question_count: usize,
    pub has_numbers: bool,
}

/// Keyword usage metrics for a supplied keyword list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordReport {
    pub keyword_density: f64,
    pub keywords_found: Vec<String>,
    /// Occurrence count per keyword, in supplied-list order. Keywords with
    /// zero occurrences are omitted. Serialized as a JSON object.
    #[serde(with = "keyword_frequency_map")]
    pub keyword_frequency: Vec<(String, usize)>,
    pub total_keyword_occurrences: usize,
}

/// Sentiment label plus classifier confidence in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub sentiment: Sentiment,
    pub confidence: f64,
}

/// Full analysis report for one piece of content. Recomputable and
/// idempotent; never stored as an entity of record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overall_score: f64,
    pub readability: ReadabilityReport,
    pub engagement: EngagementReport,
    pub keyword_analysis: KeywordReport,
    pub seo_recommendations: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
}

/// Per-content score summary inside a [`CampaignAnalytics`] response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentScoreSummary {
    pub content_id: String,
    pub quality_score: f64,
    pub seo_score: f64,
    pub sentiment: Sentiment,
}

/// Aggregated view over a campaign's content records. Purely derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignAnalytics {
    pub campaign_id: String,
    pub campaign_name: String,
    pub total_content_pieces: usize,
    pub average_quality_score: f64,
    pub average_seo_score: f64,
    pub content_analytics: Vec<ContentScoreSummary>,
}

/// Serde adapter keeping [`KeywordReport::keyword_frequency`] an ordered
/// pair list in memory while the wire shape is a JSON object.
mod keyword_frequency_map {
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(entries: &[(String, usize)], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (keyword, count) in entries {
            map.serialize_entry(keyword, count)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<(String, usize)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PairVisitor;

        impl<'de> Visitor<'de> for PairVisitor {
            type Value = Vec<(String, usize)>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of keyword occurrence counts")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry()? {
                    entries.push(entry);
                }
                Ok(entries)
            }
        }

        deserializer.deserialize_map(PairVisitor)
    }
}

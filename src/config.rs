use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7450".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: i64,
    #[serde(default = "default_max_size")]
    pub max_size: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
            max_size: default_max_size(),
        }
    }
}

fn default_ttl_seconds() -> i64 {
    3600
}
fn default_max_size() -> usize {
    500
}

#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitConfig {
    #[serde(default = "default_per_minute")]
    pub per_minute: u32,
    #[serde(default = "default_per_hour")]
    pub per_hour: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_minute: default_per_minute(),
            per_hour: default_per_hour(),
        }
    }
}

fn default_per_minute() -> u32 {
    60
}
fn default_per_hour() -> u32 {
    1000
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    #[serde(default = "default_provider_kind")]
    pub kind: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: default_provider_kind(),
        }
    }
}

fn default_provider_kind() -> String {
    "template".to_string()
}

/// Weights and thresholds for the scoring pipeline.
///
/// The overall score is `readability_weight * reading_ease +
/// engagement_weight * engagement + keyword_weight * keyword_subscore`.
/// The three weights must sum to 1.
#[derive(Debug, Deserialize, Clone)]
pub struct ScoringConfig {
    #[serde(default = "default_readability_weight")]
    pub readability_weight: f64,
    #[serde(default = "default_engagement_weight")]
    pub engagement_weight: f64,
    #[serde(default = "default_keyword_weight")]
    pub keyword_weight: f64,
    #[serde(default)]
    pub engagement: EngagementWeights,
    #[serde(default)]
    pub seo: SeoThresholds,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            readability_weight: default_readability_weight(),
            engagement_weight: default_engagement_weight(),
            keyword_weight: default_keyword_weight(),
            engagement: EngagementWeights::default(),
            seo: SeoThresholds::default(),
        }
    }
}

fn default_readability_weight() -> f64 {
    0.3
}
fn default_engagement_weight() -> f64 {
    0.4
}
fn default_keyword_weight() -> f64 {
    0.3
}

/// Per-signal points for the engagement score. Action and positive word
/// contributions are capped; negative words subtract.
#[derive(Debug, Deserialize, Clone)]
pub struct EngagementWeights {
    #[serde(default = "default_base_score")]
    pub base_score: f64,
    #[serde(default = "default_action_word_points")]
    pub action_word_points: f64,
    #[serde(default = "default_action_points_cap")]
    pub action_points_cap: f64,
    #[serde(default = "default_positive_word_points")]
    pub positive_word_points: f64,
    #[serde(default = "default_positive_points_cap")]
    pub positive_points_cap: f64,
    #[serde(default = "default_negative_word_penalty")]
    pub negative_word_penalty: f64,
    #[serde(default = "default_question_points")]
    pub question_points: f64,
    #[serde(default = "default_number_bonus")]
    pub number_bonus: f64,
}

impl Default for EngagementWeights {
    fn default() -> Self {
        Self {
            base_score: default_base_score(),
            action_word_points: default_action_word_points(),
            action_points_cap: default_action_points_cap(),
            positive_word_points: default_positive_word_points(),
            positive_points_cap: default_positive_points_cap(),
            negative_word_penalty: default_negative_word_penalty(),
            question_points: default_question_points(),
            number_bonus: default_number_bonus(),
        }
    }
}

fn default_base_score() -> f64 {
    50.0
}
fn default_action_word_points() -> f64 {
    10.0
}
fn default_action_points_cap() -> f64 {
    30.0
}
fn default_positive_word_points() -> f64 {
    5.0
}
fn default_positive_points_cap() -> f64 {
    15.0
}
fn default_negative_word_penalty() -> f64 {
    5.0
}
fn default_question_points() -> f64 {
    5.0
}
fn default_number_bonus() -> f64 {
    5.0
}

/// Thresholds driving the SEO recommendation rules and the density-band
/// subscore. Densities are percentages of total words.
#[derive(Debug, Deserialize, Clone)]
pub struct SeoThresholds {
    #[serde(default = "default_min_density")]
    pub min_density_percent: f64,
    #[serde(default = "default_max_density")]
    pub max_density_percent: f64,
    #[serde(default = "default_reading_ease_floor")]
    pub reading_ease_floor: f64,
    #[serde(default = "default_min_word_count")]
    pub min_word_count: usize,
    #[serde(default = "default_max_word_count")]
    pub max_word_count: usize,
}

impl Default for SeoThresholds {
    fn default() -> Self {
        Self {
            min_density_percent: default_min_density(),
            max_density_percent: default_max_density(),
            reading_ease_floor: default_reading_ease_floor(),
            min_word_count: default_min_word_count(),
            max_word_count: default_max_word_count(),
        }
    }
}

fn default_min_density() -> f64 {
    1.0
}
fn default_max_density() -> f64 {
    3.0
}
fn default_reading_ease_floor() -> f64 {
    30.0
}
fn default_min_word_count() -> usize {
    300
}
fn default_max_word_count() -> usize {
    2000
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    validate_config(&config)?;

    Ok(config)
}

/// Validates a parsed configuration. Split out of [`load_config`] so
/// defaults and in-memory configs go through the same checks.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.cache.ttl_seconds <= 0 {
        anyhow::bail!("cache.ttl_seconds must be > 0");
    }
    if config.cache.max_size == 0 {
        anyhow::bail!("cache.max_size must be > 0");
    }

    if config.rate_limit.per_minute == 0 {
        anyhow::bail!("rate_limit.per_minute must be > 0");
    }
    if config.rate_limit.per_hour == 0 {
        anyhow::bail!("rate_limit.per_hour must be > 0");
    }

    let s = &config.scoring;
    for (name, w) in [
        ("scoring.readability_weight", s.readability_weight),
        ("scoring.engagement_weight", s.engagement_weight),
        ("scoring.keyword_weight", s.keyword_weight),
    ] {
        if w < 0.0 {
            anyhow::bail!("{} must be >= 0", name);
        }
    }
    let weight_sum = s.readability_weight + s.engagement_weight + s.keyword_weight;
    if (weight_sum - 1.0).abs() > 1e-6 {
        anyhow::bail!("scoring weights must sum to 1.0 (got {})", weight_sum);
    }

    if s.seo.min_density_percent < 0.0 {
        anyhow::bail!("scoring.seo.min_density_percent must be >= 0");
    }
    if s.seo.max_density_percent < s.seo.min_density_percent {
        anyhow::bail!("scoring.seo.max_density_percent must be >= min_density_percent");
    }

    match config.provider.kind.as_str() {
        "template" => {}
        other => anyhow::bail!("Unknown provider kind: '{}'. Must be template.", other),
    }

    Ok(())
}

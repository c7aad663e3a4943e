//! Content provider abstraction.
//!
//! The generative-text collaborator sits behind the [`ContentProvider`]
//! trait; the service never depends on a concrete backend. The built-in
//! [`TemplateProvider`] produces deterministic template-based copy with
//! platform-specific formatting, which keeps the pipeline fully testable
//! offline.
//!
//! Use [`create_provider`] to instantiate the provider named in the
//! `[provider]` configuration section.

use anyhow::Result;
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::config::ProviderConfig;
use crate::models::GenerationRequest;

/// Abstract generative-text backend.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Provider identifier for diagnostics (e.g. `"template"`).
    fn name(&self) -> &str;

    /// Generate raw content text for a request. Failures propagate as
    /// generation failures; the caller performs no retries.
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

/// Instantiate the provider selected by configuration.
pub fn create_provider(config: &ProviderConfig) -> Result<Arc<dyn ContentProvider>> {
    match config.kind.as_str() {
        "template" => Ok(Arc::new(TemplateProvider)),
        other => anyhow::bail!("Unknown provider kind: '{}'. Must be template.", other),
    }
}

/// Deterministic template-based provider.
///
/// Picks a template from the prompt's hash so identical prompts always
/// produce identical text, folds in up to three keywords, and applies
/// platform formatting before truncating to the requested length.
pub struct TemplateProvider;

const TEMPLATES: &[&str] = &[
    "{prompt} - A captivating and engaging message tailored for your audience.",
    "{prompt} - A professional and concise message to drive conversions.",
    "{prompt} - A creative and innovative approach to marketing your product.",
    "{prompt} - Discover the power of exceptional marketing that resonates.",
    "{prompt} - Transform your brand story with compelling, audience-focused content.",
];

const TWITTER_CHAR_LIMIT: usize = 280;

#[async_trait]
impl ContentProvider for TemplateProvider {
    fn name(&self) -> &str {
        "template"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let mut hasher = Sha256::new();
        hasher.update(request.prompt.as_bytes());
        let digest = hasher.finalize();
        let index = digest[0] as usize % TEMPLATES.len();

        let mut content = TEMPLATES[index].replace("{prompt}", request.prompt.trim());

        if !request.keywords.is_empty() {
            let picked: Vec<&str> = request
                .keywords
                .iter()
                .take(3)
                .map(|k| k.as_str())
                .collect();
            content.push_str(" Focus on: ");
            content.push_str(&picked.join(", "));
        }

        if let Some(platform) = request.platform.as_deref() {
            match platform.to_lowercase().as_str() {
                "twitter" => {
                    content = truncate_chars(&content, TWITTER_CHAR_LIMIT);
                    content.push_str(" #marketing #content");
                }
                "linkedin" => {
                    content
                        .push_str("\n\nLet's connect and discuss how this can benefit your business.");
                }
                "instagram" => {
                    content.push_str("\n\n#marketing #creative #engagement");
                }
                _ => {}
            }
        }

        Ok(truncate_chars(&content, request.length))
    }
}

/// Truncate to at most `max` characters on a char boundary.
fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

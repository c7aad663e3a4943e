//! Stable request fingerprints for the result cache.
//!
//! A fingerprint is a SHA-256 hash over the normalized fields of a
//! [`GenerationRequest`]: trimmed prompt, trimmed + lowercased tone and
//! platform, length, and the keyword list sorted after lowercasing. Two
//! requests that differ only in keyword order or tone/platform casing
//! always yield the same fingerprint; every field and every keyword is
//! hashed length-prefixed so distinct requests never share one.

use sha2::{Digest, Sha256};

use crate::models::GenerationRequest;

/// Derive the cache fingerprint for a generation request.
pub fn fingerprint(request: &GenerationRequest) -> String {
    let mut keywords: Vec<String> = request
        .keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .collect();
    keywords.sort();

    let platform = request
        .platform
        .as_deref()
        .map(|p| p.trim().to_lowercase())
        .unwrap_or_default();

    let mut hasher = Sha256::new();
    // Fixed field order with length-prefixed segments so adjacent fields
    // can never collide by concatenation.
    for field in [
        request.prompt.trim(),
        &request.tone.trim().to_lowercase(),
        &request.length.to_string(),
        &platform,
    ] {
        hasher.update((field.len() as u64).to_le_bytes());
        hasher.update(field.as_bytes());
    }
    // Keywords are counted and length-prefixed individually so no list
    // can collide with a differently-split one.
    hasher.update((keywords.len() as u64).to_le_bytes());
    for keyword in &keywords {
        hasher.update((keyword.len() as u64).to_le_bytes());
        hasher.update(keyword.as_bytes());
    }

    format!("{:x}", hasher.finalize())
}

//! # Copysmith
//!
//! A content-generation scoring service. Copysmith accepts a generation
//! request (prompt, tone, length, keywords, target platform), produces
//! text through a pluggable provider, and annotates it with deterministic
//! quality, SEO, and sentiment scores. Around the provider call sit the
//! three components that carry the real invariants: a fingerprinted
//! result cache (TTL + LRU), a dual-window rate limiter, and the
//! lexicon-driven scoring engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────────┐   ┌───────────┐   ┌──────────┐
//! │ Limiter   │──▶│ Fingerprint   │──▶│ Provider   │──▶│ Scoring   │
//! │ (429s)    │   │ Cache        │   │ (abstract) │   │ Pipeline  │
//! └──────────┘   └──────────────┘   └───────────┘   └────┬─────┘
//!                                                        │
//!                                     ┌──────────────────┤
//!                                     ▼                  ▼
//!                                ┌──────────┐      ┌──────────┐
//!                                │   CLI    │      │   HTTP   │
//!                                │  (csm)   │      │  (axum)  │
//!                                └──────────┘      └──────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`lexicon`] | Static word lists |
//! | [`readability`] | Reading-ease analysis |
//! | [`engagement`] | Engagement scoring |
//! | [`keywords`] | Keyword density analysis |
//! | [`sentiment`] | Lexicon sentiment classification |
//! | [`seo`] | SEO recommendations |
//! | [`analysis`] | Score aggregation and comparison |
//! | [`fingerprint`] | Request fingerprints |
//! | [`cache`] | TTL + LRU result cache |
//! | [`limiter`] | Dual-window rate limiter |
//! | [`provider`] | Content provider abstraction |
//! | [`store`] | Persistence abstraction |
//! | [`generate`] | Generation pipeline |
//! | [`server`] | HTTP server |

pub mod analysis;
pub mod analyze_cmd;
pub mod cache;
pub mod config;
pub mod engagement;
pub mod fingerprint;
pub mod generate;
pub mod keywords;
pub mod lexicon;
pub mod limiter;
pub mod models;
pub mod provider;
pub mod readability;
pub mod sentiment;
pub mod seo;
pub mod server;
pub mod store;

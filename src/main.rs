//! # Copysmith CLI (`csm`)
//!
//! The `csm` binary is the primary interface for Copysmith. It provides
//! commands for one-shot content analysis, one-shot generation, and
//! starting the HTTP API server.
//!
//! ## Usage
//!
//! ```bash
//! csm --config ./config/copysmith.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `csm serve` | Start the HTTP API server |
//! | `csm analyze <file>` | Score a text file and print the full analysis |
//! | `csm analyze --text "..."` | Score inline text |
//! | `csm generate "<prompt>"` | Generate and score content in one shot |
//!
//! ## Examples
//!
//! ```bash
//! # Start the API server
//! csm serve --config ./config/copysmith.toml
//!
//! # Analyze a draft against target keywords
//! csm analyze draft.txt --keywords "ai,productivity"
//!
//! # Analyze inline text
//! csm analyze --text "Buy now! Our new AI product saves you 10 hours a week."
//!
//! # Generate a LinkedIn post
//! csm generate "launching our analytics platform" \
//!     --tone professional --length 400 --keyword analytics --platform linkedin
//! ```

mod analysis;
mod analyze_cmd;
mod cache;
mod config;
mod engagement;
mod fingerprint;
mod generate;
mod keywords;
mod lexicon;
mod limiter;
mod models;
mod provider;
mod readability;
mod sentiment;
mod seo;
mod server;
mod store;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Copysmith CLI — a content generation and scoring service.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/copysmith.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "csm",
    about = "Copysmith — a content generation and scoring service",
    version,
    long_about = "Copysmith generates marketing copy through a pluggable provider and scores it \
    with a deterministic analysis engine (readability, engagement, keyword density, sentiment, \
    and SEO recommendations). The HTTP server adds a fingerprinted result cache, per-client rate \
    limiting, and campaign analytics on top of the same pipeline."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/copysmith.toml`. All server, cache, rate-limit,
    /// provider, and scoring settings are read from this file.
    #[arg(long, global = true, default_value = "./config/copysmith.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server.
    ///
    /// Binds to the address configured in `[server].bind` and serves the
    /// generation, analysis, campaign, and cache endpoints. All routes
    /// except `/health` are rate limited per client address.
    Serve,

    /// Score existing text and print the full analysis as JSON.
    ///
    /// Reads text from a file argument or from `--text`, runs the complete
    /// scoring pipeline (readability, engagement, keywords, sentiment, SEO
    /// recommendations), and prints the result. No provider is involved.
    Analyze {
        /// Path to a text file to analyze.
        file: Option<PathBuf>,

        /// Analyze inline text instead of a file.
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,

        /// Target keywords, comma separated (e.g., `ai,productivity`).
        #[arg(long, value_delimiter = ',')]
        keywords: Vec<String>,
    },

    /// Generate content from a prompt and print the scored record.
    ///
    /// Runs the same pipeline the server uses — provider call, scoring,
    /// sentiment — in a single process and prints the resulting record.
    Generate {
        /// The content prompt.
        prompt: String,

        /// Desired tone (e.g., `professional`, `casual`, `neutral`).
        #[arg(long, default_value = "neutral")]
        tone: String,

        /// Target length in characters.
        #[arg(long, default_value_t = 250)]
        length: usize,

        /// Target keyword; repeat for multiple (e.g., `--keyword ai --keyword saas`).
        #[arg(long = "keyword")]
        keywords: Vec<String>,

        /// Target platform for formatting: `twitter`, `linkedin`, or `instagram`.
        #[arg(long)]
        platform: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Analyze {
            file,
            text,
            keywords,
        } => {
            analyze_cmd::run_analyze(&cfg, file.as_deref(), text.as_deref(), &keywords)?;
        }
        Commands::Generate {
            prompt,
            tone,
            length,
            keywords,
            platform,
        } => {
            let request = models::GenerationRequest {
                prompt,
                tone,
                length,
                keywords,
                platform,
            };
            generate::run_generate(&cfg, &request).await?;
        }
    }

    Ok(())
}

//! The `csm analyze` command.
//!
//! Runs the full analyzer pipeline over a text file or inline text and
//! prints the report as pretty JSON. Used by both humans inspecting copy
//! and the integration tests, which parse the output.

use anyhow::{Context, Result};
use std::path::Path;

use crate::analysis::content_report;
use crate::config::Config;

/// Run the analyze command: score the given text and print the report.
///
/// Exactly one of `file` or `text` must be provided.
pub fn run_analyze(
    config: &Config,
    file: Option<&Path>,
    text: Option<&str>,
    keywords: &[String],
) -> Result<()> {
    let content = match (file, text) {
        (Some(path), None) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?,
        (None, Some(inline)) => inline.to_string(),
        _ => anyhow::bail!("provide exactly one of a file path or --text"),
    };

    if content.trim().is_empty() {
        anyhow::bail!("input text is empty");
    }

    let report = content_report(&content, keywords, &config.scoring);
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

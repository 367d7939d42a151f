//! Machine-readable dump of a finished run.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::summary::RunSummary;

/// Serializes `summary` as pretty-printed JSON.
pub fn render_json_summary(summary: &RunSummary) -> Result<String> {
    serde_json::to_string_pretty(summary).context("Failed to serialize run summary")
}

/// Writes the JSON summary to `output_path`.
pub fn write_json_summary(summary: &RunSummary, output_path: &Path) -> Result<()> {
    let json = render_json_summary(summary)?;
    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON summary to {}", output_path.display()))
}

//! `callsheet context` — Render the prompt context for a bundle file.
//!
//! Reads a JSON record bundle from disk and prints the exact context
//! string the relay would prepend to a chat request. Useful for
//! inspecting what the LLM actually sees.

use anyhow::Context as _;
use callsheet_core::records::RecordBundle;
use std::path::Path;

pub fn run(file: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read bundle file {}", file.display()))?;

    let bundle: RecordBundle = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse bundle file {}", file.display()))?;

    print!("{}", callsheet_context::build_user_context(Some(&bundle)));
    Ok(())
}

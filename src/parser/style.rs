//! Style document files.
//!
//! Styles are strict JSON (the format rendering clients accept), so they are
//! read with `serde_json` rather than the more lenient JSON5 reader used for
//! hand-edited inputs.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::models::StyleDocument;

/// Loads a style document from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not JSON, or has a layer
/// without `id`/`type`.
pub fn load_style(path: &Path) -> Result<StyleDocument> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read style file: {}", path.display()))?;
    StyleDocument::from_json_str(&content)
        .with_context(|| format!("Failed to parse style file: {}", path.display()))
}

/// Serializes a style document, optionally pretty-printed.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn style_to_string(style: &StyleDocument, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(style)
    } else {
        serde_json::to_string(style)
    };
    json.context("Failed to serialize style")
}

/// Writes a style document to a file (temp file + rename).
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_style(style: &StyleDocument, path: &Path, pretty: bool) -> Result<()> {
    let mut content = style_to_string(style, pretty)?;
    content.push('\n');

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write temp style file: {}", temp_path.display()))?;
    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temp style file to: {}", path.display()))?;
    Ok(())
}

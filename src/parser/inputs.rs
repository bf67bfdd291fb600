//! Hand-edited input files: palettes, visibility settings, toggle catalogs.
//!
//! These are read as JSON5 so they may carry comments and trailing commas.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::models::{BuiltinPalettes, Palette, ToggleCatalog, VisibilityConfig};

fn load_json5<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {what} file: {}", path.display()))?;
    json5::from_str(&content)
        .with_context(|| format!("Failed to parse {what} file: {}", path.display()))
}

/// Loads a palette file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_palette(path: &Path) -> Result<Palette> {
    load_json5(path, "palette")
}

/// Loads a visibility/intensity settings file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_visibility_config(path: &Path) -> Result<VisibilityConfig> {
    load_json5(path, "visibility config")
}

/// Loads a toggle catalog file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_toggle_catalog(path: &Path) -> Result<ToggleCatalog> {
    load_json5(path, "toggle catalog")
}

/// Resolves a palette argument: an existing file path, or a built-in
/// palette id/name.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or no built-in palette
/// matches.
pub fn resolve_palette(name_or_path: &str, builtins: &BuiltinPalettes) -> Result<Palette> {
    let path = Path::new(name_or_path);
    if path.is_file() {
        return load_palette(path);
    }
    builtins.find(name_or_path).cloned().with_context(|| {
        let known: Vec<&str> = builtins.palettes.iter().map(|p| p.id.as_str()).collect();
        format!(
            "Unknown palette '{name_or_path}' (built-in palettes: {})",
            known.join(", ")
        )
    })
}

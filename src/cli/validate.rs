//! Validate command: contract checks without deriving.

use clap::Args;
use std::collections::HashSet;
use std::path::PathBuf;

use crate::cli::common::{
    load_catalog_arg, load_config_arg, load_palette_arg, load_style_arg, CliError, CliResult,
    ExitCode, ValidationChecks, ValidationMessage, ValidationResponse,
};
use crate::models::StyleDocument;

/// Validate a base style, palette, settings and toggle catalog
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Base style JSON file
    #[arg(short, long, value_name = "FILE")]
    pub style: PathBuf,

    /// Built-in palette name or palette file
    #[arg(short, long, value_name = "NAME|FILE")]
    pub palette: Option<String>,

    /// Visibility/intensity settings file (JSON5)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Toggle catalog file (JSON5)
    #[arg(long, value_name = "FILE", conflicts_with = "standard_catalog")]
    pub catalog: Option<PathBuf>,

    /// Check against the built-in toggle catalog
    #[arg(long)]
    pub standard_catalog: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let mut checks = ValidationChecks::all_skipped();
        let mut messages = Vec::new();

        let style = match load_style_arg(&self.style) {
            Ok(style) => {
                checks.style = "passed".to_string();
                Some(style)
            }
            Err(e) if e.kind == ExitCode::ValidationError => {
                checks.style = "failed".to_string();
                messages.push(ValidationMessage::error(e.message));
                None
            }
            Err(e) => return Err(e),
        };

        if let Some(name) = &self.palette {
            let palette = load_palette_arg(name)?;
            match palette.validate() {
                Ok(()) => checks.palette = "passed".to_string(),
                Err(e) => {
                    checks.palette = "failed".to_string();
                    messages.push(ValidationMessage::error(e.to_string()));
                }
            }
        }

        if let Some(config) = load_config_arg(self.config.as_ref())? {
            match config.validate() {
                Ok(()) => checks.config = "passed".to_string(),
                Err(e) => {
                    checks.config = "failed".to_string();
                    messages.push(ValidationMessage::error(e.to_string()));
                }
            }
        }

        if let Some(catalog) = load_catalog_arg(self.catalog.as_ref(), self.standard_catalog)? {
            checks.catalog = "passed".to_string();
            for conflict in catalog.conflicts() {
                checks.catalog = "warning".to_string();
                messages.push(ValidationMessage::layer_warning(
                    &conflict.layer_id,
                    format!(
                        "claimed by toggles {}; '{}' wins",
                        conflict.toggles.join(", "),
                        conflict.toggles[0]
                    ),
                ));
            }
            if let Some(style) = &style {
                let bound = catalog.toggles.iter().flat_map(|t| &t.layers);
                for layer_id in unknown_layers(style, bound) {
                    checks.catalog = "warning".to_string();
                    messages.push(ValidationMessage::layer_warning(
                        layer_id,
                        "bound by the catalog but not present in the style",
                    ));
                }
            }
        }

        let response = ValidationResponse {
            valid: messages.iter().all(|m| m.severity != "error"),
            errors: messages,
            checks,
        };

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            print_human(&response);
        }

        if !response.valid {
            return Err(CliError::validation("Validation failed"));
        }
        Ok(())
    }
}

/// Catalog layer ids missing from the style, in catalog order without repeats.
fn unknown_layers<'a>(
    style: &StyleDocument,
    bound: impl Iterator<Item = &'a String>,
) -> Vec<&'a str> {
    let present: HashSet<&str> = style.layers.iter().map(|l| l.id.as_str()).collect();
    let mut seen = HashSet::new();
    bound
        .map(String::as_str)
        .filter(|id| !present.contains(id) && seen.insert(*id))
        .collect()
}

fn print_human(response: &ValidationResponse) {
    if response.valid {
        println!("✓ Validation passed");
    } else {
        println!("✗ Validation failed");
    }

    println!("\nChecks:");
    println!("  Style:   {}", response.checks.style);
    println!("  Palette: {}", response.checks.palette);
    println!("  Config:  {}", response.checks.config);
    println!("  Catalog: {}", response.checks.catalog);

    if !response.errors.is_empty() {
        println!("\nIssues:");
        for msg in &response.errors {
            let prefix = if msg.severity == "error" { "  ✗" } else { "  ⚠" };
            match &msg.layer {
                Some(layer) => println!("{prefix} [{layer}] {}", msg.message),
                None => println!("{prefix} {}", msg.message),
            }
        }
    }
}

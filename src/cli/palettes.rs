//! Palettes command: list the built-in palettes.

use clap::Args;
use serde::Serialize;

use crate::cli::common::{CliError, CliResult};
use crate::models::BuiltinPalettes;

/// List built-in palettes
#[derive(Debug, Clone, Args)]
pub struct PalettesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize, Debug)]
struct PaletteSummary<'a> {
    id: &'a str,
    name: &'a str,
    dark: bool,
    background: &'a str,
    text: &'a str,
    water: &'a str,
}

impl PalettesArgs {
    /// Execute the palettes command
    pub fn execute(&self) -> CliResult<()> {
        let builtins = BuiltinPalettes::load()
            .map_err(|e| CliError::io(format!("Failed to load built-in palettes: {e}")))?;

        let summaries: Vec<PaletteSummary> = builtins
            .palettes
            .iter()
            .map(|p| PaletteSummary {
                id: &p.id,
                name: p.display_name(),
                dark: p.is_dark(),
                background: &p.background,
                text: &p.text,
                water: &p.water,
            })
            .collect();

        if self.json {
            let json = serde_json::to_string_pretty(&summaries)
                .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
            println!("{json}");
            return Ok(());
        }

        println!("Built-in palettes ({}):", summaries.len());
        for summary in &summaries {
            let tone = if summary.dark { "dark" } else { "light" };
            println!(
                "  {:<10} {:<12} {:<5}  background {}  water {}",
                summary.id, summary.name, tone, summary.background, summary.water
            );
        }
        Ok(())
    }
}

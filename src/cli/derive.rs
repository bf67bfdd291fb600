//! Derive command: base style + palette + settings -> render-ready style.

use clap::Args;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::cli::common::{
    load_catalog_arg, load_config_arg, load_palette_arg, load_style_arg, CliError, CliResult,
};
use crate::config::Config;
use crate::engine::StyleDeriver;
use crate::parser::{save_style, style_to_string};

/// Derive a styled map from a base style
#[derive(Debug, Clone, Args)]
pub struct DeriveArgs {
    /// Base style JSON file
    #[arg(short, long, value_name = "FILE")]
    pub style: PathBuf,

    /// Built-in palette name or palette file (defaults to the configured palette)
    #[arg(short, long, value_name = "NAME|FILE")]
    pub palette: Option<String>,

    /// Visibility/intensity settings file (JSON5)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Toggle catalog file (JSON5)
    #[arg(long, value_name = "FILE", conflicts_with = "standard_catalog")]
    pub catalog: Option<PathBuf>,

    /// Use the built-in toggle catalog
    #[arg(long)]
    pub standard_catalog: bool,

    /// Write the derived style here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Pretty-print the output
    #[arg(long)]
    pub pretty: bool,
}

impl DeriveArgs {
    /// Execute the derive command
    pub fn execute(&self) -> CliResult<()> {
        let app_config = Config::load()
            .map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))?;

        let base = load_style_arg(&self.style)?;
        let palette_name = self
            .palette
            .as_deref()
            .unwrap_or(&app_config.derive.default_palette);
        let palette = load_palette_arg(palette_name)?;
        let visibility = load_config_arg(self.config.as_ref())?;
        let catalog = load_catalog_arg(self.catalog.as_ref(), self.standard_catalog)?;

        if let Some(catalog) = &catalog {
            for conflict in catalog.conflicts() {
                warn!(
                    layer = %conflict.layer_id,
                    toggles = ?conflict.toggles,
                    "layer claimed by several toggles, the first one wins"
                );
            }
        }
        if visibility.is_none() && catalog.is_some() {
            warn!("toggle catalog ignored without --config");
        }

        let mut deriver = StyleDeriver::new(&palette).with_locator(&app_config.contours);
        if let Some(visibility) = &visibility {
            deriver = deriver.with_config(visibility);
        }
        if let Some(catalog) = &catalog {
            deriver = deriver.with_catalog(catalog);
        }
        let derived = deriver.derive(&base)?;

        info!(
            palette = palette.display_name(),
            base_layers = base.layers.len(),
            derived_layers = derived.layers.len(),
            "derived style"
        );

        let pretty = self.pretty || app_config.derive.pretty;
        match &self.output {
            Some(path) => save_style(&derived, path, pretty)
                .map_err(|e| CliError::io(format!("{e:#}")))?,
            None => {
                let json = style_to_string(&derived, pretty)
                    .map_err(|e| CliError::io(format!("{e:#}")))?;
                println!("{json}");
            }
        }

        Ok(())
    }
}

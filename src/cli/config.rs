//! Configuration management CLI commands.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::models::BuiltinPalettes;
use clap::{Args, Subcommand};
use serde::Serialize;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Built-in palette used when --palette is omitted
    #[arg(long, value_name = "NAME")]
    default_palette: Option<String>,

    /// Pretty-print derived styles by default
    #[arg(long, value_name = "BOOL")]
    pretty: Option<bool>,

    /// Contour TileJSON URL template (may contain {key})
    #[arg(long, value_name = "URL")]
    contour_url: Option<String>,

    /// Environment variable holding the contour API key
    #[arg(long, value_name = "VAR")]
    contour_key_env: Option<String>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    config_file: Option<String>,
    derive: DeriveOutput,
    contours: ContoursOutput,
}

#[derive(Serialize, Debug)]
struct DeriveOutput {
    default_palette: String,
    pretty: bool,
}

#[derive(Serialize, Debug)]
struct ContoursOutput {
    url: String,
    api_key_env: String,
    api_key_available: bool,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            output_json(&config)?;
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.default_palette.is_none()
            && self.pretty.is_none()
            && self.contour_url.is_none()
            && self.contour_key_env.is_none()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --default-palette, --pretty, --contour-url, or --contour-key-env",
            ));
        }

        let mut config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if let Some(name) = &self.default_palette {
            let builtins = BuiltinPalettes::load()
                .map_err(|e| CliError::io(format!("Failed to load built-in palettes: {e}")))?;
            let palette = builtins.find(name).ok_or_else(|| {
                CliError::validation(format!("Unknown built-in palette: {name}"))
            })?;
            config.derive.default_palette.clone_from(&palette.id);
        }

        if let Some(pretty) = self.pretty {
            config.derive.pretty = pretty;
        }

        if let Some(url) = &self.contour_url {
            config.contours.url = url.trim().to_string();
        }

        if let Some(var) = &self.contour_key_env {
            if var.trim().is_empty() {
                return Err(CliError::validation(
                    "Contour key variable name must not be empty",
                ));
            }
            config.contours.api_key_env = var.trim().to_string();
        }

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

fn config_output(config: &Config) -> ConfigOutput {
    ConfigOutput {
        config_file: Config::config_file_path()
            .ok()
            .map(|p| p.to_string_lossy().to_string()),
        derive: DeriveOutput {
            default_palette: config.derive.default_palette.clone(),
            pretty: config.derive.pretty,
        },
        contours: ContoursOutput {
            url: config.contours.url.clone(),
            api_key_env: config.contours.api_key_env.clone(),
            api_key_available: config.contours.api_key().is_some(),
        },
    }
}

/// Output configuration in JSON format
fn output_json(config: &Config) -> CliResult<()> {
    let json = serde_json::to_string_pretty(&config_output(config))
        .map_err(|e| CliError::io(format!("Failed to serialize configuration to JSON: {e}")))?;

    println!("{json}");
    Ok(())
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    let output = config_output(config);

    println!("PosterStyle Configuration");
    println!("=========================");
    println!();

    if let Some(path) = &output.config_file {
        println!("File: {path}");
        println!();
    }

    println!("Derive:");
    println!("  Default Palette: {}", output.derive.default_palette);
    println!("  Pretty Output:   {}", output.derive.pretty);
    println!();

    println!("Contours:");
    println!("  URL:             {}", output.contours.url);
    println!("  Key Variable:    {}", output.contours.api_key_env);
    println!(
        "  Key Available:   {}",
        if output.contours.api_key_available { "yes" } else { "no" }
    );
    println!();
}

//! PosterStyle - derive render-ready map poster styles
//!
//! This binary loads a base style, a palette and optional visibility settings,
//! runs the style derivation engine and writes the derived style.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use posterstyle::cli::{ConfigArgs, DeriveArgs, PalettesArgs, ValidateArgs};
use posterstyle::constants::{APP_BINARY_NAME, APP_NAME};

/// PosterStyle - derive map poster styles from a base style and a palette
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging (debug level unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Derive a styled map from a base style
    Derive(DeriveArgs),
    /// Validate a base style, palette, settings and toggle catalog
    Validate(ValidateArgs),
    /// List built-in palettes
    Palettes(PalettesArgs),
    /// Show or change the application configuration
    Config(ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so derived JSON on stdout stays clean
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = match &cli.command {
        Command::Derive(args) => args.execute(),
        Command::Validate(args) => args.execute(),
        Command::Palettes(args) => args.execute(),
        Command::Config(args) => args.execute(),
    };

    if let Err(err) = result {
        eprintln!("{APP_NAME}: {err}");
        std::process::exit(err.exit_code());
    }
}

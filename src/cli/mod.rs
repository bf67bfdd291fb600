//! CLI command handlers for PosterStyle.
//!
//! Each subcommand is a clap `Args` struct with an `execute` method returning
//! a [`CliResult`]; `main.rs` maps errors onto process exit codes.

pub mod common;
pub mod config;
pub mod derive;
pub mod palettes;
pub mod validate;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use derive::DeriveArgs;
pub use palettes::PalettesArgs;
pub use validate::ValidateArgs;

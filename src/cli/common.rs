//! Shared CLI plumbing: error type, exit codes, input loading helpers and the
//! JSON shapes printed by `--json` output.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::StyleError;
use crate::models::{BuiltinPalettes, Palette, StyleDocument, ToggleCatalog, VisibilityConfig};
use crate::parser;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Input violated a contract (bad layer, missing palette slot, unknown name)
    ValidationError = 1,
    /// File could not be read, parsed or written
    IoError = 2,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code category
    pub kind: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Creates a validation error (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// Creates an I/O error (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// Numeric process exit code.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.kind.code()
    }

    /// Classifies a loader error: contract violations are validation errors,
    /// everything else (missing file, bad JSON) is I/O.
    #[must_use]
    pub fn from_load_error(error: &anyhow::Error) -> Self {
        let message = format!("{error:#}");
        match error.downcast_ref::<StyleError>() {
            Some(StyleError::Json(_)) | None => Self::io(message),
            Some(_) => Self::validation(message),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl From<StyleError> for CliError {
    fn from(error: StyleError) -> Self {
        match error {
            StyleError::Json(_) => Self::io(error.to_string()),
            _ => Self::validation(error.to_string()),
        }
    }
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Loads a style file.
pub fn load_style_arg(path: &Path) -> CliResult<StyleDocument> {
    parser::load_style(path).map_err(|e| CliError::from_load_error(&e))
}

/// Resolves `--palette`: a file path, or a built-in palette id/name.
pub fn load_palette_arg(name_or_path: &str) -> CliResult<Palette> {
    if Path::new(name_or_path).is_file() {
        return parser::load_palette(Path::new(name_or_path))
            .map_err(|e| CliError::io(format!("{e:#}")));
    }
    let builtins = BuiltinPalettes::load()
        .map_err(|e| CliError::io(format!("Failed to load built-in palettes: {e}")))?;
    parser::resolve_palette(name_or_path, &builtins)
        .map_err(|e| CliError::validation(format!("{e:#}")))
}

/// Loads `--config` when given.
pub fn load_config_arg(path: Option<&PathBuf>) -> CliResult<Option<VisibilityConfig>> {
    path.map(|path| {
        parser::load_visibility_config(path).map_err(|e| CliError::io(format!("{e:#}")))
    })
    .transpose()
}

/// Loads `--catalog`, or the standard catalog when `standard` is set.
pub fn load_catalog_arg(
    path: Option<&PathBuf>,
    standard: bool,
) -> CliResult<Option<ToggleCatalog>> {
    if let Some(path) = path {
        return parser::load_toggle_catalog(path)
            .map(Some)
            .map_err(|e| CliError::io(format!("{e:#}")));
    }
    if standard {
        return ToggleCatalog::standard()
            .map(Some)
            .map_err(|e| CliError::io(format!("Failed to load standard toggle catalog: {e}")));
    }
    Ok(None)
}

/// One finding of `validate`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationMessage {
    /// "error" or "warning"
    pub severity: String,
    /// Human-readable description
    pub message: String,
    /// Layer the finding is about, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
}

impl ValidationMessage {
    /// Creates an error finding.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: "error".to_string(),
            message: message.into(),
            layer: None,
        }
    }

    /// Creates a warning finding about a layer.
    pub fn layer_warning(layer: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: "warning".to_string(),
            message: message.into(),
            layer: Some(layer.into()),
        }
    }
}

/// Status of each validation check ("passed", "failed", "warning", "skipped").
#[derive(Debug, Clone, Serialize)]
pub struct ValidationChecks {
    /// Style document contract
    pub style: String,
    /// Palette required slots
    pub palette: String,
    /// Visibility settings
    pub config: String,
    /// Toggle catalog consistency
    pub catalog: String,
}

impl ValidationChecks {
    /// All checks skipped.
    #[must_use]
    pub fn all_skipped() -> Self {
        let skipped = || "skipped".to_string();
        Self {
            style: skipped(),
            palette: skipped(),
            config: skipped(),
            catalog: skipped(),
        }
    }
}

/// Full `validate --json` output.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResponse {
    /// No errors were found
    pub valid: bool,
    /// Errors and warnings
    pub errors: Vec<ValidationMessage>,
    /// Per-check status
    pub checks: ValidationChecks,
}

//! Data models for styles, palettes and toggle configuration.
//!
//! This module contains the value objects consumed and produced by the
//! derivation engine. Models are independent of the engine and the CLI.

pub mod palette;
pub mod rgb;
pub mod style;
pub mod toggles;

// Re-export all model types
pub use palette::{BuiltinPalettes, ColorRole, GridSlot, Palette, PaletteSlot, RoadClass, RoadRamp};
pub use rgb::RgbColor;
pub use style::{Layer, LayerType, StyleDocument};
pub use toggles::{ToggleBinding, ToggleCatalog, ToggleConflict, VisibilityConfig};

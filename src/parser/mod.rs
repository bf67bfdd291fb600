//! File loading and saving.
//!
//! Style documents are strict JSON. Palettes, visibility settings and toggle
//! catalogs are JSON5 so they can be written by hand.

pub mod inputs;
pub mod style;

// Re-export commonly used functions
pub use inputs::{load_palette, load_toggle_catalog, load_visibility_config, resolve_palette};
pub use style::{load_style, save_style, style_to_string};

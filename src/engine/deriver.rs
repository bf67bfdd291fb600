//! Style derivation pipeline.
//!
//! The stages run in a fixed order over a private copy of the base style:
//!
//! 1. contour source availability (may remove layers)
//! 2. hillshade/water ordering
//! 3. visibility toggles (full with a catalog, underwater-only without)
//! 4. paint, then layout, for every remaining layer
//!
//! Inputs are validated up front, so a derivation either returns a complete
//! style or an error and never a partial result.

use tracing::debug;

use super::category::LayerCategory;
use super::layout::apply_layout;
use super::ordering::normalize_layer_order;
use super::paint::apply_paint;
use super::sources::{resolve_contour_source, NoLocator, SourceLocator};
use super::visibility::{apply_underwater_visibility, apply_visibility};
use crate::error::StyleResult;
use crate::models::{Palette, StyleDocument, ToggleCatalog, VisibilityConfig};

/// Derives render-ready styles from a base style and a palette.
///
/// # Examples
///
/// ```
/// use posterstyle::engine::StyleDeriver;
/// use posterstyle::models::{BuiltinPalettes, StyleDocument};
///
/// let palettes = BuiltinPalettes::load().unwrap();
/// let palette = palettes.find("paper").unwrap();
/// let base = StyleDocument::from_json_str(
///     r#"{"version": 8, "sources": {}, "layers": [{"id": "background", "type": "background"}]}"#,
/// )
/// .unwrap();
///
/// let derived = StyleDeriver::new(palette).derive(&base).unwrap();
/// assert_eq!(derived.layers[0].paint["background-color"], palette.background.as_str());
/// ```
pub struct StyleDeriver<'a> {
    palette: &'a Palette,
    config: Option<&'a VisibilityConfig>,
    catalog: Option<&'a ToggleCatalog>,
    locator: &'a dyn SourceLocator,
}

impl<'a> StyleDeriver<'a> {
    /// Creates a deriver with no live config, no catalog and no source locator.
    #[must_use]
    pub fn new(palette: &'a Palette) -> Self {
        Self {
            palette,
            config: None,
            catalog: None,
            locator: &NoLocator,
        }
    }

    /// Uses live visibility/intensity settings.
    #[must_use]
    pub fn with_config(mut self, config: &'a VisibilityConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Uses a toggle catalog (only effective together with a config).
    #[must_use]
    pub fn with_catalog(mut self, catalog: &'a ToggleCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Uses a locator for the contour source.
    #[must_use]
    pub fn with_locator(mut self, locator: &'a dyn SourceLocator) -> Self {
        self.locator = locator;
        self
    }

    /// Derives a new style. `base` is never modified.
    ///
    /// # Errors
    ///
    /// Returns an error when a layer lacks `id`/`type`, the palette lacks a
    /// required slot, or the config holds an out-of-range value.
    pub fn derive(&self, base: &StyleDocument) -> StyleResult<StyleDocument> {
        base.validate()?;
        self.palette.validate()?;
        if let Some(config) = self.config {
            config.validate()?;
        }

        let mut style = base.clone();

        let resolution = resolve_contour_source(&mut style, self.locator);
        let reordered = normalize_layer_order(&mut style.layers);

        match (self.config, self.catalog) {
            (Some(config), Some(catalog)) => {
                apply_visibility(&mut style.layers, config, catalog);
            }
            (Some(config), None) => {
                apply_underwater_visibility(&mut style.layers, config);
            }
            (None, _) => {}
        }

        let mut untouched = 0;
        for layer in &mut style.layers {
            let category = LayerCategory::of(layer);
            if category == LayerCategory::Unrecognized {
                untouched += 1;
            }
            apply_paint(layer, category, self.palette, self.config);
            apply_layout(layer, self.config);
        }

        debug!(
            palette = self.palette.display_name(),
            ?resolution,
            reordered,
            layers = style.layers.len(),
            untouched,
            "derived style"
        );
        Ok(style)
    }
}

/// One-shot derivation without a source locator.
///
/// # Errors
///
/// See [`StyleDeriver::derive`].
pub fn derive_style(
    base: &StyleDocument,
    palette: &Palette,
    config: Option<&VisibilityConfig>,
    catalog: Option<&ToggleCatalog>,
) -> StyleResult<StyleDocument> {
    let mut deriver = StyleDeriver::new(palette);
    if let Some(config) = config {
        deriver = deriver.with_config(config);
    }
    if let Some(catalog) = catalog {
        deriver = deriver.with_catalog(catalog);
    }
    deriver.derive(base)
}

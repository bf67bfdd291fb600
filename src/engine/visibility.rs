//! Visibility toggles.
//!
//! Every layer is governed by at most one toggle of the catalog. Underwater
//! terrain is the exception: its visibility always follows the
//! `terrainUnderWater` toggle, even when a catalog binding names another
//! toggle for the same layer.

use tracing::debug;

use crate::models::toggles::TOGGLE_TERRAIN_UNDER_WATER;
use crate::models::{Layer, ToggleCatalog, VisibilityConfig};

/// Layer id fragment marking underwater terrain.
pub const UNDERWATER_MARKER: &str = "bathymetry";

/// Whether a layer draws underwater terrain.
#[must_use]
pub fn is_underwater_terrain(layer: &Layer) -> bool {
    layer.id.to_ascii_lowercase().contains(UNDERWATER_MARKER)
}

/// Whether underwater terrain is shown (on unless explicitly switched off).
#[must_use]
pub fn underwater_terrain_enabled(config: &VisibilityConfig) -> bool {
    config.is_on(TOGGLE_TERRAIN_UNDER_WATER, true)
}

/// Sets an explicit visibility on every layer.
///
/// Layers owned by no toggle are shown. Owned layers follow their toggle,
/// and a toggle missing from `config` counts as on. Returns the number of
/// hidden layers.
pub fn apply_visibility(
    layers: &mut [Layer],
    config: &VisibilityConfig,
    catalog: &ToggleCatalog,
) -> usize {
    let owners = catalog.owners();
    let underwater = underwater_terrain_enabled(config);
    let mut hidden = 0;

    for layer in layers.iter_mut() {
        let visible = if is_underwater_terrain(layer) {
            underwater
        } else {
            owners
                .get(layer.id.as_str())
                .map_or(true, |toggle| config.is_on(toggle, true))
        };
        layer.set_visible(visible);
        if !visible {
            hidden += 1;
        }
    }

    debug!(hidden, total = layers.len(), "applied visibility toggles");
    hidden
}

/// Degraded mode without a catalog: only underwater terrain is touched,
/// every other layer keeps its authored visibility.
pub fn apply_underwater_visibility(layers: &mut [Layer], config: &VisibilityConfig) -> usize {
    let visible = underwater_terrain_enabled(config);
    let mut touched = 0;
    for layer in layers.iter_mut().filter(|layer| is_underwater_terrain(layer)) {
        layer.set_visible(visible);
        touched += 1;
    }
    debug!(touched, visible, "applied underwater terrain visibility");
    touched
}

//! Hillshade/water render order correction.
//!
//! Terrain shading must render beneath water so that the water fill occludes
//! it. Base styles are not trusted to get this right.

use tracing::debug;

use super::category::UNDERWATER_DECORATION_MARKERS;
use crate::models::{Layer, LayerType};

/// Sub-layer name of water polygons in the bundled tile schema.
pub const WATER_SOURCE_LAYER: &str = "water";

/// Whether a layer is a water polygon fill.
///
/// A fill counts when it draws the `water` sub-layer or its id names water,
/// unless the id marks an underwater decoration such as a gradient.
#[must_use]
pub fn is_water_fill(layer: &Layer) -> bool {
    if layer.layer_type != LayerType::Fill {
        return false;
    }
    let id = layer.id.to_ascii_lowercase();
    if UNDERWATER_DECORATION_MARKERS
        .iter()
        .any(|marker| id.contains(marker))
    {
        return false;
    }
    layer.source_layer.as_deref() == Some(WATER_SOURCE_LAYER) || id.contains("water")
}

/// Moves every hillshade layer drawn after the first water fill to just
/// before it, keeping the hillshade layers' relative order.
///
/// Returns true when the order changed. Running it twice is a no-op the
/// second time.
pub fn normalize_layer_order(layers: &mut Vec<Layer>) -> bool {
    let Some(first_water) = layers.iter().position(is_water_fill) else {
        return false;
    };

    let misplaced: Vec<usize> = layers
        .iter()
        .enumerate()
        .skip(first_water + 1)
        .filter(|(_, layer)| layer.layer_type == LayerType::Hillshade)
        .map(|(index, _)| index)
        .collect();
    if misplaced.is_empty() {
        return false;
    }

    // Remove back to front so earlier indices stay valid.
    let mut moved: Vec<Layer> = misplaced
        .iter()
        .rev()
        .map(|&index| layers.remove(index))
        .collect();
    moved.reverse();

    for (offset, layer) in moved.into_iter().enumerate() {
        debug!(
            layer = %layer.id,
            before = %layers[first_water + offset].id,
            "moving hillshade beneath water"
        );
        layers.insert(first_water + offset, layer);
    }
    true
}

//! Symbol layout: label sizing, wrapping and collision flags.

use serde_json::{json, Value};

use super::expression::scale_value;
use crate::models::{Layer, LayerType, VisibilityConfig};

/// Symbol layer whose collision handling belongs to the marker overlay.
pub const MARKER_LAYER_ID: &str = "user-markers";

/// `text-padding` applied to every label layer.
pub const TEXT_PADDING: f64 = 2.0;

/// Rewrites label layout properties of a symbol layer.
///
/// Non-symbol layers and [`MARKER_LAYER_ID`] are left untouched.
pub fn apply_layout(layer: &mut Layer, config: Option<&VisibilityConfig>) {
    if layer.layer_type != LayerType::Symbol || layer.id == MARKER_LAYER_ID {
        return;
    }

    if let Some(config) = config {
        if let Some(width) = config.label_max_width {
            set(layer, "text-max-width", json!(width));
        }
        #[allow(clippy::float_cmp)]
        let scaled = config.label_size != 1.0;
        if scaled {
            if let Some(size) = layer.layout.get("text-size") {
                let size = scale_value(size, config.label_size);
                set(layer, "text-size", size);
            }
        }
    }

    set(layer, "text-padding", json!(TEXT_PADDING));
    set(layer, "text-allow-overlap", json!(false));
    set(layer, "text-ignore-placement", json!(false));
}

fn set(layer: &mut Layer, key: &str, value: Value) {
    layer.layout.insert(key.to_string(), value);
}

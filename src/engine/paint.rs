//! Per-layer paint rewriting.
//!
//! Each [`LayerCategory`] maps to exactly one rule. Colors come from the
//! palette through the [`ColorRole`] fallback chains, never from ad hoc
//! slot lookups, so categories sharing a role stay consistent.

use serde_json::{json, Value};

use super::category::{LabelRank, LayerCategory, RoadLine};
use super::contours::{elevation_property, ContourFilter, ContourRole, DEFAULT_ELEVATION_PROPERTY};
use super::expression::scale_value;
use super::visibility::underwater_terrain_enabled;
use crate::models::toggles::TOGGLE_LABELS;
use crate::models::{ColorRole, Layer, Palette, PaletteSlot, RgbColor, VisibilityConfig};

/// Lowest opacity a water fill may have.
pub const WATER_MIN_OPACITY: f64 = 0.95;
/// Opacity of glow sub-layers once a palette is applied.
pub const GLOW_OPACITY: f64 = 0.01;
/// Opacity of population heat when the base style sets none.
pub const POPULATION_DEFAULT_OPACITY: f64 = 0.5;
/// Road width factor applied while labels are on.
pub const LABELED_ROAD_FACTOR: f64 = 0.8;
/// Text opacity when the base style sets none.
pub const DEFAULT_TEXT_OPACITY: f64 = 1.0;

const DARK_BATHYMETRY_LIGHTEN: f64 = 0.3;
const LIGHT_BATHYMETRY_DARKEN: f64 = 0.25;

/// Halo width and blur for a label rank.
#[must_use]
pub const fn halo_for(rank: LabelRank) -> (f64, f64) {
    match rank {
        LabelRank::Country => (2.5, 1.0),
        LabelRank::State => (2.0, 0.75),
        LabelRank::City => (1.5, 0.5),
    }
}

/// Width factor for road lines under the given config.
///
/// Labels count as on unless the toggle is explicitly off, matching the
/// visibility stage.
#[must_use]
pub fn road_width_factor(config: &VisibilityConfig) -> f64 {
    let thinning = if config.is_on(TOGGLE_LABELS, true) {
        LABELED_ROAD_FACTOR
    } else {
        1.0
    };
    config.road_weight * thinning
}

fn set(layer: &mut Layer, key: &str, value: Value) {
    layer.paint.insert(key.to_string(), value);
}

fn set_color(layer: &mut Layer, color: &str) {
    if let Some(key) = layer.layer_type.color_property() {
        set(layer, key, json!(color));
    }
}

fn set_opacity_if_absent(layer: &mut Layer, opacity: f64) {
    if let Some(key) = layer.layer_type.opacity_property() {
        if !layer.paint.contains_key(key) {
            set(layer, key, json!(opacity));
        }
    }
}

/// Rewrites a layer's paint for its category.
pub fn apply_paint(
    layer: &mut Layer,
    category: LayerCategory,
    palette: &Palette,
    config: Option<&VisibilityConfig>,
) {
    match category {
        LayerCategory::Background => set(layer, "background-color", json!(palette.background)),
        LayerCategory::Hillshade => paint_hillshade(layer, palette, config),
        LayerCategory::WaterFill => paint_water(layer, palette, config),
        LayerCategory::WaterLine => set_color(layer, palette.color(ColorRole::WaterLine)),
        LayerCategory::Bathymetry { glow } => paint_bathymetry(layer, palette, glow),
        LayerCategory::Park => set_color(layer, palette.color(ColorRole::Park)),
        LayerCategory::Landuse => set_color(layer, palette.color(ColorRole::Landuse)),
        LayerCategory::ContourLine { index } => {
            let role = if index {
                ColorRole::ContourIndex
            } else {
                ColorRole::Contour
            };
            set_color(layer, palette.color(role));
            regenerate_contour_filter(layer, config);
        }
        LayerCategory::ContourLabel => {
            set_color(layer, palette.color(ColorRole::ContourIndex));
            set(layer, "text-halo-color", json!(palette.background));
            regenerate_contour_filter(layer, config);
        }
        LayerCategory::Population => {
            set_color(layer, palette.color(ColorRole::Population));
            set_opacity_if_absent(layer, POPULATION_DEFAULT_OPACITY);
        }
        LayerCategory::Road(road) => paint_road(layer, road, palette, config),
        LayerCategory::LooseLine { major } => {
            let role = if major {
                ColorRole::MajorLine
            } else {
                ColorRole::MinorLine
            };
            set_color(layer, palette.color(role));
        }
        LayerCategory::Building => set_color(layer, palette.color(ColorRole::Building)),
        LayerCategory::Boundary => set_color(layer, palette.color(ColorRole::Boundary)),
        LayerCategory::Label(rank) => paint_label(layer, rank, palette),
        LayerCategory::Grid => {
            if let Some(grid) = &palette.grid {
                set(layer, "line-color", json!(grid.color));
                set(layer, "line-opacity", json!(grid.opacity));
            }
        }
        LayerCategory::Unrecognized => {}
    }
}

fn paint_hillshade(layer: &mut Layer, palette: &Palette, config: Option<&VisibilityConfig>) {
    let (shadow, highlight, accent) = match palette.slot(PaletteSlot::Hillshade) {
        Some(tint) => (tint, palette.background.as_str(), tint),
        None => {
            let relief = palette.color(ColorRole::Relief);
            if palette.is_dark() {
                (palette.background.as_str(), relief, relief)
            } else {
                (relief, palette.background.as_str(), relief)
            }
        }
    };
    set(layer, "hillshade-shadow-color", json!(shadow));
    set(layer, "hillshade-highlight-color", json!(highlight));
    set(layer, "hillshade-accent-color", json!(accent));

    if let Some(exaggeration) = config.and_then(|c| c.hillshade_exaggeration) {
        set(
            layer,
            "hillshade-exaggeration",
            json!(exaggeration.clamp(0.0, 1.0)),
        );
    }
}

fn paint_water(layer: &mut Layer, palette: &Palette, config: Option<&VisibilityConfig>) {
    set_color(layer, &palette.water);
    let Some(key) = layer.layer_type.opacity_property() else {
        return;
    };
    let opacity = if config.is_some_and(|c| !underwater_terrain_enabled(c)) {
        1.0
    } else {
        layer
            .paint_number(key)
            .map_or(WATER_MIN_OPACITY, |authored| authored.max(WATER_MIN_OPACITY))
    };
    set(layer, key, json!(opacity));
}

/// Water tone shifted away from the background: lighter on dark palettes,
/// darker on light ones. Non-hex water colors are used as they are.
#[must_use]
pub fn bathymetry_tone(palette: &Palette) -> String {
    match RgbColor::from_hex(&palette.water) {
        Ok(water) if palette.is_dark() => water.mix(RgbColor::WHITE, DARK_BATHYMETRY_LIGHTEN).to_hex(),
        Ok(water) => water.mix(RgbColor::BLACK, LIGHT_BATHYMETRY_DARKEN).to_hex(),
        Err(_) => palette.water.clone(),
    }
}

fn paint_bathymetry(layer: &mut Layer, palette: &Palette, glow: bool) {
    set_color(layer, &bathymetry_tone(palette));
    if glow {
        if let Some(key) = layer.layer_type.opacity_property() {
            set(layer, key, json!(GLOW_OPACITY));
        }
    }
}

fn paint_road(
    layer: &mut Layer,
    road: RoadLine,
    palette: &Palette,
    config: Option<&VisibilityConfig>,
) {
    let color = if road.bridge && road.casing {
        palette.background.as_str()
    } else {
        match road.class {
            Some(class) => palette.road(class),
            None if road.major => palette.color(ColorRole::MajorLine),
            None => palette.color(ColorRole::MinorLine),
        }
    };
    set_color(layer, color);

    if let Some(config) = config {
        if let Some(width) = layer.paint.get("line-width") {
            let scaled = scale_value(width, road_width_factor(config));
            set(layer, "line-width", scaled);
        }
    }
}

fn paint_label(layer: &mut Layer, rank: LabelRank, palette: &Palette) {
    let (halo_width, halo_blur) = halo_for(rank);
    set(layer, "text-color", json!(palette.text));
    set(layer, "text-halo-color", json!(palette.background));
    set(layer, "text-halo-width", json!(halo_width));
    set(layer, "text-halo-blur", json!(halo_blur));
    set_opacity_if_absent(layer, DEFAULT_TEXT_OPACITY);
}

fn regenerate_contour_filter(layer: &mut Layer, config: Option<&VisibilityConfig>) {
    let Some(config) = config else {
        return;
    };
    let property = layer
        .filter
        .as_ref()
        .and_then(elevation_property)
        .unwrap_or(DEFAULT_ELEVATION_PROPERTY)
        .to_string();
    let role = ContourRole::for_layer(&layer.id, &layer.layer_type);
    let filter = ContourFilter::new(&property, config.contour_interval, role);
    layer.filter = Some(filter.expression());
}

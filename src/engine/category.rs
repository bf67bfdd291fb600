//! Layer classification.
//!
//! Each layer is classified once, from its id and render type, into a closed
//! set of categories. The paint updater then applies one rule per category.

use regex::Regex;
use std::sync::LazyLock;

use super::ordering::is_water_fill;
use crate::models::{Layer, LayerType, RoadClass};

/// Id markers of decorative underwater layers (never the water body itself).
pub const UNDERWATER_DECORATION_MARKERS: &[&str] = &["bathymetry", "shoreline", "gradient"];

/// Ids that name a road-like line.
static ROAD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(road|roads|street|highway|bridge|tunnel|motorway|trunk|primary|secondary|tertiary|residential|minor|major|service|track|path|link)\b",
    )
    .expect("road pattern is valid")
});

/// Class-bearing tokens, in the order they are looked for.
static ROAD_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(motorway|trunk|primary|secondary|tertiary|residential|minor|street|service|track|path)\b",
    )
    .expect("road class pattern is valid")
});

/// Ids whose unclassified lines take the major color.
static MAJOR_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(major|main|highway|rail|railway)\b").expect("major line pattern is valid")
});

/// Label importance, used to size halos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRank {
    /// Country names
    Country,
    /// States, provinces, regions
    State,
    /// Cities and everything else
    City,
}

/// A road-like line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoadLine {
    /// Class from the id, if one is named
    pub class: Option<RoadClass>,
    /// Casing (outline) layer
    pub casing: bool,
    /// Bridge layer
    pub bridge: bool,
    /// Named as a major line (used when no class is named)
    pub major: bool,
}

/// Paint category of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerCategory {
    /// Background layer
    Background,
    /// Hillshade layer
    Hillshade,
    /// Water polygons
    WaterFill,
    /// Rivers and water outlines
    WaterLine,
    /// Underwater terrain, gradients and shoreline glow
    Bathymetry {
        /// Decorative glow sub-layer
        glow: bool,
    },
    /// Parks and woodland
    Park,
    /// Land use / land cover
    Landuse,
    /// Contour lines
    ContourLine {
        /// Index (major) contour
        index: bool,
    },
    /// Contour elevation labels
    ContourLabel,
    /// Population heat
    Population,
    /// Roads, bridges and tunnels
    Road(RoadLine),
    /// Line not matched by anything else
    LooseLine {
        /// Named as a major line
        major: bool,
    },
    /// Buildings
    Building,
    /// Administrative boundaries
    Boundary,
    /// Text labels
    Label(LabelRank),
    /// Grid overlay
    Grid,
    /// Left untouched
    Unrecognized,
}

/// Lowercase id with `_` normalised to `-` so `\b` splits on both.
fn normalized_id(id: &str) -> String {
    id.to_ascii_lowercase().replace('_', "-")
}

fn road_class(id: &str) -> Option<RoadClass> {
    let token = ROAD_CLASS.captures(id)?.get(1)?.as_str();
    match token {
        "motorway" => Some(RoadClass::Motorway),
        "trunk" => Some(RoadClass::Trunk),
        "primary" => Some(RoadClass::Primary),
        "secondary" => Some(RoadClass::Secondary),
        "tertiary" => Some(RoadClass::Tertiary),
        "residential" | "minor" | "street" => Some(RoadClass::Residential),
        "service" | "track" | "path" => Some(RoadClass::Service),
        _ => None,
    }
}

fn label_rank(id: &str) -> LabelRank {
    if id.contains("country") {
        LabelRank::Country
    } else if id.contains("state") || id.contains("province") || id.contains("region") {
        LabelRank::State
    } else {
        LabelRank::City
    }
}

fn contains_any(id: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| id.contains(n))
}

impl LayerCategory {
    /// Classifies a layer.
    #[must_use]
    pub fn of(layer: &Layer) -> Self {
        let id = normalized_id(&layer.id);
        let ty = &layer.layer_type;
        let is_line = *ty == LayerType::Line;
        let is_fill = *ty == LayerType::Fill;

        match ty {
            LayerType::Background => return Self::Background,
            LayerType::Hillshade => return Self::Hillshade,
            _ => {}
        }

        if is_water_fill(layer) {
            return Self::WaterFill;
        }

        if *ty != LayerType::Symbol && contains_any(&id, UNDERWATER_DECORATION_MARKERS) {
            return Self::Bathymetry {
                glow: id.contains("glow"),
            };
        }

        if id.contains("contour") {
            return match ty {
                LayerType::Symbol => Self::ContourLabel,
                LayerType::Line => Self::ContourLine {
                    index: id.contains("index"),
                },
                _ => Self::Unrecognized,
            };
        }

        if id.contains("population") {
            return Self::Population;
        }

        if *ty == LayerType::Symbol {
            return Self::Label(label_rank(&id));
        }

        if is_line && id.contains("water") {
            return Self::WaterLine;
        }

        if is_line && contains_any(&id, &["grid", "graticule"]) {
            return Self::Grid;
        }

        if id.contains("building") {
            return Self::Building;
        }

        if is_line && contains_any(&id, &["boundary", "admin"]) {
            return Self::Boundary;
        }

        if (is_fill || is_line) && contains_any(&id, &["park", "forest", "wood"]) {
            return Self::Park;
        }

        if is_fill && contains_any(&id, &["landuse", "landcover"]) {
            return Self::Landuse;
        }

        if is_line {
            let major = MAJOR_LINE.is_match(&id);
            if ROAD_LINE.is_match(&id) {
                return Self::Road(RoadLine {
                    class: road_class(&id),
                    casing: id.contains("casing"),
                    bridge: id.contains("bridge"),
                    major,
                });
            }
            return Self::LooseLine { major };
        }

        Self::Unrecognized
    }
}

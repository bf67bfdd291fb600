//! Zoom-banded contour density filters.
//!
//! Contour layers come in roles: index (major) lines, regular (minor) lines,
//! labels, and a `simple` variant that ignores zoom. For the banded roles the
//! filter coarsens at low zoom regardless of the user's density:
//!
//! | zoom        | index / label        | regular                          |
//! |-------------|----------------------|----------------------------------|
//! | `>= 13`     | multiple of `d * 5`  | multiple of `d`, not of `d * 5`  |
//! | `11 ..< 13` | multiple of 500      | not a multiple of 500            |
//! | `< 11`      | multiple of 1000     | multiple of 200, not of 1000     |
//!
//! Index and regular predicates never overlap within a band.

use serde_json::{json, Value};

use crate::models::LayerType;

/// Property read when the base filter does not name one.
pub const DEFAULT_ELEVATION_PROPERTY: &str = "ele";

/// Zoom from which the user's density applies.
pub const DETAIL_ZOOM: f64 = 13.0;
/// Zoom from which the mid band applies.
pub const MID_ZOOM: f64 = 11.0;

const INDEX_MULTIPLIER: u32 = 5;
const MID_MAJOR_INTERVAL: u32 = 500;
const LOW_MAJOR_INTERVAL: u32 = 1000;
const LOW_MINOR_INTERVAL: u32 = 200;

/// What a contour layer draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContourRole {
    /// Elevation labels (placed on index lines)
    Label,
    /// Index (major) lines
    Index,
    /// Regular (minor) lines
    Regular,
    /// Single-band filter on the user's density
    Simple,
}

impl ContourRole {
    /// Role of a contour layer, derived from its id and type.
    #[must_use]
    pub fn for_layer(id: &str, layer_type: &LayerType) -> Self {
        let id = id.to_ascii_lowercase();
        if *layer_type == LayerType::Symbol || id.contains("label") {
            Self::Label
        } else if id.contains("simple") {
            Self::Simple
        } else if id.contains("index") {
            Self::Index
        } else {
            Self::Regular
        }
    }
}

/// Predicate over an integer elevation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevationRule {
    /// `elevation % n == 0`
    MultipleOf(u32),
    /// `elevation % n != 0`
    NotMultipleOf(u32),
    /// `elevation % step == 0 && elevation % exclude != 0`
    MultipleOfExcluding {
        /// Interval that must divide the elevation
        step: u32,
        /// Interval that must not divide it
        exclude: u32,
    },
}

impl ElevationRule {
    /// Evaluates the rule for one elevation.
    #[must_use]
    pub fn matches(&self, elevation: i64) -> bool {
        let divides = |n: u32| elevation.rem_euclid(i64::from(n.max(1))) == 0;
        match *self {
            Self::MultipleOf(n) => divides(n),
            Self::NotMultipleOf(n) => !divides(n),
            Self::MultipleOfExcluding { step, exclude } => divides(step) && !divides(exclude),
        }
    }

    /// Renders the rule as a style expression.
    #[must_use]
    pub fn expression(&self, property: &str) -> Value {
        let modulo = |n: u32| json!(["%", ["get", property], n]);
        match *self {
            Self::MultipleOf(n) => json!(["==", modulo(n), 0]),
            Self::NotMultipleOf(n) => json!(["!=", modulo(n), 0]),
            Self::MultipleOfExcluding { step, exclude } => json!([
                "all",
                ["==", modulo(step), 0],
                ["!=", modulo(exclude), 0]
            ]),
        }
    }
}

/// Rules per zoom band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContourBands {
    /// Three zoom bands
    Zoomed {
        /// zoom < 11
        low: ElevationRule,
        /// 11 <= zoom < 13
        mid: ElevationRule,
        /// zoom >= 13
        high: ElevationRule,
    },
    /// One rule at every zoom
    Flat(ElevationRule),
}

/// A contour density filter for one layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContourFilter {
    /// Elevation attribute name
    pub property: String,
    /// Band rules
    pub bands: ContourBands,
}

impl ContourFilter {
    /// Builds the filter for a role at the given density (meters, clamped to >= 1).
    #[must_use]
    pub fn new(property: &str, density: u32, role: ContourRole) -> Self {
        let density = density.max(1);
        let major = density.saturating_mul(INDEX_MULTIPLIER);

        let bands = match role {
            ContourRole::Label | ContourRole::Index => ContourBands::Zoomed {
                low: ElevationRule::MultipleOf(LOW_MAJOR_INTERVAL),
                mid: ElevationRule::MultipleOf(MID_MAJOR_INTERVAL),
                high: ElevationRule::MultipleOf(major),
            },
            ContourRole::Regular => ContourBands::Zoomed {
                low: ElevationRule::MultipleOfExcluding {
                    step: LOW_MINOR_INTERVAL,
                    exclude: LOW_MAJOR_INTERVAL,
                },
                mid: ElevationRule::NotMultipleOf(MID_MAJOR_INTERVAL),
                high: ElevationRule::MultipleOfExcluding {
                    step: density,
                    exclude: major,
                },
            },
            ContourRole::Simple => ContourBands::Flat(ElevationRule::MultipleOf(density)),
        };

        Self {
            property: property.to_string(),
            bands,
        }
    }

    /// Rule in effect at a zoom level.
    #[must_use]
    pub fn rule_at(&self, zoom: f64) -> ElevationRule {
        match self.bands {
            ContourBands::Flat(rule) => rule,
            ContourBands::Zoomed { low, mid, high } => {
                if zoom >= DETAIL_ZOOM {
                    high
                } else if zoom >= MID_ZOOM {
                    mid
                } else {
                    low
                }
            }
        }
    }

    /// Whether a feature at `elevation` is drawn at `zoom`.
    #[must_use]
    pub fn matches(&self, elevation: i64, zoom: f64) -> bool {
        self.rule_at(zoom).matches(elevation)
    }

    /// Renders the filter as a style expression (`step` on zoom for banded roles).
    #[must_use]
    pub fn expression(&self) -> Value {
        match self.bands {
            ContourBands::Flat(rule) => rule.expression(&self.property),
            ContourBands::Zoomed { low, mid, high } => json!([
                "step",
                ["zoom"],
                low.expression(&self.property),
                MID_ZOOM,
                mid.expression(&self.property),
                DETAIL_ZOOM,
                high.expression(&self.property)
            ]),
        }
    }
}

/// First `["get", name]` property referenced by a filter.
#[must_use]
pub fn elevation_property(filter: &Value) -> Option<&str> {
    let items = filter.as_array()?;
    if let [Value::String(op), Value::String(name)] = items.as_slice() {
        if op == "get" {
            return Some(name.as_str());
        }
    }
    items.iter().find_map(elevation_property)
}

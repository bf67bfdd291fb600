//! Layer toggle catalog and the live visibility/intensity selections.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::{StyleError, StyleResult};

/// Road/street network toggle.
pub const TOGGLE_STREETS: &str = "streets";
/// Building footprints toggle.
pub const TOGGLE_BUILDINGS: &str = "buildings";
/// Water bodies toggle.
pub const TOGGLE_WATER: &str = "water";
/// Underwater terrain (bathymetry) toggle.
pub const TOGGLE_TERRAIN_UNDER_WATER: &str = "terrainUnderWater";
/// Parks and green space toggle.
pub const TOGGLE_PARKS: &str = "parks";
/// Terrain shading toggle.
pub const TOGGLE_TERRAIN: &str = "terrain";
/// Elevation contours toggle.
pub const TOGGLE_CONTOURS: &str = "contours";
/// Population heat toggle.
pub const TOGGLE_POPULATION: &str = "population";
/// Text labels toggle.
pub const TOGGLE_LABELS: &str = "labels";
/// Points of interest toggle.
pub const TOGGLE_POIS: &str = "pois";
/// Administrative boundaries toggle.
pub const TOGGLE_BOUNDARIES: &str = "boundaries";

/// One toggle and the layer ids it governs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleBinding {
    /// Toggle identifier (e.g. "streets")
    pub id: String,
    /// Layer ids switched by this toggle
    #[serde(default)]
    pub layers: Vec<String>,
}

/// A layer id claimed by more than one toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleConflict {
    /// The contested layer id
    pub layer_id: String,
    /// Toggles claiming it, in catalog order (the first one wins)
    pub toggles: Vec<String>,
}

/// Mapping from user-facing toggles to the layers they control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleCatalog {
    /// Bindings in catalog order
    #[serde(default)]
    pub toggles: Vec<ToggleBinding>,
}

impl ToggleCatalog {
    /// Load the standard catalog matching the bundled layer naming.
    ///
    /// # Errors
    /// Returns an error if the embedded JSON data cannot be parsed.
    pub fn standard() -> Result<Self> {
        let json_data = include_str!("../data/toggle_catalog.json");
        let catalog: Self = serde_json::from_str(json_data)?;
        Ok(catalog)
    }

    /// Adds a binding.
    #[must_use]
    pub fn with_binding(mut self, id: &str, layers: &[&str]) -> Self {
        self.toggles.push(ToggleBinding {
            id: id.to_string(),
            layers: layers.iter().map(|l| (*l).to_string()).collect(),
        });
        self
    }

    /// Layer id → owning toggle id. The first binding in catalog order wins.
    #[must_use]
    pub fn owners(&self) -> HashMap<&str, &str> {
        let mut owners = HashMap::new();
        for binding in &self.toggles {
            for layer in &binding.layers {
                owners
                    .entry(layer.as_str())
                    .or_insert(binding.id.as_str());
            }
        }
        owners
    }

    /// Toggle owning a layer id, if any.
    #[must_use]
    pub fn owner_of(&self, layer_id: &str) -> Option<&str> {
        self.toggles
            .iter()
            .find(|b| b.layers.iter().any(|l| l == layer_id))
            .map(|b| b.id.as_str())
    }

    /// Layer ids claimed by more than one toggle.
    #[must_use]
    pub fn conflicts(&self) -> Vec<ToggleConflict> {
        let mut claims: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for binding in &self.toggles {
            for layer in &binding.layers {
                let owners = claims.entry(layer.as_str()).or_default();
                if !owners.contains(&binding.id) {
                    owners.push(binding.id.clone());
                }
            }
        }
        claims
            .into_iter()
            .filter(|(_, toggles)| toggles.len() > 1)
            .map(|(layer_id, toggles)| ToggleConflict {
                layer_id: layer_id.to_string(),
                toggles,
            })
            .collect()
    }
}

fn default_contour_interval() -> u32 {
    10
}

fn default_multiplier() -> f64 {
    1.0
}

/// Live user selections: one boolean per toggle plus scalar intensities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityConfig {
    /// Toggle id → on/off
    #[serde(default)]
    pub toggles: BTreeMap<String, bool>,
    /// Hillshade exaggeration (clamped to 0-1 when applied)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hillshade_exaggeration: Option<f64>,
    /// Contour density in meters
    #[serde(default = "default_contour_interval")]
    pub contour_interval: u32,
    /// Road width multiplier
    #[serde(default = "default_multiplier")]
    pub road_weight: f64,
    /// Label text-size multiplier
    #[serde(default = "default_multiplier")]
    pub label_size: f64,
    /// Label wrap width (ems)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_max_width: Option<f64>,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            toggles: BTreeMap::new(),
            hillshade_exaggeration: None,
            contour_interval: default_contour_interval(),
            road_weight: default_multiplier(),
            label_size: default_multiplier(),
            label_max_width: None,
        }
    }
}

impl VisibilityConfig {
    /// Sets a toggle value.
    #[must_use]
    pub fn with_toggle(mut self, id: &str, on: bool) -> Self {
        self.toggles.insert(id.to_string(), on);
        self
    }

    /// Explicit value of a toggle, `None` when unset.
    #[must_use]
    pub fn toggle(&self, id: &str) -> Option<bool> {
        self.toggles.get(id).copied()
    }

    /// Toggle value with a default for unset toggles.
    #[must_use]
    pub fn is_on(&self, id: &str, default: bool) -> bool {
        self.toggle(id).unwrap_or(default)
    }

    /// Checks scalar settings.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidConfig`] describing the first bad value.
    pub fn validate(&self) -> StyleResult<()> {
        if self.contour_interval == 0 {
            return Err(StyleError::InvalidConfig(
                "contourInterval must be greater than zero".to_string(),
            ));
        }
        let positive = [
            ("roadWeight", Some(self.road_weight)),
            ("labelSize", Some(self.label_size)),
            ("labelMaxWidth", self.label_max_width),
        ];
        for (name, value) in positive {
            if let Some(value) = value {
                if !value.is_finite() || value <= 0.0 {
                    return Err(StyleError::InvalidConfig(format!(
                        "{name} must be a positive number, got {value}"
                    )));
                }
            }
        }
        if let Some(exaggeration) = self.hillshade_exaggeration {
            if !exaggeration.is_finite() {
                return Err(StyleError::InvalidConfig(
                    "hillshadeExaggeration must be a finite number".to_string(),
                ));
            }
        }
        Ok(())
    }
}

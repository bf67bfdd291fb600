//! Palette value objects and the color fallback policy.
//!
//! A palette is a record of semantic color slots. Some slots are required and
//! checked by [`Palette::validate`]; the rest are optional and every consumer
//! reaches them through a [`ColorRole`], whose fallback chain is defined once
//! in [`ColorRole::chain`].

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::rgb::is_dark_color;
use crate::error::{StyleError, StyleResult};

/// Road classes from highest to lowest hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadClass {
    /// Motorways / freeways
    Motorway,
    /// Trunk roads
    Trunk,
    /// Primary roads
    Primary,
    /// Secondary roads
    Secondary,
    /// Tertiary roads
    Tertiary,
    /// Residential and minor streets
    Residential,
    /// Service roads, tracks and paths
    Service,
}

impl RoadClass {
    /// All classes in ramp order.
    pub const ALL: [Self; 7] = [
        Self::Motorway,
        Self::Trunk,
        Self::Primary,
        Self::Secondary,
        Self::Tertiary,
        Self::Residential,
        Self::Service,
    ];

    /// Lowercase class name as used in palette files and layer ids.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Motorway => "motorway",
            Self::Trunk => "trunk",
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Tertiary => "tertiary",
            Self::Residential => "residential",
            Self::Service => "service",
        }
    }
}

/// The seven-entry road color ramp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadRamp {
    /// Motorway color
    pub motorway: String,
    /// Trunk color
    pub trunk: String,
    /// Primary road color
    pub primary: String,
    /// Secondary road color
    pub secondary: String,
    /// Tertiary road color
    pub tertiary: String,
    /// Residential street color
    pub residential: String,
    /// Service road color
    pub service: String,
}

impl RoadRamp {
    /// Color for a road class.
    #[must_use]
    pub fn get(&self, class: RoadClass) -> &str {
        match class {
            RoadClass::Motorway => &self.motorway,
            RoadClass::Trunk => &self.trunk,
            RoadClass::Primary => &self.primary,
            RoadClass::Secondary => &self.secondary,
            RoadClass::Tertiary => &self.tertiary,
            RoadClass::Residential => &self.residential,
            RoadClass::Service => &self.service,
        }
    }
}

/// Optional grid overlay color and opacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSlot {
    /// Grid line color
    pub color: String,
    /// Grid line opacity (0-1)
    #[serde(default = "default_grid_opacity")]
    pub opacity: f64,
}

fn default_grid_opacity() -> f64 {
    0.35
}

/// A complete map palette.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    /// Stable identifier (e.g. "midnight")
    #[serde(default)]
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,

    /// Map background (required)
    #[serde(default)]
    pub background: String,
    /// Label text (required)
    #[serde(default)]
    pub text: String,
    /// Water fill (required)
    #[serde(default)]
    pub water: String,
    /// Parks and green space (required)
    #[serde(default, alias = "greenSpace", alias = "green")]
    pub greenspace: String,
    /// Road color ramp (all seven classes required)
    #[serde(default)]
    pub roads: RoadRamp,

    /// Generic primary accent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    /// Generic secondary accent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    /// Highlight accent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    /// Administrative borders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    /// Rivers and water outlines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_line: Option<String>,
    /// Park-specific fill, overrides greenspace for park layers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parks: Option<String>,
    /// Land use / land cover
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landuse: Option<String>,
    /// Building fill / outline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buildings: Option<String>,
    /// Regular contour lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contour: Option<String>,
    /// Index (major) contour lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contour_index: Option<String>,
    /// Hillshade tint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hillshade: Option<String>,
    /// Population heat tint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<String>,
    /// Grid overlay
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridSlot>,
}

/// A single palette slot, as referenced by fallback chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteSlot {
    /// `background`
    Background,
    /// `text`
    Text,
    /// `primary`
    Primary,
    /// `secondary`
    Secondary,
    /// `accent`
    Accent,
    /// `border`
    Border,
    /// `water`
    Water,
    /// `waterLine`
    WaterLine,
    /// `greenspace`
    Greenspace,
    /// `parks`
    Parks,
    /// `landuse`
    Landuse,
    /// `buildings`
    Buildings,
    /// `roads.<class>`
    Road(RoadClass),
    /// `contour`
    Contour,
    /// `contourIndex`
    ContourIndex,
    /// `hillshade`
    Hillshade,
    /// `population`
    Population,
}

/// What a color is used for. Each role owns one ordered fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRole {
    /// Map background
    Background,
    /// Label text
    Text,
    /// Water fill
    Water,
    /// Water outlines and rivers
    WaterLine,
    /// Park fill
    Park,
    /// Land use fill
    Landuse,
    /// Building fill/outline
    Building,
    /// Administrative boundary lines
    Boundary,
    /// Regular contour lines
    Contour,
    /// Index contour lines and contour labels
    ContourIndex,
    /// Population heat fill
    Population,
    /// Unclassified major road lines
    MajorLine,
    /// Unclassified minor road lines
    MinorLine,
    /// Counterpart to the background for relief shading
    Relief,
}

impl ColorRole {
    /// Ordered slots tried for this role; the first non-empty one wins.
    #[must_use]
    pub const fn chain(self) -> &'static [PaletteSlot] {
        use PaletteSlot as S;
        match self {
            Self::Background => &[S::Background],
            Self::Text => &[S::Text],
            Self::Water => &[S::Water],
            Self::WaterLine => &[S::WaterLine, S::Water],
            Self::Park => &[S::Parks, S::Greenspace],
            Self::Landuse => &[S::Landuse, S::Greenspace],
            Self::Building => &[S::Buildings, S::Primary, S::Text],
            Self::Boundary => &[S::Border, S::Text],
            Self::Contour => &[
                S::Contour,
                S::Secondary,
                S::Road(RoadClass::Secondary),
                S::Text,
            ],
            Self::ContourIndex => &[
                S::ContourIndex,
                S::Contour,
                S::Secondary,
                S::Road(RoadClass::Secondary),
                S::Text,
            ],
            Self::Population => &[
                S::Population,
                S::Accent,
                S::Primary,
                S::Road(RoadClass::Motorway),
            ],
            Self::MajorLine => &[S::Primary, S::Road(RoadClass::Primary)],
            Self::MinorLine => &[S::Secondary, S::Road(RoadClass::Secondary)],
            Self::Relief => &[S::Secondary, S::Text],
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

impl Palette {
    /// Raw value of a slot, `None` when absent or empty.
    #[must_use]
    pub fn slot(&self, slot: PaletteSlot) -> Option<&str> {
        let value = match slot {
            PaletteSlot::Background => Some(self.background.as_str()),
            PaletteSlot::Text => Some(self.text.as_str()),
            PaletteSlot::Primary => self.primary.as_deref(),
            PaletteSlot::Secondary => self.secondary.as_deref(),
            PaletteSlot::Accent => self.accent.as_deref(),
            PaletteSlot::Border => self.border.as_deref(),
            PaletteSlot::Water => Some(self.water.as_str()),
            PaletteSlot::WaterLine => self.water_line.as_deref(),
            PaletteSlot::Greenspace => Some(self.greenspace.as_str()),
            PaletteSlot::Parks => self.parks.as_deref(),
            PaletteSlot::Landuse => self.landuse.as_deref(),
            PaletteSlot::Buildings => self.buildings.as_deref(),
            PaletteSlot::Road(class) => Some(self.roads.get(class)),
            PaletteSlot::Contour => self.contour.as_deref(),
            PaletteSlot::ContourIndex => self.contour_index.as_deref(),
            PaletteSlot::Hillshade => self.hillshade.as_deref(),
            PaletteSlot::Population => self.population.as_deref(),
        };
        value.and_then(non_empty)
    }

    /// First non-empty slot in the role's fallback chain.
    #[must_use]
    pub fn resolve(&self, role: ColorRole) -> Option<&str> {
        role.chain().iter().find_map(|slot| self.slot(*slot))
    }

    /// Color for a role, falling back to the text color as a last resort.
    #[must_use]
    pub fn color(&self, role: ColorRole) -> &str {
        self.resolve(role).unwrap_or(self.text.as_str())
    }

    /// Color of a road class from the ramp.
    #[must_use]
    pub fn road(&self, class: RoadClass) -> &str {
        self.roads.get(class)
    }

    /// Whether the background reads as dark.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        is_dark_color(&self.background)
    }

    /// Name used in messages.
    #[must_use]
    pub fn display_name(&self) -> &str {
        non_empty(&self.name)
            .or_else(|| non_empty(&self.id))
            .unwrap_or("<unnamed>")
    }

    /// Checks that every required slot is present.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::MissingPaletteSlot`] naming the first missing slot.
    pub fn validate(&self) -> StyleResult<()> {
        let required = [
            ("background", &self.background),
            ("text", &self.text),
            ("water", &self.water),
            ("greenspace", &self.greenspace),
        ];
        for (slot, value) in required {
            if non_empty(value).is_none() {
                return Err(self.missing(slot.to_string()));
            }
        }

        for class in RoadClass::ALL {
            if non_empty(self.roads.get(class)).is_none() {
                return Err(self.missing(format!("roads.{}", class.as_str())));
            }
        }

        if let Some(grid) = &self.grid {
            if non_empty(&grid.color).is_none() {
                return Err(self.missing("grid.color".to_string()));
            }
        }

        Ok(())
    }

    fn missing(&self, slot: String) -> StyleError {
        StyleError::MissingPaletteSlot {
            palette: self.display_name().to_string(),
            slot,
        }
    }
}

/// Palettes shipped with the application.
#[derive(Debug, Clone, Deserialize)]
pub struct BuiltinPalettes {
    /// Palettes in display order
    pub palettes: Vec<Palette>,
}

impl BuiltinPalettes {
    /// Load the built-in palettes from embedded JSON data.
    ///
    /// # Errors
    /// Returns an error if the JSON data cannot be parsed.
    pub fn load() -> Result<Self> {
        let json_data = include_str!("../data/palettes.json");
        let palettes: Self = serde_json::from_str(json_data)?;
        Ok(palettes)
    }

    /// Find a palette by id or name (case-insensitive).
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Palette> {
        let wanted = name.trim();
        self.palettes.iter().find(|p| {
            p.id.eq_ignore_ascii_case(wanted) || p.name.eq_ignore_ascii_case(wanted)
        })
    }

    /// Number of palettes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    /// Whether no palettes are available.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Palette {
        Palette {
            id: "sample".to_string(),
            name: "Sample".to_string(),
            background: "#F5F0E6".to_string(),
            text: "#222222".to_string(),
            water: "#9CC3D5".to_string(),
            greenspace: "#C8D9B0".to_string(),
            roads: RoadRamp {
                motorway: "#111111".to_string(),
                trunk: "#222222".to_string(),
                primary: "#333333".to_string(),
                secondary: "#444444".to_string(),
                tertiary: "#555555".to_string(),
                residential: "#666666".to_string(),
                service: "#777777".to_string(),
            },
            ..Palette::default()
        }
    }

    #[test]
    fn test_validate_complete_palette() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_missing_slot() {
        let mut palette = sample();
        palette.water = "   ".to_string();
        let err = palette.validate().unwrap_err();
        match err {
            StyleError::MissingPaletteSlot { palette, slot } => {
                assert_eq!(palette, "Sample");
                assert_eq!(slot, "water");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_reports_missing_road_class() {
        let mut palette = sample();
        palette.roads.tertiary.clear();
        let err = palette.validate().unwrap_err();
        assert!(err.to_string().contains("roads.tertiary"));
    }

    #[test]
    fn test_building_fallback_chain() {
        let mut palette = sample();
        assert_eq!(palette.color(ColorRole::Building), "#222222");

        palette.primary = Some("#AA0000".to_string());
        assert_eq!(palette.color(ColorRole::Building), "#AA0000");

        palette.buildings = Some("#00AA00".to_string());
        assert_eq!(palette.color(ColorRole::Building), "#00AA00");
    }

    #[test]
    fn test_boundary_uses_border_then_text() {
        let mut palette = sample();
        palette.accent = Some("#F2B544".to_string());
        assert_eq!(palette.color(ColorRole::Boundary), "#222222");

        palette.border = Some("#884400".to_string());
        assert_eq!(palette.color(ColorRole::Boundary), "#884400");
    }

    #[test]
    fn test_empty_optional_slot_is_skipped() {
        let mut palette = sample();
        palette.buildings = Some(String::new());
        palette.primary = Some("#AA0000".to_string());
        assert_eq!(palette.color(ColorRole::Building), "#AA0000");
    }

    #[test]
    fn test_population_chain_ends_at_motorway() {
        let palette = sample();
        assert_eq!(palette.color(ColorRole::Population), "#111111");
    }

    #[test]
    fn test_contour_chain_prefers_road_secondary_over_text() {
        let palette = sample();
        assert_eq!(palette.color(ColorRole::Contour), "#444444");
        assert_eq!(palette.color(ColorRole::ContourIndex), "#444444");
    }

    #[test]
    fn test_deserialize_camel_case_and_aliases() {
        let json = r##"{
            "name": "Mini",
            "background": "#000000",
            "text": "#FFFFFF",
            "water": "#001133",
            "greenSpace": "#113311",
            "waterLine": "#002244",
            "contourIndex": "#AAAAAA",
            "roads": {"motorway": "#F00"}
        }"##;
        let palette: Palette = serde_json::from_str(json).unwrap();
        assert_eq!(palette.greenspace, "#113311");
        assert_eq!(palette.water_line.as_deref(), Some("#002244"));
        assert_eq!(palette.contour_index.as_deref(), Some("#AAAAAA"));
        assert!(palette.is_dark());
        assert!(palette.validate().unwrap_err().to_string().contains("roads.trunk"));
    }

    #[test]
    fn test_builtin_palettes_are_valid() {
        let builtin = BuiltinPalettes::load().expect("Failed to load palettes");
        assert!(!builtin.is_empty());
        for palette in &builtin.palettes {
            palette
                .validate()
                .unwrap_or_else(|e| panic!("{} invalid: {e}", palette.id));
        }
    }

    #[test]
    fn test_builtin_find_is_case_insensitive() {
        let builtin = BuiltinPalettes::load().expect("Failed to load palettes");
        assert!(builtin.find("MIDNIGHT").is_some());
        assert!(builtin.find("Paper").is_some());
        assert!(builtin.find("does-not-exist").is_none());
    }
}

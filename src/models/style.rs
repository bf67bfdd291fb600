//! Style document model (MapLibre / Mapbox GL style JSON).
//!
//! Only the parts the derivation engine reasons about are typed. Everything
//! else (style `version`, `glyphs`, `sprite`, layer `minzoom`, `metadata`, ...)
//! is carried through untouched in the `extra` maps.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::{StyleError, StyleResult};

/// Render type of a layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LayerType {
    /// `background`
    Background,
    /// `fill`
    Fill,
    /// `line`
    Line,
    /// `symbol`
    Symbol,
    /// `circle`
    Circle,
    /// `hillshade`
    Hillshade,
    /// `fill-extrusion`
    FillExtrusion,
    /// `heatmap`
    Heatmap,
    /// `raster`
    Raster,
    /// Any type this crate does not know; passed through verbatim.
    Other(String),
}

impl LayerType {
    /// Type name as written in style JSON.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Background => "background",
            Self::Fill => "fill",
            Self::Line => "line",
            Self::Symbol => "symbol",
            Self::Circle => "circle",
            Self::Hillshade => "hillshade",
            Self::FillExtrusion => "fill-extrusion",
            Self::Heatmap => "heatmap",
            Self::Raster => "raster",
            Self::Other(name) => name,
        }
    }

    /// Paint property holding this type's main color, if it has one.
    #[must_use]
    pub const fn color_property(&self) -> Option<&'static str> {
        match self {
            Self::Background => Some("background-color"),
            Self::Fill => Some("fill-color"),
            Self::Line => Some("line-color"),
            Self::Symbol => Some("text-color"),
            Self::Circle => Some("circle-color"),
            Self::FillExtrusion => Some("fill-extrusion-color"),
            Self::Hillshade | Self::Heatmap | Self::Raster | Self::Other(_) => None,
        }
    }

    /// Paint property holding this type's opacity, if it has one.
    #[must_use]
    pub const fn opacity_property(&self) -> Option<&'static str> {
        match self {
            Self::Background => Some("background-opacity"),
            Self::Fill => Some("fill-opacity"),
            Self::Line => Some("line-opacity"),
            Self::Symbol => Some("text-opacity"),
            Self::Circle => Some("circle-opacity"),
            Self::FillExtrusion => Some("fill-extrusion-opacity"),
            Self::Heatmap => Some("heatmap-opacity"),
            Self::Raster => Some("raster-opacity"),
            Self::Hillshade | Self::Other(_) => None,
        }
    }
}

impl From<String> for LayerType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "background" => Self::Background,
            "fill" => Self::Fill,
            "line" => Self::Line,
            "symbol" => Self::Symbol,
            "circle" => Self::Circle,
            "hillshade" => Self::Hillshade,
            "fill-extrusion" => Self::FillExtrusion,
            "heatmap" => Self::Heatmap,
            "raster" => Self::Raster,
            _ => Self::Other(value),
        }
    }
}

impl From<LayerType> for String {
    fn from(value: LayerType) -> Self {
        match value {
            LayerType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One drawing rule of a style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Stable identifier
    pub id: String,
    /// Render type
    #[serde(rename = "type")]
    pub layer_type: LayerType,
    /// Source id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Vector tile sub-layer
    #[serde(
        rename = "source-layer",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub source_layer: Option<String>,
    /// Filter predicate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    /// Layout properties
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub layout: Map<String, Value>,
    /// Paint properties
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub paint: Map<String, Value>,
    /// Everything else (minzoom, maxzoom, metadata, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Layer {
    /// Creates a layer with no source, filter or properties.
    pub fn new(id: impl Into<String>, layer_type: LayerType) -> Self {
        Self {
            id: id.into(),
            layer_type,
            source: None,
            source_layer: None,
            filter: None,
            layout: Map::new(),
            paint: Map::new(),
            extra: Map::new(),
        }
    }

    /// Sets the source and optional sub-layer.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>, source_layer: Option<&str>) -> Self {
        self.source = Some(source.into());
        self.source_layer = source_layer.map(str::to_string);
        self
    }

    /// Sets the filter.
    #[must_use]
    pub fn with_filter(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets a paint property.
    #[must_use]
    pub fn with_paint(mut self, key: &str, value: Value) -> Self {
        self.paint.insert(key.to_string(), value);
        self
    }

    /// Sets a layout property.
    #[must_use]
    pub fn with_layout(mut self, key: &str, value: Value) -> Self {
        self.layout.insert(key.to_string(), value);
        self
    }

    /// Current `visibility` layout value, if authored.
    #[must_use]
    pub fn visibility(&self) -> Option<&str> {
        self.layout.get("visibility").and_then(Value::as_str)
    }

    /// Visible unless `visibility` is `"none"`.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visibility() != Some("none")
    }

    /// Writes an explicit `visibility` value.
    pub fn set_visible(&mut self, visible: bool) {
        let value = if visible { "visible" } else { "none" };
        self.layout
            .insert("visibility".to_string(), Value::from(value));
    }

    /// Numeric paint value, `None` for absent or expression values.
    #[must_use]
    pub fn paint_number(&self, key: &str) -> Option<f64> {
        self.paint.get(key).and_then(Value::as_f64)
    }
}

/// A complete style document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDocument {
    /// Top-level keys not modelled here (version, name, glyphs, sprite, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// Named data sources
    #[serde(default)]
    pub sources: Map<String, Value>,
    /// Ordered layers; later layers draw on top
    pub layers: Vec<Layer>,
}

impl StyleDocument {
    /// Creates an empty version-8 style.
    #[must_use]
    pub fn new() -> Self {
        let mut extra = Map::new();
        extra.insert("version".to_string(), Value::from(8));
        Self {
            extra,
            sources: Map::new(),
            layers: Vec::new(),
        }
    }

    /// Parses a style from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid JSON or a layer missing `id`/`type`.
    pub fn from_json_str(json: &str) -> StyleResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Parses a style from a JSON value, checking each layer's required
    /// fields first so the error can name the offending layer.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::MissingLayerField`] or [`StyleError::MalformedStyle`].
    pub fn from_value(value: Value) -> StyleResult<Self> {
        let Some(object) = value.as_object() else {
            return Err(StyleError::MalformedStyle(
                "expected a JSON object at the top level".to_string(),
            ));
        };
        let Some(layers) = object.get("layers").and_then(Value::as_array) else {
            return Err(StyleError::MalformedStyle(
                "missing `layers` array".to_string(),
            ));
        };

        for (index, layer) in layers.iter().enumerate() {
            let id = layer
                .get("id")
                .and_then(Value::as_str)
                .filter(|id| !id.trim().is_empty());
            let Some(id) = id else {
                return Err(StyleError::MissingLayerField {
                    index,
                    id: None,
                    field: "id",
                });
            };
            let has_type = layer
                .get("type")
                .and_then(Value::as_str)
                .is_some_and(|t| !t.trim().is_empty());
            if !has_type {
                return Err(StyleError::MissingLayerField {
                    index,
                    id: Some(id.to_string()),
                    field: "type",
                });
            }
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Checks required layer fields on an already-typed document.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::MissingLayerField`] for the first offending layer.
    pub fn validate(&self) -> StyleResult<()> {
        for (index, layer) in self.layers.iter().enumerate() {
            if layer.id.trim().is_empty() {
                return Err(StyleError::MissingLayerField {
                    index,
                    id: None,
                    field: "id",
                });
            }
            if layer.layer_type.as_str().trim().is_empty() {
                return Err(StyleError::MissingLayerField {
                    index,
                    id: Some(layer.id.clone()),
                    field: "type",
                });
            }
        }
        Ok(())
    }

    /// Finds a layer by id.
    #[must_use]
    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Position of a layer by id.
    #[must_use]
    pub fn layer_index(&self, id: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.id == id)
    }

    /// Layer ids in render order.
    #[must_use]
    pub fn layer_ids(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.id.as_str()).collect()
    }
}

impl Default for StyleDocument {
    fn default() -> Self {
        Self::new()
    }
}

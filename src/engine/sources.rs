//! Optional-source availability.
//!
//! The elevation-contour source needs an API key that is only known at
//! runtime. If the style cannot point it at a real location, every layer that
//! depends on it is stripped so the renderer never requests missing tiles.

use serde_json::{json, Map, Value};
use tracing::{debug, info};

use crate::models::{Layer, StyleDocument};

/// Id of the elevation-contour source.
pub const CONTOUR_SOURCE_ID: &str = "contours";

/// Placeholder left in URLs whose API key has not been substituted.
pub const UNRESOLVED_KEY_PLACEHOLDER: &str = "{key}";

/// Layer id fragments marking contour-dependent layers.
const DEPENDENT_LAYER_MARKERS: [&str; 2] = ["contour", "bathymetry"];

/// Where a source's tiles live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// TileJSON URL
    Url(String),
    /// Tile URL templates
    Tiles(Vec<String>),
}

impl SourceLocation {
    fn is_usable(&self) -> bool {
        match self {
            Self::Url(url) => usable_url(url),
            Self::Tiles(tiles) => tiles.iter().any(|t| usable_url(t)),
        }
    }
}

/// Resolves a source location from runtime context (API keys, environment).
pub trait SourceLocator {
    /// Location for `source_id`, or `None` when it cannot be resolved.
    fn locate(&self, source_id: &str) -> Option<SourceLocation>;
}

/// Locator that never resolves anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocator;

impl SourceLocator for NoLocator {
    fn locate(&self, _source_id: &str) -> Option<SourceLocation> {
        None
    }
}

impl<F> SourceLocator for F
where
    F: Fn(&str) -> Option<SourceLocation>,
{
    fn locate(&self, source_id: &str) -> Option<SourceLocation> {
        self(source_id)
    }
}

/// Outcome of [`resolve_contour_source`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceResolution {
    /// Source present with a usable location
    Available,
    /// Source absent and nothing depends on it
    NotUsed,
    /// Location filled in by the locator
    Resolved,
    /// Source unusable; it and its dependent layers were removed
    Removed {
        /// Number of layers removed
        layers: usize,
    },
}

fn usable_url(url: &str) -> bool {
    let url = url.trim();
    !url.is_empty() && !url.contains(UNRESOLVED_KEY_PLACEHOLDER)
}

/// Whether a source definition points at a usable location.
#[must_use]
pub fn location_is_usable(source: &Value) -> bool {
    let url_ok = source
        .get("url")
        .and_then(Value::as_str)
        .is_some_and(usable_url);
    let tiles_ok = source
        .get("tiles")
        .and_then(Value::as_array)
        .is_some_and(|tiles| tiles.iter().filter_map(Value::as_str).any(usable_url));
    url_ok || tiles_ok
}

/// Whether a layer needs the contour source.
#[must_use]
pub fn depends_on_contours(layer: &Layer) -> bool {
    if layer.source.as_deref() == Some(CONTOUR_SOURCE_ID) {
        return true;
    }
    let id = layer.id.to_ascii_lowercase();
    DEPENDENT_LAYER_MARKERS.iter().any(|m| id.contains(m))
}

/// Makes sure the contour source is usable, asking `locator` once if it is
/// not, and strips the source and its dependent layers otherwise.
pub fn resolve_contour_source(
    style: &mut StyleDocument,
    locator: &dyn SourceLocator,
) -> SourceResolution {
    let existing = style.sources.get(CONTOUR_SOURCE_ID);
    if existing.is_some_and(location_is_usable) {
        return SourceResolution::Available;
    }
    if existing.is_none() && !style.layers.iter().any(depends_on_contours) {
        return SourceResolution::NotUsed;
    }

    if let Some(location) = locator
        .locate(CONTOUR_SOURCE_ID)
        .filter(SourceLocation::is_usable)
    {
        debug!(source = CONTOUR_SOURCE_ID, ?location, "resolved contour source");
        let mut source = match style.sources.remove(CONTOUR_SOURCE_ID) {
            Some(Value::Object(map)) => map,
            _ => {
                let mut map = Map::new();
                map.insert("type".to_string(), json!("vector"));
                map
            }
        };
        source.remove("url");
        source.remove("tiles");
        match location {
            SourceLocation::Url(url) => source.insert("url".to_string(), json!(url)),
            SourceLocation::Tiles(tiles) => source.insert("tiles".to_string(), json!(tiles)),
        };
        style
            .sources
            .insert(CONTOUR_SOURCE_ID.to_string(), Value::Object(source));
        return SourceResolution::Resolved;
    }

    style.sources.remove(CONTOUR_SOURCE_ID);
    let before = style.layers.len();
    style.layers.retain(|layer| !depends_on_contours(layer));
    let removed = before - style.layers.len();
    info!(
        source = CONTOUR_SOURCE_ID,
        removed, "contour source unavailable, stripped dependent layers"
    );
    SourceResolution::Removed { layers: removed }
}

//! Contract-violation errors raised by the style derivation engine.
//!
//! The engine tolerates every structurally valid style variation. The errors
//! below are reserved for upstream data bugs: a layer without an identifier or
//! render type, a palette missing one of its required slots, or live settings
//! that make no sense (a zero contour interval, a negative road weight).

use thiserror::Error;

/// Errors surfaced by the library before any derived output is produced.
#[derive(Debug, Error)]
pub enum StyleError {
    /// A layer is missing its `id` or `type` field (or has it empty).
    #[error("layer #{index}{} is missing required field `{field}`", display_layer_id(.id))]
    MissingLayerField {
        /// Position of the layer in the style's `layers` array
        index: usize,
        /// Layer identifier when it could be read
        id: Option<String>,
        /// Name of the missing field
        field: &'static str,
    },

    /// The style document has no usable `layers` array.
    #[error("style document is malformed: {0}")]
    MalformedStyle(String),

    /// A palette lacks a non-optional color slot.
    #[error("palette `{palette}` is missing required slot `{slot}`")]
    MissingPaletteSlot {
        /// Palette name (or `<unnamed>`)
        palette: String,
        /// Slot path such as `background` or `roads.motorway`
        slot: String,
    },

    /// A live visibility/intensity setting is out of range.
    #[error("invalid visibility config: {0}")]
    InvalidConfig(String),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[allow(clippy::ref_option)]
fn display_layer_id(id: &Option<String>) -> String {
    id.as_deref()
        .map(|id| format!(" (`{id}`)"))
        .unwrap_or_default()
}

/// Convenience alias for engine results.
pub type StyleResult<T> = Result<T, StyleError>;

//! Style derivation engine.
//!
//! Pure, synchronous transformations from a base style, a palette and the
//! live toggle settings to a render-ready style. Nothing here performs I/O.

pub mod category;
pub mod contours;
pub mod deriver;
pub mod expression;
pub mod layout;
pub mod ordering;
pub mod paint;
pub mod sources;
pub mod visibility;

pub use category::{LabelRank, LayerCategory, RoadLine};
pub use contours::{ContourFilter, ContourRole, ElevationRule};
pub use deriver::{derive_style, StyleDeriver};
pub use expression::scale_value;
pub use ordering::normalize_layer_order;
pub use sources::{NoLocator, SourceLocation, SourceLocator, SourceResolution};

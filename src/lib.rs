//! PosterStyle Library
//!
//! This library derives render-ready map styles for posters: it takes a base
//! MapLibre style, a color palette and the user's visibility/intensity
//! settings, and produces a new style with every layer recolored, rescaled,
//! filtered and ordered. It also provides the file loaders, persistent
//! configuration and CLI handlers used by the `posterstyle` binary.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod models;
pub mod parser;

pub use engine::{derive_style, StyleDeriver};
pub use error::{StyleError, StyleResult};

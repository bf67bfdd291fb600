//! Shared test fixtures for engine and E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use posterstyle::models::{Layer, LayerType, Palette, RoadRamp, StyleDocument};
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Path to the posterstyle binary
pub fn posterstyle_bin() -> &'static str {
    env!("CARGO_BIN_EXE_posterstyle")
}

/// Creates a Command with an isolated config directory and no contour key
/// in the environment.
pub fn isolated_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(posterstyle_bin());
    cmd.env("POSTERSTYLE_CONFIG_DIR", config_dir);
    cmd.env_remove("MAPTILER_KEY");
    cmd.env_remove("RUST_LOG");
    cmd.args(args);
    cmd
}

/// Light test palette with a fully distinct road ramp.
pub fn test_palette() -> Palette {
    Palette {
        id: "test".to_string(),
        name: "Test".to_string(),
        background: "#F5F1E8".to_string(),
        text: "#1F1F1F".to_string(),
        water: "#9EC3E6".to_string(),
        greenspace: "#C9DDB8".to_string(),
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

/// A base style exercising every layer category.
///
/// The hillshade is deliberately placed after the water fill and the contour
/// source URL still carries an unresolved `{key}`. `ocean` is water only by
/// its source layer; `water-gradient` is an underwater decoration.
pub fn poster_base_style() -> StyleDocument {
    let mut style = StyleDocument::new();
    style.extra.insert("name".to_string(), json!("Poster Base"));
    style.sources.insert(
        "openmaptiles".to_string(),
        json!({"type": "vector", "url": "https://tiles.example/v3.json"}),
    );
    style.sources.insert(
        "contours".to_string(),
        json!({"type": "vector", "url": "https://tiles.example/contours.json?key={key}"}),
    );
    style.sources.insert(
        "terrain".to_string(),
        json!({"type": "raster-dem", "url": "https://tiles.example/terrain.json"}),
    );

    style.layers = vec![
        Layer::new("background", LayerType::Background)
            .with_paint("background-color", json!("#ffffff")),
        Layer::new("landuse", LayerType::Fill).with_source("openmaptiles", Some("landuse")),
        Layer::new("park", LayerType::Fill).with_source("openmaptiles", Some("park")),
        Layer::new("bathymetry-gradient", LayerType::Fill).with_source("contours", Some("contour")),
        Layer::new("water", LayerType::Fill)
            .with_source("openmaptiles", Some("water"))
            .with_paint("fill-opacity", json!(0.6)),
        Layer::new("hillshade", LayerType::Hillshade).with_source("terrain", None),
        Layer::new("waterway", LayerType::Line).with_source("openmaptiles", Some("waterway")),
        Layer::new("ocean", LayerType::Fill)
            .with_source("openmaptiles", Some("water"))
            .with_paint("fill-opacity", json!(0.3)),
        Layer::new("water-gradient", LayerType::Fill)
            .with_source("openmaptiles", Some("water"))
            .with_paint("fill-opacity", json!(0.4)),
        Layer::new("contours", LayerType::Line)
            .with_source("contours", Some("contour"))
            .with_filter(json!(["==", ["%", ["get", "ele"], 100], 0])),
        Layer::new("contours-index", LayerType::Line)
            .with_source("contours", Some("contour"))
            .with_filter(json!(["==", ["%", ["get", "ele"], 500], 0])),
        Layer::new("bathymetry-detail", LayerType::Line).with_source("contours", Some("contour")),
        Layer::new("building", LayerType::Fill)
            .with_source("openmaptiles", Some("building"))
            .with_paint("fill-opacity", json!(0.7)),
        Layer::new("road-motorway", LayerType::Line)
            .with_source("openmaptiles", Some("transportation"))
            .with_paint(
                "line-width",
                json!(["interpolate", ["linear"], ["zoom"], 10, 2, 14, 4]),
            ),
        Layer::new("bridge-motorway-casing", LayerType::Line)
            .with_source("openmaptiles", Some("transportation"))
            .with_paint("line-width", json!(6)),
        Layer::new("boundary-country", LayerType::Line)
            .with_source("openmaptiles", Some("boundary")),
        Layer::new("decorative-frame", LayerType::Line),
        Layer::new("place-country", LayerType::Symbol)
            .with_source("openmaptiles", Some("place"))
            .with_layout("text-size", json!(14)),
        Layer::new("user-markers", LayerType::Symbol).with_layout("text-allow-overlap", json!(true)),
    ];
    style
}

/// Writes any serializable value as pretty JSON into `dir`.
pub fn write_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

/// Writes raw text into `dir`.
pub fn write_text(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Creates a temp directory holding the poster base style.
///
/// Returns the style path and the TempDir (which must be kept alive).
pub fn create_temp_style_file() -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let path = write_json(temp_dir.path(), "base.json", &poster_base_style());
    (path, temp_dir)
}

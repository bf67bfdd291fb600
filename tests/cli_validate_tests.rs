//! End-to-end tests for `posterstyle validate`.

use serde_json::Value;
use tempfile::TempDir;

mod fixtures;
use fixtures::*;

#[test]
fn test_validate_valid_inputs() {
    let (style_path, temp_dir) = create_temp_style_file();

    let output = isolated_command(
        &["validate", "--style", style_path.to_str().unwrap(), "--palette", "forest"],
        temp_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("passed"));
}

#[test]
fn test_validate_json_reports_catalog_warnings() {
    let (style_path, temp_dir) = create_temp_style_file();
    let catalog_path = write_text(
        temp_dir.path(),
        "catalog.json5",
        r#"{
            toggles: [
                { id: "terrain", layers: ["hillshade", "bathymetry-detail"] },
                { id: "terrainUnderWater", layers: ["bathymetry-detail"] },
                { id: "pois", layers: ["poi-label"] },
            ],
        }"#,
    );

    let output = isolated_command(
        &[
            "validate",
            "--style",
            style_path.to_str().unwrap(),
            "--catalog",
            catalog_path.to_str().unwrap(),
            "--json",
        ],
        temp_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    // Warnings only: still valid
    assert_eq!(output.status.code(), Some(0));
    let result: Value = serde_json::from_slice(&output.stdout).expect("Should parse JSON output");
    assert_eq!(result["valid"], true);
    assert_eq!(result["checks"]["style"], "passed");
    assert_eq!(result["checks"]["palette"], "skipped");
    assert_eq!(result["checks"]["catalog"], "warning");

    let issues = result["errors"].as_array().unwrap();
    assert!(issues
        .iter()
        .any(|m| m["layer"] == "bathymetry-detail" && m["severity"] == "warning"));
    assert!(issues.iter().any(|m| m["layer"] == "poi-label"));
}

#[test]
fn test_validate_incomplete_palette_fails() {
    let (style_path, temp_dir) = create_temp_style_file();
    let mut palette = test_palette();
    palette.roads.tertiary = String::new();
    let palette_path = write_json(temp_dir.path(), "palette.json", &palette);

    let output = isolated_command(
        &[
            "validate",
            "--style",
            style_path.to_str().unwrap(),
            "--palette",
            palette_path.to_str().unwrap(),
            "--json",
        ],
        temp_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["valid"], false);
    assert_eq!(result["checks"]["palette"], "failed");
    assert!(result["errors"][0]["message"]
        .as_str()
        .unwrap()
        .contains("roads.tertiary"));
}

#[test]
fn test_validate_bad_settings_fail() {
    let (style_path, temp_dir) = create_temp_style_file();
    let config_path = write_text(temp_dir.path(), "settings.json5", "{ contourInterval: 0 }");

    let output = isolated_command(
        &[
            "validate",
            "--style",
            style_path.to_str().unwrap(),
            "--config",
            config_path.to_str().unwrap(),
        ],
        temp_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("contourInterval"));
}

#[test]
fn test_validate_layer_without_id() {
    let temp_dir = TempDir::new().unwrap();
    let style_path = write_text(
        temp_dir.path(),
        "base.json",
        r#"{"version": 8, "sources": {}, "layers": [{"type": "fill"}]}"#,
    );

    let output = isolated_command(
        &["validate", "--style", style_path.to_str().unwrap(), "--json"],
        temp_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["checks"]["style"], "failed");
    assert!(result["errors"][0]["message"]
        .as_str()
        .unwrap()
        .contains("layer #0"));
}

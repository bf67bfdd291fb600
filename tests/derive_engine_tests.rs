//! End-to-end tests of the style derivation engine through the public API.

use posterstyle::engine::ordering::is_water_fill;
use posterstyle::engine::paint::{LABELED_ROAD_FACTOR, WATER_MIN_OPACITY};
use posterstyle::engine::sources::CONTOUR_SOURCE_ID;
use posterstyle::engine::{
    derive_style, normalize_layer_order, ContourFilter, ContourRole, SourceLocation, StyleDeriver,
};
use posterstyle::models::toggles::{
    TOGGLE_BOUNDARIES, TOGGLE_LABELS, TOGGLE_STREETS, TOGGLE_TERRAIN, TOGGLE_TERRAIN_UNDER_WATER,
};
use posterstyle::models::{
    BuiltinPalettes, Layer, LayerType, StyleDocument, ToggleCatalog, VisibilityConfig,
};
use posterstyle::StyleError;
use serde_json::json;

mod fixtures;
use fixtures::*;

fn contour_locator(_: &str) -> Option<SourceLocation> {
    Some(SourceLocation::Url(
        "https://tiles.example/contours.json?key=test".to_string(),
    ))
}

fn first_water_index(style: &StyleDocument) -> usize {
    style
        .layers
        .iter()
        .position(is_water_fill)
        .expect("style has a water fill")
}

// ============================================================================
// Example scenarios
// ============================================================================

#[test]
fn test_hillshade_moves_beneath_water() {
    let mut base = StyleDocument::new();
    base.layers = vec![
        Layer::new("background", LayerType::Background),
        Layer::new("water", LayerType::Fill),
        Layer::new("hillshade", LayerType::Hillshade),
        Layer::new("road-motorway", LayerType::Line),
    ];

    let derived = derive_style(&base, &test_palette(), None, None).unwrap();
    assert_eq!(
        derived.layer_ids(),
        vec!["background", "hillshade", "water", "road-motorway"]
    );
}

#[test]
fn test_road_weight_scales_width_and_recolors() {
    let mut base = StyleDocument::new();
    base.layers = vec![Layer::new("road-motorway", LayerType::Line).with_paint(
        "line-width",
        json!(["interpolate", ["linear"], ["zoom"], 10, 2, 14, 4]),
    )];
    let config = VisibilityConfig {
        road_weight: 2.0,
        ..VisibilityConfig::default()
    }
    .with_toggle(TOGGLE_LABELS, false);

    let derived = derive_style(&base, &test_palette(), Some(&config), None).unwrap();
    let road = derived.layer("road-motorway").unwrap();
    assert_eq!(
        road.paint["line-width"],
        json!(["interpolate", ["linear"], ["zoom"], 10, 4, 14, 8])
    );
    assert_eq!(road.paint["line-color"], json!("#111111"));
}

#[test]
fn test_contour_density_at_detail_zoom() {
    let index = ContourFilter::new("ele", 10, ContourRole::Index);
    let regular = ContourFilter::new("ele", 10, ContourRole::Regular);

    for elevation in 0..=1000 {
        assert_eq!(index.matches(elevation, 14.0), elevation % 50 == 0);
        assert_eq!(
            regular.matches(elevation, 14.0),
            elevation % 10 == 0 && elevation % 50 != 0
        );
    }
}

#[test]
fn test_unbound_layer_stays_visible() {
    let catalog = ToggleCatalog::standard().unwrap();
    let mut config = VisibilityConfig::default();
    for binding in &catalog.toggles {
        config = config.with_toggle(&binding.id, false);
    }

    let derived = StyleDeriver::new(&test_palette())
        .with_config(&config)
        .with_catalog(&catalog)
        .derive(&poster_base_style())
        .unwrap();
    let frame = derived.layer("decorative-frame").unwrap();
    assert_eq!(frame.visibility(), Some("visible"));
    assert_eq!(
        derived.layer("road-motorway").unwrap().visibility(),
        Some("none")
    );
}

#[test]
fn test_unresolvable_contours_strip_dependents() {
    let base = poster_base_style();
    let derived = derive_style(&base, &test_palette(), None, None).unwrap();

    assert!(derived
        .layers
        .iter()
        .all(|l| !l.id.contains("contour") && !l.id.contains("bathymetry")));
    assert!(!derived.sources.contains_key(CONTOUR_SOURCE_ID));
    assert_eq!(derived.layers.len(), base.layers.len() - 4);
    // Base style untouched
    assert!(base.sources.contains_key(CONTOUR_SOURCE_ID));
}

// ============================================================================
// Invariants
// ============================================================================

fn config_variants() -> Vec<VisibilityConfig> {
    vec![
        VisibilityConfig::default(),
        VisibilityConfig::default().with_toggle(TOGGLE_TERRAIN_UNDER_WATER, false),
        VisibilityConfig::default()
            .with_toggle(TOGGLE_LABELS, true)
            .with_toggle(TOGGLE_TERRAIN, false),
        VisibilityConfig {
            road_weight: 0.5,
            label_size: 1.25,
            label_max_width: Some(6.0),
            contour_interval: 25,
            hillshade_exaggeration: Some(3.0),
            ..VisibilityConfig::default()
        },
    ]
}

#[test]
fn test_water_occludes_and_follows_hillshade() {
    let palettes = BuiltinPalettes::load().unwrap();
    let catalog = ToggleCatalog::standard().unwrap();
    let base = poster_base_style();

    for palette in &palettes.palettes {
        for config in config_variants() {
            let derived = StyleDeriver::new(palette)
                .with_config(&config)
                .with_catalog(&catalog)
                .with_locator(&contour_locator)
                .derive(&base)
                .unwrap();

            let water_index = first_water_index(&derived);
            let hillshade_index = derived.layer_index("hillshade").unwrap();
            assert!(hillshade_index < water_index);

            let water_fills: Vec<&Layer> =
                derived.layers.iter().filter(|l| is_water_fill(l)).collect();
            assert_eq!(water_fills.len(), 2, "water and ocean");
            for water in water_fills {
                let opacity = water.paint_number("fill-opacity").unwrap();
                assert!(
                    opacity >= WATER_MIN_OPACITY,
                    "{}/{}: opacity {opacity}",
                    palette.id,
                    water.id
                );
                assert_eq!(water.paint["fill-color"], json!(palette.water));
            }
        }
    }
}

#[test]
fn test_every_layer_has_visibility_with_catalog() {
    let catalog = ToggleCatalog::standard().unwrap();
    for config in config_variants() {
        let derived = derive_style(
            &poster_base_style(),
            &test_palette(),
            Some(&config),
            Some(&catalog),
        )
        .unwrap();
        for layer in &derived.layers {
            assert!(
                matches!(layer.visibility(), Some("visible" | "none")),
                "{} has no visibility",
                layer.id
            );
        }
    }
}

#[test]
fn test_layers_never_added_and_order_kept() {
    let base = poster_base_style();
    let catalog = ToggleCatalog::standard().unwrap();
    for config in config_variants() {
        let derived = StyleDeriver::new(&test_palette())
            .with_config(&config)
            .with_catalog(&catalog)
            .with_locator(&contour_locator)
            .derive(&base)
            .unwrap();
        assert_eq!(derived.layers.len(), base.layers.len());

        // Same relative order apart from the hillshade correction
        let mut expected = base.layers.clone();
        normalize_layer_order(&mut expected);
        let expected_ids: Vec<&str> = expected.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(derived.layer_ids(), expected_ids);
    }
}

#[test]
fn test_derivation_is_deterministic_and_colors_stable() {
    let palette = test_palette();
    // Labels off keeps the road factor at 1.0 so widths do not compound
    let config = VisibilityConfig::default().with_toggle(TOGGLE_LABELS, false);
    let base = poster_base_style();

    let once = derive_style(&base, &palette, Some(&config), None).unwrap();
    let again = derive_style(&base, &palette, Some(&config), None).unwrap();
    assert_eq!(once, again);

    let twice = derive_style(&once, &palette, Some(&config), None).unwrap();
    assert_eq!(twice, once);
}

// ============================================================================
// Toggles and special cases
// ============================================================================

#[test]
fn test_underwater_toggle_controls_bathymetry_and_water() {
    let catalog = ToggleCatalog::standard()
        .unwrap()
        .with_binding(TOGGLE_TERRAIN, &["bathymetry-detail"]);
    let config = VisibilityConfig::default()
        .with_toggle(TOGGLE_TERRAIN, true)
        .with_toggle(TOGGLE_TERRAIN_UNDER_WATER, false);

    let derived = StyleDeriver::new(&test_palette())
        .with_config(&config)
        .with_catalog(&catalog)
        .with_locator(&contour_locator)
        .derive(&poster_base_style())
        .unwrap();

    assert_eq!(derived.layer("bathymetry-detail").unwrap().visibility(), Some("none"));
    assert_eq!(derived.layer("bathymetry-gradient").unwrap().visibility(), Some("none"));
    assert_eq!(derived.layer("hillshade").unwrap().visibility(), Some("visible"));
    assert_eq!(derived.layer("water").unwrap().paint["fill-opacity"], json!(1.0));
}

#[test]
fn test_degraded_mode_without_catalog() {
    let config = VisibilityConfig::default()
        .with_toggle(TOGGLE_STREETS, false)
        .with_toggle(TOGGLE_BOUNDARIES, false)
        .with_toggle(TOGGLE_TERRAIN_UNDER_WATER, false);

    let derived = StyleDeriver::new(&test_palette())
        .with_config(&config)
        .with_locator(&contour_locator)
        .derive(&poster_base_style())
        .unwrap();

    assert_eq!(derived.layer("bathymetry-detail").unwrap().visibility(), Some("none"));
    assert_eq!(derived.layer("road-motorway").unwrap().visibility(), None);
    assert_eq!(derived.layer("boundary-country").unwrap().visibility(), None);
}

#[test]
fn test_located_contour_source_keeps_layers_and_regenerates_filters() {
    let config = VisibilityConfig {
        contour_interval: 20,
        ..VisibilityConfig::default()
    };
    let derived = StyleDeriver::new(&test_palette())
        .with_config(&config)
        .with_locator(&contour_locator)
        .derive(&poster_base_style())
        .unwrap();

    assert_eq!(
        derived.sources[CONTOUR_SOURCE_ID]["url"],
        json!("https://tiles.example/contours.json?key=test")
    );
    let index = derived.layer("contours-index").unwrap();
    assert_eq!(
        index.filter,
        Some(ContourFilter::new("ele", 20, ContourRole::Index).expression())
    );
}

#[test]
fn test_water_source_fill_is_painted_as_water() {
    let mut base = StyleDocument::new();
    base.layers = vec![
        Layer::new("background", LayerType::Background),
        Layer::new("ocean", LayerType::Fill)
            .with_source("openmaptiles", Some("water"))
            .with_paint("fill-opacity", json!(0.3)),
        Layer::new("hillshade", LayerType::Hillshade),
    ];

    let config = VisibilityConfig::default();
    let derived = derive_style(&base, &test_palette(), Some(&config), None).unwrap();
    assert_eq!(derived.layer_ids(), vec!["background", "hillshade", "ocean"]);

    let ocean = derived.layer("ocean").unwrap();
    assert_eq!(ocean.paint["fill-color"], json!("#9EC3E6"));
    assert_eq!(ocean.paint["fill-opacity"], json!(WATER_MIN_OPACITY));
}

#[test]
fn test_water_gradient_stays_decorative() {
    let derived = derive_style(&poster_base_style(), &test_palette(), None, None).unwrap();
    let gradient = derived.layer("water-gradient").unwrap();
    assert!(!is_water_fill(gradient));
    assert_eq!(gradient.paint["fill-opacity"], json!(0.4));
    assert_ne!(gradient.paint["fill-color"], json!("#9EC3E6"));
}

#[test]
fn test_visible_labels_thin_roads_when_toggle_unset() {
    let catalog = ToggleCatalog::standard().unwrap();
    let unset = VisibilityConfig::default();
    let on = VisibilityConfig::default().with_toggle(TOGGLE_LABELS, true);

    let width_with = |config: &VisibilityConfig| {
        let derived =
            derive_style(&poster_base_style(), &test_palette(), Some(config), Some(&catalog))
                .unwrap();
        let country = derived.layer("place-country").unwrap();
        assert_eq!(country.visibility(), Some("visible"));
        derived
            .layer("bridge-motorway-casing")
            .unwrap()
            .paint_number("line-width")
            .unwrap()
    };

    let unset_width = width_with(&unset);
    assert!((unset_width - 6.0 * LABELED_ROAD_FACTOR).abs() < 1e-9);
    assert!((unset_width - width_with(&on)).abs() < 1e-9);
}

#[test]
fn test_labels_on_thins_roads_and_layout_applied() {
    let config = VisibilityConfig {
        label_size: 1.5,
        ..VisibilityConfig::default()
    }
    .with_toggle(TOGGLE_LABELS, true);

    let derived =
        derive_style(&poster_base_style(), &test_palette(), Some(&config), None).unwrap();

    let casing = derived.layer("bridge-motorway-casing").unwrap();
    assert_eq!(casing.paint["line-color"], json!("#F5F1E8"));
    let width = casing.paint_number("line-width").unwrap();
    assert!((width - 4.8).abs() < 1e-9);

    let country = derived.layer("place-country").unwrap();
    assert_eq!(country.layout["text-size"], json!(21));
    assert_eq!(country.layout["text-allow-overlap"], json!(false));
    assert_eq!(country.paint["text-halo-width"], json!(2.5));

    let markers = derived.layer("user-markers").unwrap();
    assert_eq!(markers.layout["text-allow-overlap"], json!(true));
    assert!(!markers.layout.contains_key("text-padding"));
}

#[test]
fn test_contract_violations_name_the_culprit() {
    let mut palette = test_palette();
    palette.water = String::new();
    let err = derive_style(&poster_base_style(), &palette, None, None).unwrap_err();
    assert!(matches!(err, StyleError::MissingPaletteSlot { .. }));
    assert!(err.to_string().contains("`water`"));
    assert!(err.to_string().contains("Test"));

    let err = StyleDocument::from_json_str(
        r#"{"version": 8, "sources": {}, "layers": [{"id": "a", "type": "fill"}, {"type": "line"}]}"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        StyleError::MissingLayerField { index: 1, id: None, field: "id" }
    ));
}

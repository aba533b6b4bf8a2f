use super::*;

#[test]
fn defaults_match_reference_animation() {
    let cfg = CrossPlotConfig::default();
    assert_eq!(cfg.frame_count, 150);
    assert_eq!(cfg.frame_size, Canvas::new(1920, 1080));
    assert_eq!(cfg.diagram_size, Canvas::new(1200, 500));
    assert_eq!(cfg.layers, 10);
    assert_eq!(cfg.rendered_layers(), 9);
    assert_eq!(cfg.highlight_layer(), 8);
    assert_eq!(cfg.position, 25);
    assert_eq!(cfg.columns, ColumnRoles { a: 3, b: 1, c: 2 });
    assert_eq!(cfg.seed, "Start");
    assert!(cfg.validate().is_ok());
}

#[test]
fn partial_json_fills_defaults() {
    let cfg: CrossPlotConfig =
        serde_json::from_str(r#"{ "frame_count": 3, "layer_stage": { "shear": 0.0 } }"#).unwrap();
    assert_eq!(cfg.frame_count, 3);
    assert_eq!(cfg.layer_stage.shear, 0.0);
    assert_eq!(cfg.layer_stage.origin, Vec2::new(200.0, 200.0));
    assert_eq!(cfg.diagram_size, Canvas::new(1200, 500));
}

#[test]
fn unknown_fields_are_rejected() {
    let res = serde_json::from_str::<CrossPlotConfig>(r#"{ "frames": 3 }"#);
    assert!(res.is_err());
}

#[test]
fn validation_rejects_bad_shapes() {
    let cfg = CrossPlotConfig {
        layers: 1,
        ..CrossPlotConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(CrossPlotError::Validation(_))));

    let cfg = CrossPlotConfig {
        frame_count: 0,
        ..CrossPlotConfig::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = CrossPlotConfig {
        frame_size: Canvas::new(0, 1080),
        ..CrossPlotConfig::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = CrossPlotConfig {
        columns: ColumnRoles { a: 3, b: 3, c: 2 },
        ..CrossPlotConfig::default()
    };
    assert!(cfg.validate().is_err());

    let mut cfg = CrossPlotConfig::default();
    cfg.layer_stage.shear = f64::NAN;
    assert!(cfg.validate().is_err());

    let mut cfg = CrossPlotConfig::default();
    cfg.falloff.sigma_decrement = Some(-0.1);
    assert!(cfg.validate().is_err());

    let cfg = CrossPlotConfig {
        frame_count: u32::MAX,
        ..CrossPlotConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(CrossPlotError::Validation(_))));
}

#[test]
fn negative_sigma_base_is_accepted() {
    let mut cfg = CrossPlotConfig::default();
    cfg.falloff.sigma_base = -1.0;
    cfg.validate().unwrap();
}

#[test]
fn json_file_roundtrip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cfg.json");
    std::fs::write(&path, r#"{ "position": 3, "seed": "other" }"#).unwrap();
    let cfg = CrossPlotConfig::from_json_file(&path).unwrap();
    assert_eq!(cfg.position, 3);
    assert_eq!(cfg.seed, "other");

    let missing = CrossPlotConfig::from_json_file(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(missing, CrossPlotError::Io { .. }));
}

#[test]
fn builtin_dataset_is_used_without_path() {
    let raw = CrossPlotConfig::default().load_dataset().unwrap();
    assert_eq!(raw.len(), 50);
}

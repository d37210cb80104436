use waterfall_rs::api::PhasePalette;
use waterfall_rs::render::Color;
use waterfall_rs::{WaterfallConfig, WaterfallError};

#[test]
fn config_json_round_trip_preserves_every_field() {
    let palette = PhasePalette {
        request: Color::rgb8(10, 20, 30),
        ..PhasePalette::default()
    };
    let config = WaterfallConfig::new(900)
        .with_palette(palette)
        .with_loader_marker("/perf.js");

    let json = config.to_json_pretty().expect("serialize");
    assert!(json.contains("\"chartWidth\": 900"));
    assert!(json.contains("\"loaderMarker\": \"/perf.js\""));

    let restored = WaterfallConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);
}

#[test]
fn partial_json_fills_defaults() {
    let config = WaterfallConfig::from_json_str(r#"{ "chartWidth": 640, "axisIntervalMs": 500 }"#)
        .expect("parse");

    assert_eq!(config.chart_width, 640);
    assert_eq!(config.axis_interval_ms, 500.0);
    assert_eq!(config.row_height_px, 10.0);
    assert_eq!(config.label_column_px, 200.0);
    assert_eq!(config.loader_marker, "/waterfall.js");
    assert_eq!(config.palette, PhasePalette::default());
}

#[test]
fn invalid_values_are_rejected_on_parse() {
    let err = WaterfallConfig::from_json_str(r#"{ "rowHeightPx": 0 }"#).expect_err("zero row");
    assert!(matches!(err, WaterfallError::InvalidConfig(_)));

    let err = WaterfallConfig::from_json_str(r#"{ "chartWidth": 100 }"#).expect_err("narrow");
    assert!(matches!(err, WaterfallError::InvalidViewport { width: 100, .. }));

    let err = WaterfallConfig::from_json_str("not json").expect_err("garbage");
    assert!(err.to_string().contains("failed to parse config"));
}

use approx::assert_relative_eq;
use waterfall_rs::core::{
    NavigationTiming, PhaseInterval, ResourceTiming, TimingPhase, TimingRecord, TimingSnapshot,
};
use waterfall_rs::render::{NullSurface, SvgSurface};
use waterfall_rs::{Waterfall, WaterfallConfig};

fn sample_records() -> Vec<TimingRecord> {
    vec![
        TimingRecord::new("https://example.com/", 0.0, 2400.0)
            .with_phase(TimingPhase::Dns, PhaseInterval { start: 10.0, duration: 40.0 })
            .with_phase(TimingPhase::Tcp, PhaseInterval { start: 50.0, duration: 60.0 })
            .with_phase(TimingPhase::Request, PhaseInterval { start: 110.0, duration: 300.0 })
            .with_phase(TimingPhase::Response, PhaseInterval { start: 410.0, duration: 90.0 }),
        TimingRecord::new(
            "https://static.example.com/assets/javascripts/application-bundle.min.js?v=42",
            520.0,
            1880.0,
        )
        .with_phase(TimingPhase::Request, PhaseInterval { start: 530.0, duration: 1200.0 }),
        TimingRecord::new("https://fonts.example.net/font.woff2", 900.0, 300.0),
    ]
}

#[test]
fn null_surface_receives_every_primitive() {
    let waterfall = Waterfall::new(WaterfallConfig::new(1205)).expect("waterfall");
    let records = sample_records();
    let mut surface = NullSurface::default();

    waterfall.draw(&records, &mut surface).expect("draw");

    // 2400 ms => ticks at 0, 1 and 2 s: one label and one line each.
    assert_eq!(surface.line_count, 3);
    // Tick labels plus one URL label per row.
    assert_eq!(surface.text_count, 3 + 3);
    // Background bars (3) plus present phases (4 + 1 + 0).
    assert_eq!(surface.rect_count, 8);
    // Row group and nested bar group per record.
    assert_eq!(surface.group_count, 6);
    assert_eq!(surface.max_depth, 2);
    let viewport = surface.last_viewport.expect("viewport");
    assert_eq!(viewport.width, 1205);
    assert_eq!(viewport.height, 48);
}

#[test]
fn layout_scale_maps_max_time_to_bar_area_edge() {
    let waterfall = Waterfall::new(WaterfallConfig::new(1205)).expect("waterfall");
    let layout = waterfall.layout(&sample_records()).expect("layout");

    assert_eq!(layout.max_time_ms, 2400.0);
    assert_relative_eq!(layout.scale.ms_per_px(), 2.4);
    assert_relative_eq!(layout.scale.time_to_px(layout.max_time_ms), 1000.0);
    let xs: Vec<f64> = layout.ticks.iter().map(|tick| tick.x.round()).collect();
    assert_eq!(xs, vec![200.0, 617.0, 1033.0]);
}

#[test]
fn svg_output_contains_shortened_labels_and_palette() {
    let waterfall = Waterfall::new(WaterfallConfig::default()).expect("waterfall");
    let frame = waterfall.build_frame(&sample_records()).expect("frame");
    let svg = SvgSurface::render_to_string(&frame).expect("svg");

    assert!(svg.contains(">https://static.example.co ... dle.min.js</text>"));
    assert!(!svg.contains("v=42"));
    assert!(svg.contains("fill:rgb(204, 204, 204)"));
    assert!(svg.contains("fill:rgb(48, 150, 158)"));
    assert!(svg.contains("fill:rgb(52, 150, 255)"));
    assert!(svg.contains("stroke: rgb(204, 204, 204)"));
}

#[test]
fn single_zero_length_record_renders_without_ticks() {
    let waterfall = Waterfall::new(WaterfallConfig::default()).expect("waterfall");
    let records = vec![TimingRecord::new("https://example.com/", 0.0, 0.0)];
    let mut surface = NullSurface::default();

    waterfall.draw(&records, &mut surface).expect("draw");

    assert_eq!(surface.line_count, 0);
    assert_eq!(surface.text_count, 1);
    assert_eq!(surface.rect_count, 1);
}

#[test]
fn empty_record_list_draws_bare_axis_row() {
    let waterfall = Waterfall::new(WaterfallConfig::default()).expect("waterfall");
    let frame = waterfall.build_frame(&[]).expect("frame");

    assert!(frame.is_empty());
    assert_eq!(frame.viewport.height, 12);
    SvgSurface::render_to_string(&frame).expect("svg");
}

#[test]
fn frame_for_describes_capture_time() {
    let snapshot = TimingSnapshot::new(
        "https://example.com/",
        NavigationTiming {
            navigation_start: 1_700_000_000_000.0,
            response_end: 1_700_000_000_150.0,
            ..NavigationTiming::default()
        },
    )
    .with_resource(ResourceTiming {
        name: "https://example.com/a.css".to_owned(),
        start_time: 20.0,
        duration: 30.0,
        ..ResourceTiming::default()
    });
    let waterfall = Waterfall::new(WaterfallConfig::default()).expect("waterfall");

    let frame = waterfall.frame_for(&snapshot).expect("frame");
    let description = frame.description.as_deref().expect("description");
    assert!(description.starts_with("Page load waterfall for https://example.com/ captured 2023-11-14T22:13:20"));
    assert_eq!(frame.stats().groups, 4);
}

#[test]
fn huge_resource_duration_draws_with_capped_axis() {
    let snapshot = TimingSnapshot::new(
        "https://example.com/",
        NavigationTiming {
            response_end: 150.0,
            ..NavigationTiming::default()
        },
    )
    .with_resource(ResourceTiming {
        name: "https://example.com/stream".to_owned(),
        start_time: 200.0,
        duration: 1e300,
        ..ResourceTiming::default()
    });
    let waterfall = Waterfall::new(WaterfallConfig::default()).expect("waterfall");
    let records = waterfall.collect(&snapshot).expect("collect");
    let mut surface = NullSurface::default();

    waterfall.draw(&records, &mut surface).expect("draw");

    assert_eq!(surface.line_count, waterfall.config().max_axis_ticks);
    assert_eq!(surface.group_count, 4);
}

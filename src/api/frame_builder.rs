use smallvec::SmallVec;
use tracing::trace;

use crate::core::TimingRecord;
use crate::error::WaterfallResult;
use crate::render::{
    GroupNode, GroupTransform, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive,
    WaterfallFrame,
};

use super::{WaterfallConfig, WaterfallLayout, WaterfallScale};

/// Background bar plus at most one bar per phase.
pub type RecordBars = SmallVec<[RectPrimitive; 8]>;

/// Builds the complete chart scene: axis first, then one row per record in
/// input order.
pub fn build_waterfall_frame(
    records: &[TimingRecord],
    config: &WaterfallConfig,
) -> WaterfallResult<WaterfallFrame> {
    let layout = WaterfallLayout::compute(records, config)?;
    let mut frame = WaterfallFrame::new(layout.viewport);

    push_axis(&mut frame, &layout, config);

    for (index, record) in records.iter().enumerate() {
        frame.push(build_row(index, record, &layout, config)?);
    }

    trace!(stats = ?frame.stats(), "built waterfall frame");
    Ok(frame)
}

fn push_axis(frame: &mut WaterfallFrame, layout: &WaterfallLayout, config: &WaterfallConfig) {
    let line_top = config.row_pitch_px();
    let line_bottom = f64::from(layout.viewport.height);

    for tick in &layout.ticks {
        frame.push(TextPrimitive::new(
            tick.label.clone(),
            tick.x,
            config.row_height_px,
            config.font_size_px,
            config.text_color,
            TextHAlign::Center,
        ));
        frame.push(LinePrimitive::new(
            tick.x,
            line_top,
            tick.x,
            line_bottom,
            config.axis_line_width_px,
            config.axis_line_color,
        ));
    }
}

fn build_row(
    index: usize,
    record: &TimingRecord,
    layout: &WaterfallLayout,
    config: &WaterfallConfig,
) -> WaterfallResult<GroupNode> {
    let mut row = GroupNode::new(GroupTransform::translate(
        0.0,
        WaterfallLayout::row_top(index, config),
    ));

    let label = config.label_truncation.shorten(record.url());
    if !label.is_empty() {
        row.push(TextPrimitive::new(
            label,
            config.label_inset_px,
            config.row_height_px,
            config.font_size_px,
            config.text_color,
            TextHAlign::Left,
        ));
    }

    let mut bar = GroupNode::new(GroupTransform::translate(layout.bar_origin_x, 0.0))
        .with_title(record.tooltip()?);
    for rect in record_bars(record, layout.scale, config) {
        bar.push(rect);
    }
    row.push(bar);

    Ok(row)
}

/// Bars for one record in paint order: elapsed-time background, then each
/// present phase in draw order.
#[must_use]
pub fn record_bars(
    record: &TimingRecord,
    scale: WaterfallScale,
    config: &WaterfallConfig,
) -> RecordBars {
    let mut bars = RecordBars::new();
    let start = if record.start().is_finite() {
        record.start()
    } else {
        0.0
    };
    let elapsed = if record.duration().is_finite() {
        record.duration().max(0.0)
    } else {
        0.0
    };

    bars.push(RectPrimitive::new(
        scale.time_to_px(start),
        0.0,
        scale.time_to_px(elapsed),
        config.row_height_px,
        config.palette.blocked,
    ));

    for (phase, interval) in record.present_phases() {
        bars.push(RectPrimitive::new(
            scale.time_to_px(interval.start),
            0.0,
            scale.time_to_px(interval.duration),
            config.row_height_px,
            config.palette.phase(phase),
        ));
    }

    bars
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{build_waterfall_frame, record_bars};
    use crate::api::{WaterfallConfig, WaterfallScale};
    use crate::core::{PhaseInterval, TimingPhase, TimingRecord};
    use crate::render::{SceneNode, TextHAlign};

    fn page_record() -> TimingRecord {
        TimingRecord::new("https://example.com/", 0.0, 150.0)
            .with_phase(TimingPhase::Dns, PhaseInterval { start: 10.0, duration: 5.0 })
            .with_phase(TimingPhase::Tcp, PhaseInterval { start: 15.0, duration: 10.0 })
            .with_phase(TimingPhase::Request, PhaseInterval { start: 25.0, duration: 75.0 })
            .with_phase(TimingPhase::Response, PhaseInterval { start: 100.0, duration: 50.0 })
    }

    #[test]
    fn bars_follow_phase_draw_order_after_background() {
        let config = WaterfallConfig::default();
        let scale = WaterfallScale::new(150.0, 300.0);
        let bars = record_bars(&page_record(), scale, &config);

        assert_eq!(bars.len(), 5);
        assert_eq!(bars[0].fill_color, config.palette.blocked);
        assert_relative_eq!(bars[0].width, 300.0);
        assert_eq!(bars[1].fill_color, config.palette.dns);
        assert_relative_eq!(bars[1].x, 20.0);
        assert_relative_eq!(bars[1].width, 10.0);
        assert_eq!(bars[4].fill_color, config.palette.response);
        assert_relative_eq!(bars[4].x, 200.0);
    }

    #[test]
    fn negative_elapsed_time_draws_an_empty_background() {
        let config = WaterfallConfig::default();
        let record = TimingRecord::new("https://example.com/x", 40.0, -12.0);
        let bars = record_bars(&record, WaterfallScale::new(100.0, 100.0), &config);

        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].width, 0.0);
        bars[0].validate().expect("still a valid primitive");
    }

    #[test]
    fn frame_contains_axis_then_rows() {
        let config = WaterfallConfig::default();
        let frame = build_waterfall_frame(&[page_record()], &config).expect("frame");
        frame.validate().expect("valid");

        // maxTime 150 ms => a single tick at t=0.
        assert!(matches!(&frame.nodes[0], SceneNode::Text(text) if text.text == "0" && text.h_align == TextHAlign::Center));
        assert!(matches!(&frame.nodes[1], SceneNode::Line(_)));
        let SceneNode::Group(row) = &frame.nodes[2] else {
            panic!("expected row group");
        };
        assert_eq!(row.transform.translate_y, 12.0);
        assert!(matches!(&row.children[0], SceneNode::Text(text) if text.text == "https://example.com/"));
        let SceneNode::Group(bar) = &row.children[1] else {
            panic!("expected bar group");
        };
        assert_eq!(bar.transform.translate_x, 200.0);
        assert!(bar.title.as_deref().is_some_and(|title| title.contains("dnsDuration")));
        assert_eq!(bar.children.len(), 5);
    }

    #[test]
    fn zero_duration_chart_has_no_ticks_and_does_not_divide_by_zero() {
        let config = WaterfallConfig::default();
        let record = TimingRecord::new("https://example.com/", 0.0, 0.0);
        let frame = build_waterfall_frame(&[record], &config).expect("frame");
        frame.validate().expect("valid");

        let stats = frame.stats();
        assert_eq!(stats.lines, 0);
        assert_eq!(stats.rects, 1);
    }
}

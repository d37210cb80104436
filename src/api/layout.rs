use ordered_float::OrderedFloat;
use tracing::{debug, warn};

use crate::core::{TimingRecord, Viewport};
use crate::error::WaterfallResult;

use super::WaterfallConfig;

/// Linear time-to-pixel mapping for the bar area.
///
/// `ms_per_px` is the scale factor. A zero factor (nothing took any time)
/// maps every time to pixel `0` instead of dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterfallScale {
    ms_per_px: f64,
}

impl WaterfallScale {
    #[must_use]
    pub fn new(max_time_ms: f64, bar_area_width_px: f64) -> Self {
        let ms_per_px = max_time_ms / bar_area_width_px;
        if ms_per_px.is_finite() && ms_per_px > 0.0 {
            Self { ms_per_px }
        } else {
            Self { ms_per_px: 0.0 }
        }
    }

    #[must_use]
    pub fn ms_per_px(self) -> f64 {
        self.ms_per_px
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.ms_per_px <= 0.0
    }

    #[must_use]
    pub fn time_to_px(self, time_ms: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        time_ms / self.ms_per_px
    }
}

/// One axis gridline and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub x: f64,
    pub label: String,
}

/// Chart geometry derived from a record list and a configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterfallLayout {
    pub viewport: Viewport,
    pub max_time_ms: f64,
    pub scale: WaterfallScale,
    pub bar_origin_x: f64,
    pub ticks: Vec<AxisTick>,
}

impl WaterfallLayout {
    pub fn compute(records: &[TimingRecord], config: &WaterfallConfig) -> WaterfallResult<Self> {
        config.validate()?;

        let max_time_ms = max_end_time(records);
        let scale = WaterfallScale::new(max_time_ms, config.bar_area_width_px());
        let bar_origin_x = config.label_column_px;
        let ticks = axis_ticks(max_time_ms, scale, bar_origin_x, config);

        debug!(
            records = records.len(),
            max_time_ms,
            ms_per_px = scale.ms_per_px(),
            ticks = ticks.len(),
            "computed waterfall layout"
        );

        Ok(Self {
            viewport: config.viewport_for(records.len()),
            max_time_ms,
            scale,
            bar_origin_x,
            ticks,
        })
    }

    /// Top edge of row `index`; row 0 is the first record below the axis row.
    #[must_use]
    pub fn row_top(index: usize, config: &WaterfallConfig) -> f64 {
        (index as f64 + 1.0) * config.row_pitch_px()
    }
}

/// Latest end time over all records, never below zero.
#[must_use]
pub fn max_end_time(records: &[TimingRecord]) -> f64 {
    records
        .iter()
        .map(TimingRecord::end)
        .filter(|end| end.is_finite())
        .map(OrderedFloat)
        .max()
        .map_or(0.0, |end| end.0.max(0.0))
}

fn axis_ticks(
    max_time_ms: f64,
    scale: WaterfallScale,
    bar_origin_x: f64,
    config: &WaterfallConfig,
) -> Vec<AxisTick> {
    if scale.is_degenerate() {
        return Vec::new();
    }

    // Counted in f64 so huge end times cannot overflow the cast.
    let wanted = (max_time_ms / config.axis_interval_ms).floor() + 1.0;
    let count = if wanted >= config.max_axis_ticks as f64 {
        config.max_axis_ticks
    } else {
        wanted as usize
    };
    if wanted > count as f64 {
        warn!(
            wanted,
            max_axis_ticks = config.max_axis_ticks,
            "axis tick count capped"
        );
    }

    (0..count)
        .map(|index| {
            let time_ms = index as f64 * config.axis_interval_ms;
            AxisTick {
                x: bar_origin_x + scale.time_to_px(time_ms),
                label: format_seconds(time_ms),
            }
        })
        .collect()
}

/// Axis label text: seconds with at most three decimals.
#[must_use]
pub fn format_seconds(time_ms: f64) -> String {
    let seconds = time_ms.round() / 1000.0;
    format!("{seconds}")
}

use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_LOADER_MARKER, LabelTruncation, TimingPhase, Viewport};
use crate::error::{WaterfallError, WaterfallResult};
use crate::render::Color;

/// Horizontal space a browser host reserves around the chart container.
pub const HOST_CONTAINER_INSET_PX: u32 = 16;

/// Fill colors for the elapsed-time background bar and each phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhasePalette {
    pub blocked: Color,
    pub redirect: Color,
    pub app_cache: Color,
    pub dns: Color,
    pub tcp: Color,
    pub ssl: Color,
    pub request: Color,
    pub response: Color,
}

impl Default for PhasePalette {
    fn default() -> Self {
        Self {
            blocked: Color::rgb8(204, 204, 204),
            redirect: Color::rgb8(255, 221, 0),
            app_cache: Color::rgb8(161, 103, 38),
            dns: Color::rgb8(48, 150, 158),
            tcp: Color::rgb8(255, 157, 66),
            ssl: Color::rgb8(213, 102, 223),
            request: Color::rgb8(64, 255, 64),
            response: Color::rgb8(52, 150, 255),
        }
    }
}

impl PhasePalette {
    #[must_use]
    pub fn phase(&self, phase: TimingPhase) -> Color {
        match phase {
            TimingPhase::Redirect => self.redirect,
            TimingPhase::AppCache => self.app_cache,
            TimingPhase::Dns => self.dns,
            TimingPhase::Tcp => self.tcp,
            TimingPhase::Ssl => self.ssl,
            TimingPhase::Request => self.request,
            TimingPhase::Response => self.response,
        }
    }

    fn validate(&self) -> WaterfallResult<()> {
        self.blocked.validate()?;
        for phase in TimingPhase::DRAW_ORDER {
            self.phase(phase).validate()?;
        }
        Ok(())
    }
}

/// Immutable chart configuration passed to the renderer.
///
/// Serializable so hosts can keep chart setup in a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterfallConfig {
    #[serde(default = "default_chart_width")]
    pub chart_width: u32,
    #[serde(default = "default_row_height_px")]
    pub row_height_px: f64,
    #[serde(default = "default_row_padding_px")]
    pub row_padding_px: f64,
    #[serde(default = "default_label_column_px")]
    pub label_column_px: f64,
    #[serde(default = "default_label_inset_px")]
    pub label_inset_px: f64,
    #[serde(default = "default_right_margin_px")]
    pub right_margin_px: f64,
    #[serde(default = "default_font_size_px")]
    pub font_size_px: f64,
    #[serde(default = "default_axis_interval_ms")]
    pub axis_interval_ms: f64,
    #[serde(default = "default_max_axis_ticks")]
    pub max_axis_ticks: usize,
    #[serde(default = "default_axis_line_color")]
    pub axis_line_color: Color,
    #[serde(default = "default_axis_line_width_px")]
    pub axis_line_width_px: f64,
    #[serde(default = "default_text_color")]
    pub text_color: Color,
    #[serde(default)]
    pub palette: PhasePalette,
    #[serde(default)]
    pub label_truncation: LabelTruncation,
    #[serde(default = "default_loader_marker")]
    pub loader_marker: String,
}

impl Default for WaterfallConfig {
    fn default() -> Self {
        Self {
            chart_width: default_chart_width(),
            row_height_px: default_row_height_px(),
            row_padding_px: default_row_padding_px(),
            label_column_px: default_label_column_px(),
            label_inset_px: default_label_inset_px(),
            right_margin_px: default_right_margin_px(),
            font_size_px: default_font_size_px(),
            axis_interval_ms: default_axis_interval_ms(),
            max_axis_ticks: default_max_axis_ticks(),
            axis_line_color: default_axis_line_color(),
            axis_line_width_px: default_axis_line_width_px(),
            text_color: default_text_color(),
            palette: PhasePalette::default(),
            label_truncation: LabelTruncation::default(),
            loader_marker: default_loader_marker(),
        }
    }
}

impl WaterfallConfig {
    /// Default configuration with an explicit chart width.
    #[must_use]
    pub fn new(chart_width: u32) -> Self {
        Self {
            chart_width,
            ..Self::default()
        }
    }

    /// Sizes the chart for a host viewport of `inner_width` pixels.
    #[must_use]
    pub fn for_host_viewport(inner_width: u32) -> Self {
        Self::new(inner_width.saturating_sub(HOST_CONTAINER_INSET_PX))
    }

    #[must_use]
    pub fn with_palette(mut self, palette: PhasePalette) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_loader_marker(mut self, marker: impl Into<String>) -> Self {
        self.loader_marker = marker.into();
        self
    }

    #[must_use]
    pub fn with_label_truncation(mut self, truncation: LabelTruncation) -> Self {
        self.label_truncation = truncation;
        self
    }

    /// Height of one row band (bar plus padding).
    #[must_use]
    pub fn row_pitch_px(&self) -> f64 {
        self.row_height_px + self.row_padding_px
    }

    /// Horizontal pixels available to bars.
    #[must_use]
    pub fn bar_area_width_px(&self) -> f64 {
        f64::from(self.chart_width) - self.label_column_px - self.right_margin_px
    }

    /// Chart surface for `record_count` rows plus the axis row.
    #[must_use]
    pub fn viewport_for(&self, record_count: usize) -> Viewport {
        let height = (record_count as f64 + 1.0) * self.row_pitch_px();
        Viewport::new(self.chart_width, height.ceil() as u32)
    }

    pub fn validate(&self) -> WaterfallResult<()> {
        for (name, value) in [
            ("rowHeightPx", self.row_height_px),
            ("fontSizePx", self.font_size_px),
            ("axisIntervalMs", self.axis_interval_ms),
            ("axisLineWidthPx", self.axis_line_width_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(WaterfallError::InvalidConfig(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("rowPaddingPx", self.row_padding_px),
            ("labelColumnPx", self.label_column_px),
            ("labelInsetPx", self.label_inset_px),
            ("rightMarginPx", self.right_margin_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(WaterfallError::InvalidConfig(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }
        if self.max_axis_ticks == 0 {
            return Err(WaterfallError::InvalidConfig(
                "`maxAxisTicks` must be > 0".to_owned(),
            ));
        }
        if self.bar_area_width_px() <= 0.0 {
            return Err(WaterfallError::InvalidViewport {
                width: self.chart_width,
                height: self.viewport_for(0).height,
            });
        }

        self.axis_line_color.validate()?;
        self.text_color.validate()?;
        self.palette.validate()?;
        self.label_truncation.validate()
    }

    pub fn to_json_pretty(&self) -> WaterfallResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            WaterfallError::InvalidConfig(format!("failed to serialize config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> WaterfallResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| WaterfallError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_chart_width() -> u32 {
    1200
}

fn default_row_height_px() -> f64 {
    10.0
}

fn default_row_padding_px() -> f64 {
    2.0
}

fn default_label_column_px() -> f64 {
    200.0
}

fn default_label_inset_px() -> f64 {
    5.0
}

fn default_right_margin_px() -> f64 {
    5.0
}

fn default_font_size_px() -> f64 {
    10.0
}

fn default_axis_interval_ms() -> f64 {
    1000.0
}

fn default_max_axis_ticks() -> usize {
    600
}

fn default_axis_line_color() -> Color {
    Color::rgb8(204, 204, 204)
}

fn default_axis_line_width_px() -> f64 {
    1.0
}

fn default_text_color() -> Color {
    Color::rgb(0.0, 0.0, 0.0)
}

fn default_loader_marker() -> String {
    DEFAULT_LOADER_MARKER.to_owned()
}

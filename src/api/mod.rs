mod config;
mod frame_builder;
mod layout;
mod waterfall;

pub use config::{HOST_CONTAINER_INSET_PX, PhasePalette, WaterfallConfig};
pub use frame_builder::{RecordBars, build_waterfall_frame, record_bars};
pub use layout::{AxisTick, WaterfallLayout, WaterfallScale, format_seconds, max_end_time};
pub use waterfall::{InjectOutcome, Waterfall};

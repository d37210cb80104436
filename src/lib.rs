//! waterfall-rs: page-load resource timing waterfall charts.
//!
//! Timing samples from a host (navigation + resource timing) are normalized
//! into [`core::TimingRecord`]s, laid out on a linear time axis, and emitted
//! as backend-agnostic primitives through [`render::DrawingSurface`].

pub mod api;
pub mod core;
pub mod error;
pub mod host;
pub mod render;
pub mod telemetry;

pub use api::{Waterfall, WaterfallConfig};
pub use error::{WaterfallError, WaterfallResult};

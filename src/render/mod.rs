mod frame;
mod null_surface;
mod primitives;
mod svg;

pub use frame::{GroupNode, SceneNode, SceneStats, WaterfallFrame};
pub use null_surface::NullSurface;
pub use primitives::{
    Color, GroupTransform, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};
pub use svg::{SVG_NAMESPACE, SvgSurface, escape_xml};
pub(crate) use svg::map_fmt_error;

use crate::core::Viewport;
use crate::error::WaterfallResult;

/// Contract implemented by any drawing backend.
///
/// Surfaces receive primitives one at a time from
/// [`WaterfallFrame::draw`], so chart layout stays independent of the
/// output format. Groups nest; every `begin_group` is matched by one
/// `end_group`.
pub trait DrawingSurface {
    fn begin(&mut self, viewport: Viewport, description: Option<&str>) -> WaterfallResult<()>;

    fn rect(&mut self, rect: &RectPrimitive) -> WaterfallResult<()>;

    fn line(&mut self, line: &LinePrimitive) -> WaterfallResult<()>;

    fn text(&mut self, text: &TextPrimitive) -> WaterfallResult<()>;

    fn begin_group(&mut self, transform: GroupTransform, title: Option<&str>) -> WaterfallResult<()>;

    fn end_group(&mut self) -> WaterfallResult<()>;

    fn finish(&mut self) -> WaterfallResult<()> {
        Ok(())
    }
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderStats, CairoSurface};

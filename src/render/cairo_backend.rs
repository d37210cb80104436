use std::io::Write;

use cairo::{Context, FontSlant, FontWeight, Format, ImageSurface};

use crate::core::Viewport;
use crate::error::{WaterfallError, WaterfallResult};
use crate::render::{
    Color, DrawingSurface, GroupTransform, LinePrimitive, RectPrimitive, TextHAlign,
    TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
}

/// Cairo image-surface backend; the finished chart can be exported as PNG.
///
/// Groups map to `save`/`translate`/`restore`. Group titles have no raster
/// equivalent and are dropped.
#[derive(Debug)]
pub struct CairoSurface {
    target: Option<(ImageSurface, Context)>,
    clear_color: Color,
    depth: usize,
    stats: CairoRenderStats,
}

impl Default for CairoSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl CairoSurface {
    #[must_use]
    pub fn new() -> Self {
        Self {
            target: None,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            depth: 0,
            stats: CairoRenderStats::default(),
        }
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo"
    }

    pub fn set_clear_color(&mut self, color: Color) -> WaterfallResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.stats
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImageSurface> {
        self.target.as_ref().map(|(surface, _)| surface)
    }

    pub fn write_png<W: Write>(&self, writer: &mut W) -> WaterfallResult<()> {
        let surface = self
            .image()
            .ok_or_else(|| WaterfallError::Render("nothing has been drawn yet".to_owned()))?;
        surface.flush();
        surface
            .write_to_png(writer)
            .map_err(|err| WaterfallError::Render(format!("failed to encode png: {err}")))
    }

    fn context(&self) -> WaterfallResult<&Context> {
        self.target
            .as_ref()
            .map(|(_, context)| context)
            .ok_or_else(|| WaterfallError::Render("cairo surface used before begin".to_owned()))
    }
}

impl DrawingSurface for CairoSurface {
    fn begin(&mut self, viewport: Viewport, _description: Option<&str>) -> WaterfallResult<()> {
        let width = i32::try_from(viewport.width).map_err(|_| WaterfallError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        })?;
        let height = i32::try_from(viewport.height).map_err(|_| WaterfallError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        })?;

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;

        apply_color(&context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        self.target = Some((surface, context));
        self.depth = 0;
        self.stats = CairoRenderStats::default();
        Ok(())
    }

    fn rect(&mut self, rect: &RectPrimitive) -> WaterfallResult<()> {
        let context = self.context()?;
        apply_color(context, rect.fill_color);
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        self.stats.rects_drawn += 1;
        Ok(())
    }

    fn line(&mut self, line: &LinePrimitive) -> WaterfallResult<()> {
        let context = self.context()?;
        apply_color(context, line.color);
        context.set_line_width(line.stroke_width);
        context.move_to(line.x1, line.y1);
        context.line_to(line.x2, line.y2);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke line", err))?;
        self.stats.lines_drawn += 1;
        Ok(())
    }

    fn text(&mut self, text: &TextPrimitive) -> WaterfallResult<()> {
        let context = self.context()?;
        context.select_font_face("sans-serif", FontSlant::Normal, FontWeight::Normal);
        context.set_font_size(text.font_size_px);
        let extents = context
            .text_extents(&text.text)
            .map_err(|err| map_backend_error("failed to measure text", err))?;
        let x = match text.h_align {
            TextHAlign::Left => text.x,
            TextHAlign::Center => text.x - extents.x_advance() / 2.0,
        };

        apply_color(context, text.color);
        context.move_to(x, text.y);
        context
            .show_text(&text.text)
            .map_err(|err| map_backend_error("failed to draw text", err))?;
        self.stats.texts_drawn += 1;
        Ok(())
    }

    fn begin_group(&mut self, transform: GroupTransform, _title: Option<&str>) -> WaterfallResult<()> {
        let context = self.context()?;
        context
            .save()
            .map_err(|err| map_backend_error("failed to save cairo state", err))?;
        context.translate(transform.translate_x, transform.translate_y);
        self.depth += 1;
        Ok(())
    }

    fn end_group(&mut self) -> WaterfallResult<()> {
        if self.depth == 0 {
            return Err(WaterfallError::Render(
                "end_group without matching begin_group".to_owned(),
            ));
        }
        self.context()?
            .restore()
            .map_err(|err| map_backend_error("failed to restore cairo state", err))?;
        self.depth -= 1;
        Ok(())
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> WaterfallError {
    WaterfallError::Render(format!("{prefix}: {err}"))
}

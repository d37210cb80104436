use std::fmt::{self, Write as _};

use crate::core::Viewport;
use crate::error::{WaterfallError, WaterfallResult};
use crate::render::{
    DrawingSurface, GroupTransform, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive,
    WaterfallFrame,
};

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Surface that writes SVG markup into an in-memory string.
#[derive(Debug, Default)]
pub struct SvgSurface {
    markup: String,
    depth: usize,
    finished: bool,
}

impl SvgSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience: draws `frame` on a fresh surface and returns the markup.
    pub fn render_to_string(frame: &WaterfallFrame) -> WaterfallResult<String> {
        let mut surface = Self::new();
        frame.draw(&mut surface)?;
        surface.into_markup()
    }

    /// Returns the finished document.
    pub fn into_markup(self) -> WaterfallResult<String> {
        if !self.finished {
            return Err(WaterfallError::Render(
                "svg document was not finished".to_owned(),
            ));
        }
        Ok(self.markup)
    }

    /// Appends one indented line at the current group depth.
    fn write_line(&mut self, args: fmt::Arguments<'_>) -> WaterfallResult<()> {
        for _ in 0..=self.depth {
            self.markup.push_str("  ");
        }
        self.markup.write_fmt(args).map_err(map_fmt_error)?;
        self.markup.push('\n');
        Ok(())
    }
}

impl DrawingSurface for SvgSurface {
    fn begin(&mut self, viewport: Viewport, description: Option<&str>) -> WaterfallResult<()> {
        self.markup.clear();
        self.depth = 0;
        self.finished = false;
        writeln!(
            self.markup,
            r#"<svg xmlns="{SVG_NAMESPACE}" width="{}" height="{}">"#,
            viewport.width, viewport.height
        )
        .map_err(map_fmt_error)?;
        if let Some(description) = description {
            self.write_line(format_args!("<desc>{}</desc>", escape_xml(description)))?;
        }
        Ok(())
    }

    fn rect(&mut self, rect: &RectPrimitive) -> WaterfallResult<()> {
        self.write_line(format_args!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" style="fill:{}"/>"#,
            fmt_num(rect.x),
            fmt_num(rect.y),
            fmt_num(rect.width),
            fmt_num(rect.height),
            rect.fill_color.to_css()
        ))
    }

    fn line(&mut self, line: &LinePrimitive) -> WaterfallResult<()> {
        self.write_line(format_args!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" style="stroke: {}; stroke-width: {};"/>"#,
            fmt_num(line.x1),
            fmt_num(line.y1),
            fmt_num(line.x2),
            fmt_num(line.y2),
            line.color.to_css(),
            fmt_num(line.stroke_width)
        ))
    }

    fn text(&mut self, text: &TextPrimitive) -> WaterfallResult<()> {
        let anchor = match text.h_align {
            TextHAlign::Left => "start",
            TextHAlign::Center => "middle",
        };
        self.write_line(format_args!(
            r#"<text x="{}" y="{}" style="font: {}px sans-serif; fill: {};" text-anchor="{anchor}">{}</text>"#,
            fmt_num(text.x),
            fmt_num(text.y),
            fmt_num(text.font_size_px),
            text.color.to_css(),
            escape_xml(&text.text)
        ))
    }

    fn begin_group(&mut self, transform: GroupTransform, title: Option<&str>) -> WaterfallResult<()> {
        self.write_line(format_args!(
            r#"<g transform="translate({},{})">"#,
            fmt_num(transform.translate_x),
            fmt_num(transform.translate_y)
        ))?;
        self.depth += 1;
        if let Some(title) = title {
            self.write_line(format_args!("<title>{}</title>", escape_xml(title)))?;
        }
        Ok(())
    }

    fn end_group(&mut self) -> WaterfallResult<()> {
        self.depth = self.depth.checked_sub(1).ok_or_else(|| {
            WaterfallError::Render("end_group without matching begin_group".to_owned())
        })?;
        self.write_line(format_args!("</g>"))
    }

    fn finish(&mut self) -> WaterfallResult<()> {
        if self.depth != 0 {
            return Err(WaterfallError::Render(format!(
                "{} svg group(s) left open",
                self.depth
            )));
        }
        self.markup.push_str("</svg>\n");
        self.finished = true;
        Ok(())
    }
}

pub(crate) fn map_fmt_error(err: fmt::Error) -> WaterfallError {
    WaterfallError::Render(format!("failed to format markup: {err}"))
}

/// Formats a coordinate with at most three decimals and no trailing zeros.
fn fmt_num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_owned();
    }
    format!("{rounded}")
}

/// Escapes text for XML content and attribute values.
#[must_use]
pub fn escape_xml(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

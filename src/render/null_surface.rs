use crate::core::Viewport;
use crate::error::{WaterfallError, WaterfallResult};
use crate::render::{DrawingSurface, GroupTransform, LinePrimitive, RectPrimitive, TextPrimitive};

/// Headless surface used by tests and dry runs.
///
/// It still validates each primitive and tracks group balance so tests can
/// catch invalid geometry without a real backend.
#[derive(Debug, Default)]
pub struct NullSurface {
    pub last_viewport: Option<Viewport>,
    pub line_count: usize,
    pub rect_count: usize,
    pub text_count: usize,
    pub group_count: usize,
    pub max_depth: usize,
    depth: usize,
}

impl DrawingSurface for NullSurface {
    fn begin(&mut self, viewport: Viewport, _description: Option<&str>) -> WaterfallResult<()> {
        *self = Self {
            last_viewport: Some(viewport),
            ..Self::default()
        };
        Ok(())
    }

    fn rect(&mut self, rect: &RectPrimitive) -> WaterfallResult<()> {
        rect.validate()?;
        self.rect_count += 1;
        Ok(())
    }

    fn line(&mut self, line: &LinePrimitive) -> WaterfallResult<()> {
        line.validate()?;
        self.line_count += 1;
        Ok(())
    }

    fn text(&mut self, text: &TextPrimitive) -> WaterfallResult<()> {
        text.validate()?;
        self.text_count += 1;
        Ok(())
    }

    fn begin_group(&mut self, transform: GroupTransform, _title: Option<&str>) -> WaterfallResult<()> {
        transform.validate()?;
        self.group_count += 1;
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        Ok(())
    }

    fn end_group(&mut self) -> WaterfallResult<()> {
        self.depth = self.depth.checked_sub(1).ok_or_else(|| {
            WaterfallError::Render("end_group without matching begin_group".to_owned())
        })?;
        Ok(())
    }

    fn finish(&mut self) -> WaterfallResult<()> {
        if self.depth != 0 {
            return Err(WaterfallError::Render(format!(
                "{} group(s) left open at finish",
                self.depth
            )));
        }
        Ok(())
    }
}

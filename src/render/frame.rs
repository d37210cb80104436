use crate::core::Viewport;
use crate::error::{WaterfallError, WaterfallResult};
use crate::render::{
    DrawingSurface, GroupTransform, LinePrimitive, RectPrimitive, TextPrimitive,
};

/// Group of nodes sharing one translation and an optional hover title.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupNode {
    pub transform: GroupTransform,
    pub title: Option<String>,
    pub children: Vec<SceneNode>,
}

impl GroupNode {
    #[must_use]
    pub fn new(transform: GroupTransform) -> Self {
        Self {
            transform,
            title: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn push(&mut self, node: impl Into<SceneNode>) {
        self.children.push(node.into());
    }
}

/// One node of the retained chart scene.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    Line(LinePrimitive),
    Rect(RectPrimitive),
    Text(TextPrimitive),
    Group(GroupNode),
}

impl From<LinePrimitive> for SceneNode {
    fn from(line: LinePrimitive) -> Self {
        Self::Line(line)
    }
}

impl From<RectPrimitive> for SceneNode {
    fn from(rect: RectPrimitive) -> Self {
        Self::Rect(rect)
    }
}

impl From<TextPrimitive> for SceneNode {
    fn from(text: TextPrimitive) -> Self {
        Self::Text(text)
    }
}

impl From<GroupNode> for SceneNode {
    fn from(group: GroupNode) -> Self {
        Self::Group(group)
    }
}

/// Primitive totals across a whole scene, groups included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SceneStats {
    pub lines: usize,
    pub rects: usize,
    pub texts: usize,
    pub groups: usize,
}

/// Backend-agnostic scene for one waterfall chart.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterfallFrame {
    pub viewport: Viewport,
    pub description: Option<String>,
    pub nodes: Vec<SceneNode>,
}

impl WaterfallFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            description: None,
            nodes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn push(&mut self, node: impl Into<SceneNode>) {
        self.nodes.push(node.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> SceneStats {
        let mut stats = SceneStats::default();
        accumulate_stats(&self.nodes, &mut stats);
        stats
    }

    pub fn validate(&self) -> WaterfallResult<()> {
        if !self.viewport.is_valid() {
            return Err(WaterfallError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        validate_nodes(&self.nodes)
    }

    /// Replays the scene onto a drawing surface, depth first in node order.
    pub fn draw<S: DrawingSurface + ?Sized>(&self, surface: &mut S) -> WaterfallResult<()> {
        self.validate()?;
        surface.begin(self.viewport, self.description.as_deref())?;
        draw_nodes(&self.nodes, surface)?;
        surface.finish()
    }
}

fn accumulate_stats(nodes: &[SceneNode], stats: &mut SceneStats) {
    for node in nodes {
        match node {
            SceneNode::Line(_) => stats.lines += 1,
            SceneNode::Rect(_) => stats.rects += 1,
            SceneNode::Text(_) => stats.texts += 1,
            SceneNode::Group(group) => {
                stats.groups += 1;
                accumulate_stats(&group.children, stats);
            }
        }
    }
}

fn validate_nodes(nodes: &[SceneNode]) -> WaterfallResult<()> {
    for node in nodes {
        match node {
            SceneNode::Line(line) => line.validate()?,
            SceneNode::Rect(rect) => rect.validate()?,
            SceneNode::Text(text) => text.validate()?,
            SceneNode::Group(group) => {
                group.transform.validate()?;
                validate_nodes(&group.children)?;
            }
        }
    }
    Ok(())
}

fn draw_nodes<S: DrawingSurface + ?Sized>(
    nodes: &[SceneNode],
    surface: &mut S,
) -> WaterfallResult<()> {
    for node in nodes {
        match node {
            SceneNode::Line(line) => surface.line(line)?,
            SceneNode::Rect(rect) => surface.rect(rect)?,
            SceneNode::Text(text) => surface.text(text)?,
            SceneNode::Group(group) => {
                surface.begin_group(group.transform, group.title.as_deref())?;
                draw_nodes(&group.children, surface)?;
                surface.end_group()?;
            }
        }
    }
    Ok(())
}

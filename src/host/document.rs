use tracing::debug;

use crate::render::WaterfallFrame;

pub const CONTAINER_ID: &str = "waterfall-div";

pub const CONTAINER_STYLE: &str = "background:#fff;border: 2px solid #000;position:absolute;\
top:0;left:0;right:0;z-index:99999;margin:0px 8px;padding:0px;";

pub const CLOSE_BUTTON_STYLE: &str =
    "position:absolute;margin:-3px 5px;right:0;font-size:22px;cursor:pointer";

pub const CLOSE_BUTTON_LABEL: &str = "x";

/// Child of the chart container, in append order.
#[derive(Debug, Clone, PartialEq)]
pub enum ContainerChild {
    CloseButton,
    Chart(WaterfallFrame),
}

/// The single dismissible element that holds every mounted chart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartContainer {
    children: Vec<ContainerChild>,
}

impl ChartContainer {
    #[must_use]
    pub fn id(&self) -> &'static str {
        CONTAINER_ID
    }

    #[must_use]
    pub fn children(&self) -> &[ContainerChild] {
        &self.children
    }

    pub fn charts(&self) -> impl Iterator<Item = &WaterfallFrame> {
        self.children.iter().filter_map(|child| match child {
            ContainerChild::Chart(frame) => Some(frame),
            ContainerChild::CloseButton => None,
        })
    }
}

/// Page-side state touched by one injection: the chart container and any
/// user notices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartDocument {
    container: Option<ChartContainer>,
    notices: Vec<String>,
}

impl ChartDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn container(&self) -> Option<&ChartContainer> {
        self.container.as_ref()
    }

    #[must_use]
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Appends a close button and `frame` to the container, creating the
    /// container on first use. Repeated mounts stack their content.
    pub fn mount_chart(&mut self, frame: WaterfallFrame) -> &ChartContainer {
        let reused = self.container.is_some();
        let container = self.container.get_or_insert_with(ChartContainer::default);
        container.children.push(ContainerChild::CloseButton);
        container.children.push(ContainerChild::Chart(frame));
        debug!(
            reused,
            children = container.children.len(),
            "mounted chart into container"
        );
        container
    }

    /// Close-button handler: removes the container if present.
    pub fn dismiss(&mut self) -> bool {
        let removed = self.container.take().is_some();
        debug!(removed, "dismissed chart container");
        removed
    }

    /// Posts a user-visible notice.
    pub fn alert(&mut self, message: impl Into<String>) {
        self.notices.push(message.into());
    }
}

//! Page-side model: the dismissible chart container, user notices, HTML
//! export and the snippet that captures timing data from a live page.

mod capture;
mod document;
mod html;

pub use capture::CAPTURE_SNAPSHOT_JS;
pub use document::{
    CLOSE_BUTTON_LABEL, CLOSE_BUTTON_STYLE, CONTAINER_ID, CONTAINER_STYLE, ChartContainer,
    ChartDocument, ContainerChild,
};

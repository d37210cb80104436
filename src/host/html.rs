use std::fmt::Write as _;

use crate::error::WaterfallResult;
use crate::render::{SvgSurface, escape_xml, map_fmt_error};

use super::{
    CLOSE_BUTTON_LABEL, CLOSE_BUTTON_STYLE, CONTAINER_ID, CONTAINER_STYLE, ChartDocument,
    ContainerChild,
};

impl ChartDocument {
    /// Standalone HTML page with the container, its close buttons and every
    /// chart as inline SVG. Notices are shown above the container.
    pub fn to_html(&self) -> WaterfallResult<String> {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str("<title>Page load waterfall</title>\n</head>\n<body>\n");

        for notice in self.notices() {
            writeln!(html, "<p role=\"alert\">{}</p>", escape_xml(notice))
                .map_err(map_fmt_error)?;
        }

        if let Some(container) = self.container() {
            writeln!(
                html,
                "<div id=\"{CONTAINER_ID}\" style=\"{}\">",
                escape_xml(CONTAINER_STYLE)
            )
            .map_err(map_fmt_error)?;
            for child in container.children() {
                match child {
                    ContainerChild::CloseButton => {
                        writeln!(
                            html,
                            "<span style=\"{}\" onclick=\"{}\">{CLOSE_BUTTON_LABEL}</span>",
                            escape_xml(CLOSE_BUTTON_STYLE),
                            escape_xml(&close_handler_js())
                        )
                        .map_err(map_fmt_error)?;
                    }
                    ContainerChild::Chart(frame) => {
                        html.push_str(&SvgSurface::render_to_string(frame)?);
                    }
                }
            }
            html.push_str("</div>\n");
        }

        html.push_str("</body>\n</html>\n");
        Ok(html)
    }
}

fn close_handler_js() -> String {
    format!(
        "var el=document.getElementById('{CONTAINER_ID}');if(el){{el.parentNode.removeChild(el);}}"
    )
}

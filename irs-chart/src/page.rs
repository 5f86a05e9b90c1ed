//! HTML shell for the dashboard page.
//!
//! The page is rendered once per request from the [`ControlPanel`]. Charts
//! are drawn client-side by plotly.js; the embedded `dashboard.js` posts
//! control changes back to the server and feeds the returned figures to
//! `Plotly.react`.

use crate::controls::{ControlPanel, Dropdown};
use crate::map_view::MAP_OUTPUT;
use crate::trend_view::TREND_CHARTS;
use std::fmt::Write;

// Embedded at compile time so the binary serves a self-contained page.
static DASHBOARD_JS: &str = include_str!("../assets/js/dashboard.js");
static DASHBOARD_CSS: &str = include_str!("../assets/css/dashboard.css");

const PLOTLY_JS_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const THEME_CSS_URL: &str =
    "https://cdn.jsdelivr.net/npm/bootswatch@5.3.3/dist/cyborg/bootstrap.min.css";

pub const PAGE_TITLE: &str = "US Tax Filing Dashboard";

/// Escape text for HTML content and attribute values.
///
/// Line breaks become character references: the HTML parser folds a raw
/// CR LF into LF, which would change option values such as
/// `Number of \r\nfarm returns`.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\r' => out.push_str("&#13;"),
            '\n' => out.push_str("&#10;"),
            _ => out.push(c),
        }
    }
    out
}

/// Labelled `<select>` for one control.
pub fn render_dropdown(dropdown: &Dropdown, font_size: u32) -> String {
    let id = dropdown.id.as_str();
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<div class="control-group" style="font-size: {font_size}px;"><label class="form-label" for="{id}">{label}</label><select id="{id}" class="dash-control form-select">"#,
        label = escape_html(dropdown.label()),
    );
    for option in &dropdown.options {
        let selected = if *option == dropdown.value { " selected" } else { "" };
        let escaped = escape_html(option);
        let _ = write!(html, r#"<option value="{escaped}"{selected}>{escaped}</option>"#);
    }
    html.push_str("</select></div>");
    html
}

/// Empty container plotly.js renders into.
pub fn render_graph(id: &str) -> String {
    format!(r#"<div id="{}" class="graph"></div>"#, escape_html(id))
}

/// Full dashboard page.
pub fn render_page(panel: &ControlPanel) -> String {
    let trend_cols: String = TREND_CHARTS
        .iter()
        .map(|c| format!(r#"<div class="col">{}</div>"#, render_graph(c.output_id)))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="{theme}">
<style>{css}</style>
<script src="{plotly}"></script>
</head>
<body>
<div class="container">
<h1>{title}</h1>
<hr>
<div id="error-display"></div>
<div class="row align-items-start">
<div class="col-md-4"><div class="card"><div class="card-body">{parameter}{year}</div></div></div>
<div class="col-md-8">{map}</div>
</div>
</div>
<div class="container">
<hr>
{state}
<div class="row">{trends}</div>
</div>
<script>{js}</script>
</body>
</html>
"#,
        title = PAGE_TITLE,
        theme = THEME_CSS_URL,
        plotly = PLOTLY_JS_URL,
        css = DASHBOARD_CSS,
        parameter = render_dropdown(&panel.parameter, 17),
        year = render_dropdown(&panel.year, 20),
        map = render_graph(MAP_OUTPUT),
        state = render_dropdown(&panel.state, 20),
        trends = trend_cols,
        js = DASHBOARD_JS,
    )
}

//! Plotly-compatible figure model.
//!
//! A [`Figure`] serializes to the `{data, layout}` document that
//! `Plotly.react` accepts in the browser. Only the attributes the dashboard
//! sets are modelled; everything else is left to plotly.js defaults.

use serde::Serialize;

/// A complete chart: traces plus layout.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn new(data: Vec<Trace>, layout: Layout) -> Self {
        Self { data, layout }
    }

    /// Title text, if the layout has one.
    pub fn title(&self) -> Option<&str> {
        self.layout.title.as_ref().map(|t| t.text.as_str())
    }
}

/// One plotly trace, tagged with its `type`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Choropleth(Choropleth),
    Scattergeo(ScatterGeo),
    Scatter(Scatter),
}

impl Trace {
    /// Number of data points carried by the trace.
    pub fn len(&self) -> usize {
        match self {
            Trace::Choropleth(t) => t.locations.len(),
            Trace::Scattergeo(t) => t.locations.len(),
            Trace::Scatter(t) => t.x.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Regions coloured by value.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Choropleth {
    pub locations: Vec<String>,
    /// `None` serializes as `null`, which plotly leaves uncoloured.
    pub z: Vec<Option<f64>>,
    pub locationmode: String,
    pub colorscale: Vec<(f64, String)>,
    pub colorbar: ColorBar,
}

/// Text or markers placed on a geographic map.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScatterGeo {
    pub locations: Vec<String>,
    pub locationmode: String,
    pub text: Vec<String>,
    pub mode: String,
    pub showlegend: bool,
}

/// A cartesian line/marker series.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Scatter {
    pub x: Vec<String>,
    pub y: Vec<Option<f64>>,
    pub mode: String,
    pub line: Line,
    pub marker: Marker,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ColorBar {
    pub title: Title,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Line {
    pub color: String,
    pub width: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Marker {
    pub size: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Figure layout. Unset fields are omitted from the JSON.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autosize: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Geo {
    pub scope: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub b: u32,
    pub t: u32,
    pub pad: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoexpand: Option<bool>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Font {
    pub color: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Axis {
    pub title: Title,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub axis_type: Option<String>,
}

//! Per-state line charts over every year in the dataset.

use crate::figure::{Axis, Figure, Layout, Line, Margin, Marker, Scatter, Title, Trace};
use irs_db::Database;

/// One line chart in the trend row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendChart {
    /// DOM id of the graph.
    pub output_id: &'static str,
    /// Metric column plotted on the y axis.
    pub column: &'static str,
    pub title: &'static str,
    pub color: &'static str,
}

/// The three trend charts, left to right.
pub const TREND_CHARTS: [TrendChart; 3] = [
    TrendChart {
        output_id: "graph2",
        column: "Number of exemptions",
        title: "Number of Exemptions",
        color: "#E4FA06",
    },
    TrendChart {
        output_id: "graph3",
        column: "Number of \r\nfarm returns",
        title: "Number of farm returns",
        color: "#FBFCFC",
    },
    TrendChart {
        output_id: "graph4",
        column: "Child tax credit Number of returns",
        title: "Child tax credit-Number of returns",
        color: "#06EFFA",
    },
];

const PLOT_BACKGROUND: &str = "#125771";
const LINE_WIDTH: u32 = 4;
const MARKER_SIZE: u32 = 12;

/// Build one trend chart for `state`.
///
/// Years go on a categorical x axis in ascending order. A state with a
/// single year yields a one-point line; an unknown state or a column the
/// dataset lacks yields an empty one.
pub fn make_trend_figure(db: &Database, state: &str, chart: &TrendChart) -> anyhow::Result<Figure> {
    let series = db.query_state_series(state, chart.column)?;
    let (x, y): (Vec<String>, Vec<Option<f64>>) = series
        .into_iter()
        .map(|p| (p.year.to_string(), p.value))
        .unzip();

    let line = Scatter {
        x,
        y,
        mode: "lines+markers".to_string(),
        line: Line {
            color: chart.color.to_string(),
            width: LINE_WIDTH,
        },
        marker: Marker { size: MARKER_SIZE },
    };

    let layout = Layout {
        title: Some(Title::new(chart.title)),
        margin: Some(Margin {
            l: 0,
            r: 5,
            b: 0,
            t: 35,
            pad: 0,
            autoexpand: None,
        }),
        plot_bgcolor: Some(PLOT_BACKGROUND.to_string()),
        xaxis: Some(Axis {
            title: Title::new(""),
            axis_type: Some("category".to_string()),
        }),
        yaxis: Some(Axis {
            title: Title::new(""),
            axis_type: None,
        }),
        ..Layout::default()
    };

    Ok(Figure::new(vec![Trace::Scatter(line)], layout))
}

/// Build all three trend charts for `state`, in [`TREND_CHARTS`] order.
pub fn make_trend_figures(db: &Database, state: &str) -> anyhow::Result<Vec<Figure>> {
    let figures = TREND_CHARTS
        .iter()
        .map(|chart| make_trend_figure(db, state, chart))
        .collect::<anyhow::Result<Vec<_>>>()?;
    if figures.iter().all(|f| f.data.iter().all(Trace::is_empty)) {
        log::warn!("trend: no data for state {:?}", state);
    }
    Ok(figures)
}

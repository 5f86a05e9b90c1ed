//! Choropleth of one metric across states for one year.

use crate::figure::{
    Choropleth, ColorBar, Figure, Font, Geo, Layout, Margin, ScatterGeo, Title, Trace,
};
use irs_db::Database;

/// DOM id of the map graph.
pub const MAP_OUTPUT: &str = "geo_map";

/// Metrics whose name contains this are dollar amounts.
const DOLLAR_MARKER: &str = "Amount";
const DOLLAR_SUFFIX: &str = " (in thousands of dollars)";

const LOCATION_MODE: &str = "USA-states";
const BACKGROUND: &str = "#323130";

/// Carto "Fall" palette, evenly spaced.
const FALL_COLORS: [&str; 7] = [
    "rgb(61, 89, 65)",
    "rgb(119, 136, 104)",
    "rgb(181, 185, 145)",
    "rgb(246, 237, 189)",
    "rgb(237, 187, 138)",
    "rgb(222, 138, 90)",
    "rgb(202, 86, 44)",
];

/// Title for a (metric, year) selection.
pub fn map_title(metric: &str, year: &str) -> String {
    if metric.contains(DOLLAR_MARKER) {
        format!("{} in {}{}", metric, year, DOLLAR_SUFFIX)
    } else {
        format!("{} in {}", metric, year)
    }
}

fn fall_colorscale() -> Vec<(f64, String)> {
    let last = (FALL_COLORS.len() - 1) as f64;
    FALL_COLORS
        .iter()
        .enumerate()
        .map(|(i, c)| (i as f64 / last, c.to_string()))
        .collect()
}

/// Build the map for `metric` in `year`.
///
/// `year` is the raw control value. An unknown metric, unknown year or a
/// year that is not an integer produces a figure with empty series.
pub fn make_map_figure(db: &Database, metric: &str, year: &str) -> anyhow::Result<Figure> {
    let year = year.trim();
    let known_metric = db.has_metric(metric)?;
    let rows = match year.parse::<i64>() {
        Ok(y) if known_metric => db.query_metric_by_state(metric, y)?,
        _ => Vec::new(),
    };
    if rows.is_empty() {
        log::warn!("map: no data for metric {:?} in year {:?}", metric, year);
    }

    let (locations, z): (Vec<String>, Vec<Option<f64>>) =
        rows.into_iter().map(|r| (r.state, r.value)).unzip();

    let choropleth = Choropleth {
        locations: locations.clone(),
        z,
        locationmode: LOCATION_MODE.to_string(),
        colorscale: fall_colorscale(),
        colorbar: ColorBar {
            title: Title::new("Millions USD"),
        },
    };
    let labels = ScatterGeo {
        text: locations.clone(),
        locations,
        locationmode: LOCATION_MODE.to_string(),
        mode: "text".to_string(),
        showlegend: false,
    };

    let layout = Layout {
        title: Some(Title::new(map_title(metric, year))),
        geo: Some(Geo {
            scope: "usa".to_string(),
        }),
        autosize: Some(false),
        width: Some(850),
        margin: Some(Margin {
            l: 0,
            r: 200,
            b: 0,
            t: 35,
            pad: 0,
            autoexpand: Some(false),
        }),
        plot_bgcolor: Some(BACKGROUND.to_string()),
        paper_bgcolor: Some(BACKGROUND.to_string()),
        font: Some(Font {
            color: "white".to_string(),
        }),
        ..Layout::default()
    };

    Ok(Figure::new(
        vec![Trace::Choropleth(choropleth), Trace::Scattergeo(labels)],
        layout,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../../fixtures/irs_audit_data.csv");

    fn sample_db() -> Database {
        let db = Database::new().unwrap();
        db.load_tax_csv(FIXTURE).unwrap();
        db
    }

    fn choropleth(fig: &Figure) -> &Choropleth {
        match &fig.data[0] {
            Trace::Choropleth(c) => c,
            other => panic!("expected choropleth, got {:?}", other),
        }
    }

    #[test]
    fn title_marks_dollar_metrics() {
        assert_eq!(
            map_title("Adjusted gross income (AGI) Amount", "2012"),
            "Adjusted gross income (AGI) Amount in 2012 (in thousands of dollars)"
        );
        assert_eq!(map_title("Number of returns", "2012"), "Number of returns in 2012");
    }

    #[test]
    fn every_metric_title_follows_amount_rule() {
        let db = sample_db();
        for metric in db.query_metric_names().unwrap() {
            let fig = make_map_figure(&db, &metric, "2012").unwrap();
            let title = fig.title().unwrap();
            assert_eq!(
                title.contains(DOLLAR_SUFFIX),
                metric.contains("Amount"),
                "title {:?} for metric {:?}",
                title,
                metric
            );
        }
    }

    #[test]
    fn number_of_returns_2012_has_one_region_per_state() {
        let fig = make_map_figure(&sample_db(), "Number of returns", "2012").unwrap();
        let c = choropleth(&fig);
        assert_eq!(c.locations, vec!["CA", "TX", "NY", "WA", "WY"]);
        assert_eq!(c.z.len(), 5);
        assert_eq!(c.z[0], Some(17150170.0));
        assert!(!c.locations.iter().any(|s| s == "US"));
        assert_eq!(fig.title(), Some("Number of returns in 2012"));
    }

    #[test]
    fn series_length_matches_states_in_year() {
        let db = sample_db();
        for metric in db.query_metric_names().unwrap() {
            for year in db.query_years().unwrap() {
                let fig = make_map_figure(&db, &metric, &year.to_string()).unwrap();
                let expected = if year == 2012 { 5 } else { 4 };
                assert_eq!(fig.data[0].len(), expected);
                assert_eq!(fig.data[1].len(), expected);
            }
        }
    }

    #[test]
    fn labels_overlay_state_codes() {
        let fig = make_map_figure(&sample_db(), "Number of returns", "2011").unwrap();
        match &fig.data[1] {
            Trace::Scattergeo(s) => {
                assert_eq!(s.text, s.locations);
                assert_eq!(s.mode, "text");
                assert_eq!(s.locationmode, "USA-states");
            }
            other => panic!("expected scattergeo, got {:?}", other),
        }
    }

    #[test]
    fn unknown_selection_renders_empty_series() {
        let db = sample_db();
        for (metric, year) in [
            ("Number of returns", "1999"),
            ("Bogus metric", "2012"),
            ("Number of returns", "not a year"),
            ("", ""),
        ] {
            let fig = make_map_figure(&db, metric, year).unwrap();
            assert_eq!(fig.data.len(), 2);
            assert!(fig.data.iter().all(Trace::is_empty));
        }
    }

    #[test]
    fn layout_matches_dark_usa_map() {
        let fig = make_map_figure(&sample_db(), "Number of returns", "2012").unwrap();
        let value = serde_json::to_value(&fig).unwrap();
        assert_eq!(value["layout"]["geo"]["scope"], "usa");
        assert_eq!(value["layout"]["width"], 850);
        assert_eq!(value["layout"]["margin"]["r"], 200);
        assert_eq!(value["layout"]["margin"]["autoexpand"], false);
        assert_eq!(value["layout"]["paper_bgcolor"], "#323130");
        assert_eq!(value["data"][0]["colorbar"]["title"]["text"], "Millions USD");
        assert_eq!(value["data"][0]["colorscale"][0][1], "rgb(61, 89, 65)");
        assert_eq!(value["data"][0]["colorscale"][6][0], 1.0);
    }
}

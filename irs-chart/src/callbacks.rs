//! Callback table mapping controls to the figures they drive.
//!
//! Each [`Callback`] names its input controls, its output graph ids and a
//! handler. When a control changes, [`CallbackRegistry::dispatch`] runs
//! every callback that lists it as an input.

use crate::controls::ControlId;
use crate::figure::Figure;
use crate::map_view::{make_map_figure, MAP_OUTPUT};
use crate::state::ControlValues;
use crate::trend_view::{make_trend_figures, TREND_CHARTS};
use irs_db::Database;
use serde::Serialize;
use std::collections::BTreeMap;

/// Produces one figure per output, in output order.
pub type Handler = fn(&Database, &ControlValues) -> anyhow::Result<Vec<Figure>>;

#[derive(Clone, Serialize)]
pub struct Callback {
    pub name: &'static str,
    pub inputs: Vec<ControlId>,
    pub outputs: Vec<&'static str>,
    #[serde(skip)]
    handler: Handler,
}

impl Callback {
    pub fn depends_on(&self, id: ControlId) -> bool {
        self.inputs.contains(&id)
    }
}

/// Figures keyed by output graph id.
pub type Outputs = BTreeMap<&'static str, Figure>;

#[derive(Clone, Default, Serialize)]
pub struct CallbackRegistry {
    callbacks: Vec<Callback>,
}

fn map_handler(db: &Database, values: &ControlValues) -> anyhow::Result<Vec<Figure>> {
    Ok(vec![make_map_figure(db, &values.parameter, &values.year)?])
}

fn trend_handler(db: &Database, values: &ControlValues) -> anyhow::Result<Vec<Figure>> {
    make_trend_figures(db, &values.state)
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dashboard's two callbacks: the map on (metric, year) and the
    /// trend row on state.
    pub fn dashboard() -> Self {
        let mut registry = Self::new();
        registry.register(
            "map",
            vec![ControlId::Parameter, ControlId::Year],
            vec![MAP_OUTPUT],
            map_handler,
        );
        registry.register(
            "trends",
            vec![ControlId::State],
            TREND_CHARTS.iter().map(|c| c.output_id).collect(),
            trend_handler,
        );
        registry
    }

    pub fn register(
        &mut self,
        name: &'static str,
        inputs: Vec<ControlId>,
        outputs: Vec<&'static str>,
        handler: Handler,
    ) {
        self.callbacks.push(Callback {
            name,
            inputs,
            outputs,
            handler,
        });
    }

    pub fn callbacks(&self) -> &[Callback] {
        &self.callbacks
    }

    /// Every output id, in registration order.
    pub fn output_ids(&self) -> Vec<&'static str> {
        self.callbacks
            .iter()
            .flat_map(|cb| cb.outputs.iter().copied())
            .collect()
    }

    /// Run the callbacks affected by a change to `changed`.
    ///
    /// `None` means initial page load and runs every callback. A control id
    /// that no callback knows runs nothing.
    pub fn dispatch(
        &self,
        db: &Database,
        changed: Option<&str>,
        values: &ControlValues,
    ) -> anyhow::Result<Outputs> {
        let changed = match changed {
            None => None,
            Some(raw) => match raw.parse::<ControlId>() {
                Ok(id) => Some(id),
                Err(e) => {
                    log::warn!("dispatch: {}", e);
                    return Ok(Outputs::new());
                }
            },
        };

        let mut outputs = Outputs::new();
        for cb in &self.callbacks {
            if let Some(id) = changed {
                if !cb.depends_on(id) {
                    continue;
                }
            }
            log::info!("dispatch: running {} callback", cb.name);
            let figures = (cb.handler)(db, values)?;
            anyhow::ensure!(
                figures.len() == cb.outputs.len(),
                "callback {} returned {} figures for {} outputs",
                cb.name,
                figures.len(),
                cb.outputs.len()
            );
            outputs.extend(cb.outputs.iter().copied().zip(figures));
        }
        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::Trace;

    const FIXTURE: &str = include_str!("../../fixtures/irs_audit_data.csv");

    fn sample_db() -> Database {
        let db = Database::new().unwrap();
        db.load_tax_csv(FIXTURE).unwrap();
        db
    }

    fn defaults() -> ControlValues {
        ControlValues {
            parameter: "Number of returns".to_string(),
            year: "2012".to_string(),
            state: "CA".to_string(),
        }
    }

    #[test]
    fn dashboard_table_lists_dependencies() {
        let registry = CallbackRegistry::dashboard();
        let map = &registry.callbacks()[0];
        assert_eq!(map.inputs, vec![ControlId::Parameter, ControlId::Year]);
        assert_eq!(map.outputs, vec!["geo_map"]);
        let trends = &registry.callbacks()[1];
        assert_eq!(trends.inputs, vec![ControlId::State]);
        assert_eq!(trends.outputs, vec!["graph2", "graph3", "graph4"]);
        assert_eq!(
            registry.output_ids(),
            vec!["geo_map", "graph2", "graph3", "graph4"]
        );
    }

    #[test]
    fn initial_load_runs_every_callback() {
        let outputs = CallbackRegistry::dashboard()
            .dispatch(&sample_db(), None, &defaults())
            .unwrap();
        let ids: Vec<&str> = outputs.keys().copied().collect();
        assert_eq!(ids, vec!["geo_map", "graph2", "graph3", "graph4"]);
    }

    #[test]
    fn year_change_only_updates_map() {
        let mut values = defaults();
        values.year = "2011".to_string();
        let outputs = CallbackRegistry::dashboard()
            .dispatch(&sample_db(), Some("year"), &values)
            .unwrap();
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs["geo_map"].title(), Some("Number of returns in 2011"));
        assert_eq!(outputs["geo_map"].data[0].len(), 4);
    }

    #[test]
    fn parameter_change_only_updates_map() {
        let mut values = defaults();
        values.parameter = "Child tax credit Amount".to_string();
        let outputs = CallbackRegistry::dashboard()
            .dispatch(&sample_db(), Some("parameter"), &values)
            .unwrap();
        assert_eq!(outputs.keys().copied().collect::<Vec<_>>(), vec!["geo_map"]);
        assert!(outputs["geo_map"]
            .title()
            .unwrap()
            .ends_with("(in thousands of dollars)"));
    }

    #[test]
    fn state_change_only_updates_trends() {
        let mut values = defaults();
        values.state = "WY".to_string();
        let outputs = CallbackRegistry::dashboard()
            .dispatch(&sample_db(), Some("state"), &values)
            .unwrap();
        assert_eq!(
            outputs.keys().copied().collect::<Vec<_>>(),
            vec!["graph2", "graph3", "graph4"]
        );
        for fig in outputs.values() {
            assert!(matches!(&fig.data[0], Trace::Scatter(s) if s.x == vec!["2012"]));
        }
    }

    #[test]
    fn unknown_control_runs_nothing() {
        let outputs = CallbackRegistry::dashboard()
            .dispatch(&sample_db(), Some("geo_map"), &defaults())
            .unwrap();
        assert!(outputs.is_empty());
    }

    #[test]
    fn handler_output_count_is_checked() {
        fn broken(_: &Database, _: &ControlValues) -> anyhow::Result<Vec<Figure>> {
            Ok(Vec::new())
        }
        let mut registry = CallbackRegistry::new();
        registry.register("broken", vec![ControlId::State], vec!["graph2"], broken);
        assert!(registry.dispatch(&sample_db(), None, &defaults()).is_err());
    }

    #[test]
    fn registry_serializes_without_handlers() {
        let value = serde_json::to_value(CallbackRegistry::dashboard()).unwrap();
        assert_eq!(value["callbacks"][0]["name"], "map");
        assert_eq!(value["callbacks"][0]["inputs"][1], "year");
        assert_eq!(value["callbacks"][1]["outputs"][2], "graph4");
        assert!(value["callbacks"][0].get("handler").is_none());
    }
}

//! Dropdown controls for the dashboard.
//!
//! Every option list is read from the loaded [`Database`], never hard-coded,
//! so the page always matches the dataset it was started with.

use crate::state::ControlValues;
use irs_db::Database;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Metric selected when the page first loads, if the dataset has it.
pub const DEFAULT_METRIC: &str = "Number of returns";
/// Year selected when the page first loads, if the dataset has it.
pub const DEFAULT_YEAR: &str = "2012";
/// State selected when the page first loads, if the dataset has it.
pub const DEFAULT_STATE: &str = "CA";

/// Identifier of a control on the page. Doubles as the DOM id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlId {
    Parameter,
    Year,
    State,
}

impl ControlId {
    pub const ALL: [ControlId; 3] = [ControlId::Parameter, ControlId::Year, ControlId::State];

    pub fn as_str(self) -> &'static str {
        match self {
            ControlId::Parameter => "parameter",
            ControlId::Year => "year",
            ControlId::State => "state",
        }
    }

    /// Label shown above the dropdown.
    pub fn label(self) -> &'static str {
        match self {
            ControlId::Parameter => "IRS Tax Filing Variables",
            ControlId::Year => "Years",
            ControlId::State => "US States",
        }
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ControlId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown control id {:?}", s))
    }
}

/// A dropdown with its options and initial selection. Labels equal values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dropdown {
    pub id: ControlId,
    pub options: Vec<String>,
    pub value: String,
}

impl Dropdown {
    /// Build a dropdown, selecting `preferred` when it is one of the options
    /// and the first option otherwise.
    pub fn new(id: ControlId, options: Vec<String>, preferred: &str) -> Self {
        let value = if options.iter().any(|o| o == preferred) {
            preferred.to_string()
        } else {
            if !options.is_empty() {
                log::warn!(
                    "controls: default {:?} not in {} options, using first",
                    preferred,
                    id
                );
            }
            options.first().cloned().unwrap_or_default()
        };
        Self { id, options, value }
    }

    pub fn label(&self) -> &'static str {
        self.id.label()
    }
}

/// The three dropdowns on the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlPanel {
    pub parameter: Dropdown,
    pub year: Dropdown,
    pub state: Dropdown,
}

impl ControlPanel {
    /// Derive every option list from the loaded data.
    pub fn from_database(db: &Database) -> anyhow::Result<Self> {
        let metrics = db.query_metric_names()?;
        let years = db
            .query_years()?
            .into_iter()
            .map(|y| y.to_string())
            .collect();
        let states = db.query_states()?;

        Ok(Self {
            parameter: Dropdown::new(ControlId::Parameter, metrics, DEFAULT_METRIC),
            year: Dropdown::new(ControlId::Year, years, DEFAULT_YEAR),
            state: Dropdown::new(ControlId::State, states, DEFAULT_STATE),
        })
    }

    pub fn dropdown(&self, id: ControlId) -> &Dropdown {
        match id {
            ControlId::Parameter => &self.parameter,
            ControlId::Year => &self.year,
            ControlId::State => &self.state,
        }
    }

    /// Control values as they stand when the page first loads.
    pub fn initial_values(&self) -> ControlValues {
        ControlValues {
            parameter: self.parameter.value.clone(),
            year: self.year.value.clone(),
            state: self.state.value.clone(),
        }
    }
}

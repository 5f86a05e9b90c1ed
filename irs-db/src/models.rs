//! Query result model structs for the tax filing table.
//!
//! All structs derive `Serialize` so handlers can pass them straight into
//! chart figures or JSON responses.

use serde::Serialize;

/// One state's value for a single (metric, year) selection.
///
/// `value` is `None` when the CSV cell was empty or not numeric.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StateValue {
    pub state: String,
    pub value: Option<f64>,
}

/// One year's value for a single (state, metric) selection.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct YearValue {
    pub year: i64,
    pub value: Option<f64>,
}

/// Counts reported by [`Database::load_tax_csv`](crate::Database::load_tax_csv).
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub struct LoadSummary {
    /// Records stored (aggregate and blank-state rows excluded).
    pub rows_loaded: usize,
    /// Rows dropped because they hold the nationwide `US` aggregate.
    pub aggregate_rows_skipped: usize,
    /// Rows dropped because the state cell was empty.
    pub blank_rows_skipped: usize,
    /// Number of metric columns offered to the control panel.
    pub metric_count: usize,
}

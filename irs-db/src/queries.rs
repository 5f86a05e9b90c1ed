//! Typed query methods for the tax filing table.
//!
//! All queries return typed structs from [`crate::models`] or plain vectors
//! of option values. Unknown metrics, years and states are not errors: they
//! simply match no rows.

use crate::models::{StateValue, YearValue};
use crate::Database;
use rusqlite::params;

impl Database {
    // ───────────────────── Option Lists ─────────────────────

    /// Metric column names in file order (identifier columns excluded).
    pub fn query_metric_names(&self) -> anyhow::Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT name FROM tax_columns WHERE is_metric = 1 ORDER BY position")?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(rows)
    }

    /// Distinct filing years, ascending.
    pub fn query_years(&self) -> anyhow::Result<Vec<i64>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT DISTINCT year FROM tax_records ORDER BY year")?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;
        Ok(rows)
    }

    /// Distinct state codes in order of first appearance in the file.
    pub fn query_states(&self) -> anyhow::Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT state FROM tax_records
             GROUP BY state
             ORDER BY MIN(row_id)",
        )?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(rows)
    }

    /// Whether `name` is one of the metric columns.
    pub fn has_metric(&self, name: &str) -> anyhow::Result<bool> {
        let conn = self.conn()?;
        let found: i64 = conn.query_row(
            "SELECT COUNT(*) FROM tax_columns WHERE is_metric = 1 AND name = ?1",
            params![name],
            |row| row.get(0),
        )?;
        Ok(found > 0)
    }

    // ───────────────────── View Queries ─────────────────────

    /// Every state's value of `metric` in `year`, in file order.
    ///
    /// Returns one entry per record for that year; an unknown metric or
    /// year yields an empty vector.
    pub fn query_metric_by_state(&self, metric: &str, year: i64) -> anyhow::Result<Vec<StateValue>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT r.state, v.value
             FROM tax_records r
             INNER JOIN tax_values v ON v.row_id = r.row_id
             WHERE v.metric = ?1 AND r.year = ?2
             ORDER BY r.row_id",
        )?;
        let rows = stmt
            .query_map(params![metric, year], |row| {
                Ok(StateValue {
                    state: row.get(0)?,
                    value: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "query: query_metric_by_state({:?}, {}) returned {} records",
            metric,
            year,
            rows.len()
        );
        Ok(rows)
    }

    /// One state's value of `metric` for every year it appears, ascending.
    pub fn query_state_series(&self, state: &str, metric: &str) -> anyhow::Result<Vec<YearValue>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT r.year, v.value
             FROM tax_records r
             INNER JOIN tax_values v ON v.row_id = r.row_id
             WHERE r.state = ?1 AND v.metric = ?2
             ORDER BY r.year, r.row_id",
        )?;
        let rows = stmt
            .query_map(params![state, metric], |row| {
                Ok(YearValue {
                    year: row.get(0)?,
                    value: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "query: query_state_series({:?}, {:?}) returned {} records",
            state,
            metric,
            rows.len()
        );
        Ok(rows)
    }
}

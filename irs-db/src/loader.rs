//! CSV loading for populating the in-memory SQLite database.
//!
//! # CSV Format
//!
//! Headers are required. `State` and `Year` are located by name; every
//! column after the first three identifier columns is a metric. Header text
//! is stored byte-for-byte, so names such as `Number of \r\nfarm returns`
//! survive with their embedded line break.
//!
//! ```text
//! State,Year,STATEFIPS,Number of returns,Adjusted gross income (AGI) Amount
//! CA,2012,6,17150170,1102585391
//! US,2012,0,144928472,9041930478
//! ```

use crate::models::LoadSummary;
use crate::{Database, AGGREGATE_STATE, IDENTIFIER_COLUMNS, STATE_COLUMN, YEAR_COLUMN};
use anyhow::Context;
use rusqlite::params;

impl Database {
    /// Load the tax filing table from a CSV string.
    ///
    /// Rows for the `US` aggregate are dropped; rows with an empty state are
    /// skipped. Metric cells that are empty or non-numeric are stored as
    /// `NULL`. A year that is not an integer, a row with the wrong number of
    /// fields, or a missing `State`/`Year` header fails the whole load.
    ///
    /// The table is immutable once loaded: calling this twice is an error.
    pub fn load_tax_csv(&self, csv_data: &str) -> anyhow::Result<LoadSummary> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(csv_data.as_bytes());

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let state_idx = headers
            .iter()
            .position(|h| h == STATE_COLUMN)
            .ok_or_else(|| anyhow::anyhow!("missing `{}` column", STATE_COLUMN))?;
        let year_idx = headers
            .iter()
            .position(|h| h == YEAR_COLUMN)
            .ok_or_else(|| anyhow::anyhow!("missing `{}` column", YEAR_COLUMN))?;
        if headers.len() < IDENTIFIER_COLUMNS {
            anyhow::bail!(
                "expected at least {} columns, found {}",
                IDENTIFIER_COLUMNS,
                headers.len()
            );
        }

        let metrics: Vec<(usize, &str)> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| is_metric_position(*i, state_idx, year_idx))
            .map(|(i, h)| (i, h.as_str()))
            .collect();

        let mut conn = self.conn()?;
        let already_loaded: i64 =
            conn.query_row("SELECT COUNT(*) FROM tax_columns", [], |row| row.get(0))?;
        if already_loaded > 0 {
            anyhow::bail!("tax data is already loaded");
        }

        let mut summary = LoadSummary {
            metric_count: metrics.len(),
            ..LoadSummary::default()
        };

        let tx = conn.transaction()?;
        {
            let mut insert_column =
                tx.prepare("INSERT INTO tax_columns (position, name, is_metric) VALUES (?1, ?2, ?3)")?;
            for (position, name) in headers.iter().enumerate() {
                let is_metric = is_metric_position(position, state_idx, year_idx);
                insert_column
                    .execute(params![position as i64, name, is_metric])
                    .with_context(|| format!("duplicate column {:?}", name))?;
            }

            let mut insert_record =
                tx.prepare("INSERT INTO tax_records (row_id, state, year) VALUES (?1, ?2, ?3)")?;
            let mut insert_value =
                tx.prepare("INSERT INTO tax_values (row_id, metric, value) VALUES (?1, ?2, ?3)")?;

            for (row_id, result) in rdr.records().enumerate() {
                let r = result?;
                let line = r.position().map(|p| p.line()).unwrap_or(0);

                let state = r.get(state_idx).unwrap_or("").trim();
                if state.is_empty() {
                    summary.blank_rows_skipped += 1;
                    continue;
                }
                if state == AGGREGATE_STATE {
                    summary.aggregate_rows_skipped += 1;
                    continue;
                }

                let year_str = r.get(year_idx).unwrap_or("").trim();
                let year: i64 = year_str
                    .parse()
                    .with_context(|| format!("line {}: invalid year {:?}", line, year_str))?;

                insert_record.execute(params![row_id as i64, state, year])?;
                for &(idx, metric) in &metrics {
                    let value: Option<f64> = r.get(idx).and_then(|s| s.trim().parse().ok());
                    insert_value.execute(params![row_id as i64, metric, value])?;
                }
                summary.rows_loaded += 1;
            }
        }
        tx.commit()?;

        if summary.blank_rows_skipped > 0 {
            log::warn!(
                "loader: skipped {} rows with an empty state",
                summary.blank_rows_skipped
            );
        }
        log::info!(
            "loader: Loaded {} tax records, dropped {} aggregate rows",
            summary.rows_loaded,
            summary.aggregate_rows_skipped
        );
        Ok(summary)
    }
}

/// Identifier columns (the first three, plus `State`/`Year` wherever they
/// sit) are never metrics.
fn is_metric_position(position: usize, state_idx: usize, year_idx: usize) -> bool {
    position >= IDENTIFIER_COLUMNS && position != state_idx && position != year_idx
}

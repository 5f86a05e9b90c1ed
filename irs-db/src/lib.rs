//! In-memory SQLite dataset layer for IRS tax filing statistics.
//!
//! The dashboard reads one CSV file at startup. Every row is a (state, year)
//! pair followed by a set of numeric metric columns. This crate loads that
//! file into an in-memory SQLite database and exposes typed query methods
//! that the chart handlers call on every control change.
//!
//! # Architecture
//!
//! - `Arc<Mutex<Connection>>` wrapper so the database can be shared with the
//!   HTTP shell; the mutex also serializes requests against it
//! - The table is written once by [`Database::load_tax_csv`] and only read
//!   afterwards
//! - The aggregate `US` row is dropped at load time, so no query can ever
//!   return it
//!
//! # Usage
//!
//! ```rust
//! use irs_db::Database;
//!
//! let db = Database::new().unwrap();
//! db.load_tax_csv("State,Year,STATEFIPS,Number of returns\nCA,2012,6,17150170\nUS,2012,0,144928472\n").unwrap();
//!
//! assert_eq!(db.query_states().unwrap(), vec!["CA".to_string()]);
//! assert_eq!(db.query_metric_names().unwrap(), vec!["Number of returns".to_string()]);
//! let map = db.query_metric_by_state("Number of returns", 2012).unwrap();
//! assert_eq!(map.len(), 1);
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.
//!
//! - `tax_columns` - Every CSV header in file order, flagged as metric or identifier
//! - `tax_records` - One row per (state, year) pair
//! - `tax_values` - One row per (record, metric) cell; `NULL` for empty cells

pub mod schema;
mod loader;
mod queries;
pub mod models;

use anyhow::Context;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// Header of the column holding the two-letter state code.
pub const STATE_COLUMN: &str = "State";

/// Header of the column holding the filing year.
pub const YEAR_COLUMN: &str = "Year";

/// State code of the nationwide aggregate row, excluded from every view.
pub const AGGREGATE_STATE: &str = "US";

/// Number of leading identifier columns that are never offered as metrics.
pub const IDENTIFIER_COLUMNS: usize = 3;

/// In-memory SQLite database holding the tax filing table.
///
/// Cheaply cloneable (via `Arc`); every clone sees the same connection.
///
/// # Example
///
/// ```rust
/// use irs_db::Database;
///
/// let db = Database::new().unwrap();
/// db.load_tax_csv("State,Year,STATEFIPS,Number of returns\nCA,2012,6,17150170\n").unwrap();
/// assert_eq!(db.query_years().unwrap(), vec![2012]);
/// ```
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    ///
    /// The database is empty after creation; use [`load_tax_csv`](Self::load_tax_csv)
    /// to populate it.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Read a CSV file from disk and load it into a fresh database.
    ///
    /// A missing, unreadable or malformed file is an error; callers at
    /// startup treat it as fatal.
    pub fn open_csv(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let csv_data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read tax data file {}", path.display()))?;
        let db = Self::new()?;
        let summary = db
            .load_tax_csv(&csv_data)
            .with_context(|| format!("failed to load tax data file {}", path.display()))?;
        log::info!(
            "Loaded {} records ({} metrics, {} aggregate rows dropped) from {}",
            summary.rows_loaded,
            summary.metric_count,
            summary.aggregate_rows_skipped,
            path.display()
        );
        Ok(db)
    }

    fn conn(&self) -> anyhow::Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("tax database mutex poisoned"))
    }
}

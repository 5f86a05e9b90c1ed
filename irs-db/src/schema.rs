//! SQL schema definitions for the in-memory SQLite database.
//!
//! The schema is applied as a single batch when the database is initialized.

/// Returns the full SQL schema as a single batch string.
///
/// This creates the following tables:
///
/// - `tax_columns` - CSV headers in file order (`position`, `name`, `is_metric`)
/// - `tax_records` - One row per (state, year) pair, keyed by file row
/// - `tax_values` - Metric cells in long form (`row_id`, `metric`, `value`)
///
/// Metric names are dataset-defined, so cells are stored one per row rather
/// than one SQL column per metric.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS tax_columns (
        position INTEGER PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        is_metric INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS tax_records (
        row_id INTEGER PRIMARY KEY,
        state TEXT NOT NULL,
        year INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_records_state ON tax_records(state);
    CREATE INDEX IF NOT EXISTS idx_records_year ON tax_records(year);

    CREATE TABLE IF NOT EXISTS tax_values (
        row_id INTEGER NOT NULL REFERENCES tax_records(row_id),
        metric TEXT NOT NULL,
        value REAL,
        PRIMARY KEY (row_id, metric)
    );
    CREATE INDEX IF NOT EXISTS idx_values_metric ON tax_values(metric);
    "#
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn schema_is_valid_sql() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema())
            .expect("Schema SQL should be valid");
    }

    #[test]
    fn schema_creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();

        for table in &["tax_columns", "tax_records", "tax_values"] {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "Table '{}' should exist", table);
        }
    }

    #[test]
    fn schema_creates_indexes() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();

        for idx in &["idx_records_state", "idx_records_year", "idx_values_metric"] {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='index' AND name=?1",
                    [idx],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "Index '{}' should exist", idx);
        }
    }

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();
        conn.execute_batch(create_schema())
            .expect("Applying schema twice should succeed due to IF NOT EXISTS");
    }
}

//! Success envelope.
//!
//! [`QueryResult`] is an opaque wrapper over the raw server response,
//! created only by the query executor on a classified-success path.
//! Ownership transfers to the caller: the result-decoding layer reads
//! column metadata and row data through [`QueryResult::rows`] /
//! [`QueryResult::into_rows`] and owns the underlying resource from there.

use postgres::Row;

/// Raw rows of a successful statement, awaiting decoding.
pub struct QueryResult {
    rows: Vec<Row>,
}

impl QueryResult {
    pub(crate) fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Number of data rows in the response. Zero for command statements.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Borrow the raw rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Transfer ownership of the raw rows to the decoding layer.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

//! Database type definitions
//!
//! Query output is kept as display strings: the UI only ever renders it.

/// Text shown for SQL NULL
pub const NULL_DISPLAY: &str = "NULL";

/// Query execution results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResults {
    /// Column names in result order
    pub columns: Vec<String>,
    /// Result rows, each as wide as `columns`
    pub rows: Vec<Vec<String>>,
}

impl QueryResults {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

//! Row structs handed across the [`Connector`](crate::Connector) boundary.
//!
//! These are *persistence* models: they carry no repair behaviour.
//! Repair types live in the `repair` crate.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// fetched rows
// ---------------------------------------------------------------------------

/// One fetched row: its identifier plus the requested text cells, in the
/// order the columns were asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRow {
    /// Identifier rendered as text (numeric ids come back as their decimal form).
    pub id: String,
    /// `None` is SQL NULL.
    ///
    /// May be shorter than the requested column list when a cell could not
    /// be decoded; callers treat such rows as malformed.
    pub cells: Vec<Option<String>>,
}

impl SourceRow {
    pub fn new(id: impl Into<String>, cells: Vec<Option<String>>) -> Self {
        Self { id: id.into(), cells }
    }

    /// Whether every one of `expected` columns is present.
    pub fn is_complete(&self, expected: usize) -> bool {
        self.cells.len() >= expected
    }
}

// ---------------------------------------------------------------------------
// verification samples
// ---------------------------------------------------------------------------

/// A read-only query used to eyeball repaired rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleQuery {
    /// Heading printed above the sample.
    pub label: String,
    pub table: String,
    pub id_column: String,
    pub columns: Vec<String>,
    /// Raw SQL predicate appended as `WHERE <filter>`.
    ///
    /// Only ever built from fixed strings in code, never from user input.
    pub filter: Option<String>,
    pub limit: Option<u32>,
}

impl SampleQuery {
    pub fn new(label: impl Into<String>, table: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            label: label.into(),
            table: table.into(),
            id_column: "id".to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            filter: None,
            limit: None,
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

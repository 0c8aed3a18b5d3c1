//! Repair domain models: what to repair and what happened.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Targets
// ---------------------------------------------------------------------------

/// One table and the text columns to inspect in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableTarget {
    pub table: String,
    pub columns: Vec<String>,
    #[serde(default = "default_id_column")]
    pub id_column: String,
}

fn default_id_column() -> String {
    "id".to_string()
}

impl TableTarget {
    /// Target `columns` of `table`, keyed by `id`.
    pub fn new(table: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            table: table.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            id_column: default_id_column(),
        }
    }

    pub fn with_id_column(mut self, id_column: impl Into<String>) -> Self {
        self.id_column = id_column.into();
        self
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// How a single non-empty cell was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    AlreadyCorrect,
    CouldNotFix,
    NoChange,
    Fixed,
    /// Dry run: the update was logged but not issued.
    WouldFix,
    UpdateFailed,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyCorrect => write!(f, "already_correct"),
            Self::CouldNotFix    => write!(f, "could_not_fix"),
            Self::NoChange       => write!(f, "no_change"),
            Self::Fixed          => write!(f, "fixed"),
            Self::WouldFix       => write!(f, "would_fix"),
            Self::UpdateFailed   => write!(f, "update_failed"),
        }
    }
}

/// One inspected cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairRecord {
    pub table: String,
    pub column: String,
    pub row_id: String,
    pub original: String,
    /// Present whenever a correction was computed.
    pub corrected: Option<String>,
    pub outcome: Outcome,
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Everything that happened to one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableReport {
    pub table: String,
    pub columns: Vec<String>,
    /// Rows returned by the fetch, malformed ones included.
    pub rows_seen: usize,
    pub records: Vec<RepairRecord>,
}

impl TableReport {
    pub fn count(&self, outcome: Outcome) -> usize {
        self.records.iter().filter(|r| r.outcome == outcome).count()
    }

    pub fn fixed(&self) -> usize {
        self.count(Outcome::Fixed)
    }

    pub fn failed(&self) -> usize {
        self.count(Outcome::UpdateFailed)
    }
}

/// Result of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub server_version: String,
    pub dry_run: bool,
    pub tables: Vec<TableReport>,
}

impl RunSummary {
    pub fn total_fixed(&self) -> usize {
        self.tables.iter().map(TableReport::fixed).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.tables.iter().map(TableReport::failed).sum()
    }
}

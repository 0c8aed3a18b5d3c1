//! Repair-level error types.

use thiserror::Error;

/// Errors that stop a repair run.
///
/// Per-row problems never surface here; they are logged and skipped.
#[derive(Debug, Error)]
pub enum RepairError {
    /// The startup probe could not reach the database.
    #[error("connection failed: {0}")]
    Connectivity(#[source] db::DbError),
}

//! Typed error type for the db crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("invalid database url: {0}")]
    InvalidUrl(String),

    /// Raised by test doubles and by callers asking for a table that isn't there.
    #[error("unknown table '{0}'")]
    UnknownTable(String),

    #[error("query failed: {0}")]
    Query(String),
}

//! The `Connector` trait: everything the repair logic needs from a database.

use async_trait::async_trait;

use crate::{DbError, SampleQuery, SourceRow};

/// A blocking-in-spirit database handle: every call completes before the
/// caller issues the next one.
///
/// The production implementation is [`MySqlConnector`](crate::MySqlConnector);
/// tests use [`MockConnector`](crate::mock::MockConnector).
#[async_trait]
pub trait Connector: Send + Sync {
    /// Connectivity probe. Returns the server version string.
    async fn server_version(&self) -> Result<String, DbError>;

    /// Fetch every row of `table` with its `id_column` and the given text
    /// `columns`.
    async fn fetch_rows(
        &self,
        table: &str,
        id_column: &str,
        columns: &[String],
    ) -> Result<Vec<SourceRow>, DbError>;

    /// Set `column` to `value` on the row whose `id_column` equals `id`.
    ///
    /// Returns the number of rows the server reports as affected.
    async fn update_cell(
        &self,
        table: &str,
        column: &str,
        id_column: &str,
        id: &str,
        value: &str,
    ) -> Result<u64, DbError>;

    /// Run a verification sample.
    async fn fetch_sample(&self, query: &SampleQuery) -> Result<Vec<SourceRow>, DbError>;
}

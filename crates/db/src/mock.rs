//! `MockConnector`: an in-memory test double for [`Connector`].
//!
//! Tables are loaded from mysql-client style fixtures (see
//! [`tabular`](crate::tabular)). Updates mutate the stored rows, so a second
//! pass over the same table sees the repaired values.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::tabular::parse_client_output;
use crate::{Connector, DbError, SampleQuery, SourceRow};

/// One recorded `update_cell` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCall {
    pub table: String,
    pub column: String,
    pub id: String,
    pub value: String,
}

#[derive(Debug, Clone)]
struct MockTable {
    /// First entry is the id column.
    header: Vec<String>,
    rows: Vec<SourceRow>,
}

impl MockTable {
    fn column_index(&self, column: &str) -> Result<usize, DbError> {
        self.header
            .iter()
            .skip(1)
            .position(|h| h == column)
            .ok_or_else(|| DbError::Query(format!("Unknown column '{column}'")))
    }

    fn project(&self, columns: &[String]) -> Result<Vec<SourceRow>, DbError> {
        let indexes = columns
            .iter()
            .map(|c| self.column_index(c))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self
            .rows
            .iter()
            .map(|row| {
                let cells = indexes
                    .iter()
                    .map_while(|&i| row.cells.get(i).cloned())
                    .collect();
                SourceRow { id: row.id.clone(), cells }
            })
            .collect())
    }
}

/// A connector that serves fixtures and records every update it receives.
#[derive(Default)]
pub struct MockConnector {
    tables: Mutex<HashMap<String, MockTable>>,
    version: Option<String>,
    failing_ids: HashSet<String>,
    /// All updates seen by this connector (in call order), failed ones included.
    pub updates: Arc<Mutex<Vec<UpdateCall>>>,
}

impl MockConnector {
    /// An empty database whose probe succeeds.
    pub fn new() -> Self {
        Self {
            version: Some("8.0.36-mock".to_string()),
            ..Self::default()
        }
    }

    /// Load `table` from client-style text (header line first).
    pub fn with_table(self, table: impl Into<String>, fixture: &str) -> Self {
        let parsed = parse_client_output(fixture);
        self.tables.lock().unwrap().insert(
            table.into(),
            MockTable { header: parsed.header, rows: parsed.rows },
        );
        self
    }

    /// Make the connectivity probe fail.
    pub fn unreachable(mut self) -> Self {
        self.version = None;
        self
    }

    /// Make every update of the row with this id fail.
    pub fn failing_updates_for(mut self, id: impl Into<String>) -> Self {
        self.failing_ids.insert(id.into());
        self
    }

    /// Number of update calls received.
    pub fn update_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }

    /// Current value of a stored cell, `None` for NULL or missing.
    pub fn cell(&self, table: &str, column: &str, id: &str) -> Option<String> {
        let tables = self.tables.lock().unwrap();
        let t = tables.get(table)?;
        let idx = t.column_index(column).ok()?;
        t.rows
            .iter()
            .find(|r| r.id == id)
            .and_then(|r| r.cells.get(idx).cloned().flatten())
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn server_version(&self) -> Result<String, DbError> {
        self.version
            .clone()
            .ok_or_else(|| DbError::Query("Can't connect to MySQL server".to_string()))
    }

    async fn fetch_rows(
        &self,
        table: &str,
        _id_column: &str,
        columns: &[String],
    ) -> Result<Vec<SourceRow>, DbError> {
        let tables = self.tables.lock().unwrap();
        let t = tables
            .get(table)
            .ok_or_else(|| DbError::UnknownTable(table.to_string()))?;
        t.project(columns)
    }

    async fn update_cell(
        &self,
        table: &str,
        column: &str,
        _id_column: &str,
        id: &str,
        value: &str,
    ) -> Result<u64, DbError> {
        self.updates.lock().unwrap().push(UpdateCall {
            table: table.to_string(),
            column: column.to_string(),
            id: id.to_string(),
            value: value.to_string(),
        });

        if self.failing_ids.contains(id) {
            return Err(DbError::Query(format!("Lock wait timeout on id={id}")));
        }

        let mut tables = self.tables.lock().unwrap();
        let t = tables
            .get_mut(table)
            .ok_or_else(|| DbError::UnknownTable(table.to_string()))?;
        let idx = t.column_index(column)?;

        let mut affected = 0;
        for row in t.rows.iter_mut().filter(|r| r.id == id) {
            if let Some(cell) = row.cells.get_mut(idx) {
                *cell = Some(value.to_string());
                affected += 1;
            }
        }
        Ok(affected)
    }

    /// Serves the sample's columns and honours `limit`; `filter` is ignored.
    async fn fetch_sample(&self, query: &SampleQuery) -> Result<Vec<SourceRow>, DbError> {
        let mut rows = self
            .fetch_rows(&query.table, &query.id_column, &query.columns)
            .await?;
        if let Some(limit) = query.limit {
            rows.truncate(limit as usize);
        }
        Ok(rows)
    }
}

//! `MySqlConnector`: the production [`Connector`] over a `sqlx` MySQL pool.
//!
//! Values always travel as bound parameters. Table and column names can't be
//! bound, so they are backtick-quoted with [`quote_ident`].

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::Row;
use tracing::{debug, instrument};

use crate::{Connector, DbError, DbPool, SampleQuery, SourceRow};

/// Quote a MySQL identifier, doubling any embedded backtick.
pub fn quote_ident(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

/// `SELECT` for an id column (rendered as text) followed by `columns`.
pub fn select_statement(
    table: &str,
    id_column: &str,
    columns: &[String],
    filter: Option<&str>,
    limit: Option<u32>,
) -> String {
    let id = quote_ident(id_column);
    let mut projection = vec![format!("CAST({id} AS CHAR) AS {id}")];
    projection.extend(columns.iter().map(|c| quote_ident(c)));

    let mut sql = format!("SELECT {} FROM {}", projection.join(", "), quote_ident(table));
    if let Some(filter) = filter {
        sql.push_str(" WHERE ");
        sql.push_str(filter);
    }
    if let Some(limit) = limit {
        sql.push_str(&format!(" LIMIT {limit}"));
    }
    sql
}

/// Parameterized single-cell `UPDATE`: binds the new value, then the id.
pub fn update_statement(table: &str, column: &str, id_column: &str) -> String {
    format!(
        "UPDATE {} SET {} = ? WHERE {} = ?",
        quote_ident(table),
        quote_ident(column),
        quote_ident(id_column),
    )
}

pub struct MySqlConnector {
    pool: DbPool,
}

impl MySqlConnector {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Decode the id and as many cells as decode cleanly.
///
/// Decoding stops at the first bad cell, so the row comes back short and is
/// skipped upstream as malformed.
fn decode_row(row: &MySqlRow, columns: usize) -> Option<SourceRow> {
    let id: String = match row.try_get::<Option<String>, _>(0) {
        Ok(Some(id)) => id,
        Ok(None) | Err(_) => return None,
    };

    let mut cells = Vec::with_capacity(columns);
    for idx in 1..=columns {
        match row.try_get::<Option<String>, _>(idx) {
            Ok(cell) => cells.push(cell),
            Err(e) => {
                debug!("row id={} column #{} not decodable as text: {}", id, idx, e);
                break;
            }
        }
    }
    Some(SourceRow { id, cells })
}

#[async_trait]
impl Connector for MySqlConnector {
    async fn server_version(&self) -> Result<String, DbError> {
        let version: String = sqlx::query_scalar("SELECT VERSION()")
            .fetch_one(&self.pool)
            .await?;
        Ok(version)
    }

    #[instrument(skip(self, columns))]
    async fn fetch_rows(
        &self,
        table: &str,
        id_column: &str,
        columns: &[String],
    ) -> Result<Vec<SourceRow>, DbError> {
        let sql = select_statement(table, id_column, columns, None, None);
        debug!("{sql}");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().filter_map(|r| decode_row(r, columns.len())).collect())
    }

    async fn update_cell(
        &self,
        table: &str,
        column: &str,
        id_column: &str,
        id: &str,
        value: &str,
    ) -> Result<u64, DbError> {
        let sql = update_statement(table, column, id_column);
        let result = sqlx::query(&sql)
            .bind(value)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn fetch_sample(&self, query: &SampleQuery) -> Result<Vec<SourceRow>, DbError> {
        let sql = select_statement(
            &query.table,
            &query.id_column,
            &query.columns,
            query.filter.as_deref(),
            query.limit,
        );
        debug!("{sql}");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().filter_map(|r| decode_row(r, query.columns.len())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn identifiers_are_backtick_quoted() {
        assert_eq!(quote_ident("Products"), "`Products`");
        assert_eq!(quote_ident("we`ird"), "`we``ird`");
    }

    #[test]
    fn select_renders_id_as_text_first() {
        let sql = select_statement("Categories", "id", &cols(&["name", "description"]), None, None);
        assert_eq!(
            sql,
            "SELECT CAST(`id` AS CHAR) AS `id`, `name`, `description` FROM `Categories`"
        );
    }

    #[test]
    fn select_appends_filter_and_limit() {
        let sql = select_statement(
            "Products",
            "id",
            &cols(&["name"]),
            Some("category_id IN (2,4,6,8,10)"),
            Some(10),
        );
        assert!(sql.ends_with("FROM `Products` WHERE category_id IN (2,4,6,8,10) LIMIT 10"));
    }

    #[test]
    fn update_binds_value_and_id() {
        let sql = update_statement("Products", "name", "id");
        assert_eq!(sql, "UPDATE `Products` SET `name` = ? WHERE `id` = ?");
        // the value never appears in the statement text
        assert!(!sql.contains('\''));
    }
}

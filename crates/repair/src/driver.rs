//! Row repair driver.
//!
//! `RepairDriver` fixes one table at a time:
//! 1. Fetches every row's id and target columns through the [`Connector`].
//! 2. Skips rows that came back short (malformed) without logging.
//! 3. Classifies each cell with the corrector and logs the verdict.
//! 4. Issues a single-cell update for every value that actually changed.
//!
//! Nothing here fails the run. A bad fetch or a failed update is logged and
//! the driver moves on to the next table, row or cell.

use db::Connector;
use tracing::{debug, error, info, instrument, warn};

use crate::corrector::{classify, looks_double_encoded, truncate_chars, Verdict};
use crate::models::{Outcome, RepairRecord, TableReport, TableTarget};

/// Characters shown for values that are already fine.
const ASCII_PREVIEW: usize = 50;
/// Characters shown on before/after lines.
const DIFF_PREVIEW: usize = 60;

/// Tuning knobs for the driver.
#[derive(Debug, Clone, Default)]
pub struct DriverConfig {
    /// Log the updates that would be issued without issuing them.
    pub dry_run: bool,
}

pub struct RepairDriver<'a> {
    connector: &'a dyn Connector,
    config: DriverConfig,
}

impl<'a> RepairDriver<'a> {
    pub fn new(connector: &'a dyn Connector, config: DriverConfig) -> Self {
        Self { connector, config }
    }

    /// Repair every target column of `target.table`.
    #[instrument(skip(self, target), fields(table = %target.table))]
    pub async fn fix_table(&self, target: &TableTarget) -> TableReport {
        info!("--- Fixing table: {} ---", target.table);

        let mut report = TableReport {
            table: target.table.clone(),
            columns: target.columns.clone(),
            ..TableReport::default()
        };

        let rows = match self
            .connector
            .fetch_rows(&target.table, &target.id_column, &target.columns)
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                error!("  Could not read {}: {}", target.table, e);
                return report;
            }
        };

        if rows.is_empty() {
            info!("  No rows found.");
            return report;
        }
        report.rows_seen = rows.len();

        for row in &rows {
            if !row.is_complete(target.columns.len()) {
                debug!("skipping malformed row id={}", row.id);
                continue;
            }

            for (column, cell) in target.columns.iter().zip(&row.cells) {
                if let Some(record) = self.fix_cell(target, column, &row.id, cell.as_deref()).await {
                    report.records.push(record);
                }
            }
        }

        if self.config.dry_run {
            info!(
                "  Would fix {} values in {}.{{{}}}",
                report.count(Outcome::WouldFix),
                target.table,
                target.columns.join(",")
            );
        } else {
            info!(
                "  Fixed {} values in {}.{{{}}}",
                report.fixed(),
                target.table,
                target.columns.join(",")
            );
        }
        report
    }

    /// Classify one cell and update it if needed.
    ///
    /// Returns `None` for empty and NULL cells, which leave no record.
    async fn fix_cell(
        &self,
        target: &TableTarget,
        column: &str,
        row_id: &str,
        value: Option<&str>,
    ) -> Option<RepairRecord> {
        let original = value?;
        let tag = format!("[{}.{} id={}]", target.table, column, row_id);

        let record = |corrected: Option<String>, outcome: Outcome| RepairRecord {
            table: target.table.clone(),
            column: column.to_string(),
            row_id: row_id.to_string(),
            original: original.to_string(),
            corrected,
            outcome,
        };

        let fixed = match classify(Some(original)) {
            Verdict::Null | Verdict::Empty => return None,
            Verdict::Ascii => {
                info!("  {tag} Already correct ASCII: {}", truncate_chars(original, ASCII_PREVIEW));
                return Some(record(None, Outcome::AlreadyCorrect));
            }
            Verdict::Unfixable => {
                info!("  {tag} Could not fix, skipping.");
                return Some(record(None, Outcome::CouldNotFix));
            }
            Verdict::Unchanged => {
                info!("  {tag} No change needed.");
                return Some(record(Some(original.to_string()), Outcome::NoChange));
            }
            Verdict::Fixed(fixed) => fixed,
        };

        info!("  {tag}");
        info!("    Before: {}", truncate_chars(original, DIFF_PREVIEW));
        info!("    After:  {}", truncate_chars(&fixed, DIFF_PREVIEW));

        if looks_double_encoded(&fixed) {
            warn!("    {tag} may be double-encoded; only one layer was reversed");
        }

        if self.config.dry_run {
            info!("    (dry run) would update");
            return Some(record(Some(fixed), Outcome::WouldFix));
        }

        let outcome = match self
            .connector
            .update_cell(&target.table, column, &target.id_column, row_id, &fixed)
            .await
        {
            Ok(affected) => {
                if affected == 0 {
                    warn!("    {tag} update matched no row");
                }
                Outcome::Fixed
            }
            Err(e) => {
                error!("    ERROR: {e}");
                Outcome::UpdateFailed
            }
        };
        Some(record(Some(fixed), outcome))
    }
}

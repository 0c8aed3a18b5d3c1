//! Post-repair inspection.
//!
//! Re-reads a handful of rows and prints them in mysql-client layout so a
//! human can eyeball the text. No pass/fail judgement is made.

use db::tabular::render_client_output;
use db::{Connector, DbError, SampleQuery, SourceRow};
use tracing::error;

/// Render one sample's result for the console.
pub fn render_sample(query: &SampleQuery, result: &Result<Vec<SourceRow>, DbError>) -> String {
    let body = match result {
        Ok(rows) if rows.is_empty() => "  No rows found.".to_string(),
        Ok(rows) => {
            let header: Vec<String> = std::iter::once(query.id_column.clone())
                .chain(query.columns.iter().cloned())
                .collect();
            render_client_output(&header, rows)
        }
        Err(e) => format!("  ERROR: {e}"),
    };
    format!("{}:\n{}\n", query.label, body)
}

/// Run every sample and print it to stdout.
///
/// Returns how many samples could be read.
pub async fn verify(connector: &dyn Connector, samples: &[SampleQuery]) -> usize {
    println!("\n=== Verification ===");

    let mut readable = 0;
    for query in samples {
        let result = connector.fetch_sample(query).await;
        match &result {
            Ok(_) => readable += 1,
            Err(e) => error!("verification query '{}' failed: {}", query.label, e),
        }
        println!("{}", render_sample(query, &result));
    }
    readable
}

//! The fixed repair run: probe, fix each target table, then print samples.

use db::{Connector, SampleQuery};
use tracing::{error, info, instrument};

use crate::driver::{DriverConfig, RepairDriver};
use crate::models::{RunSummary, TableTarget};
use crate::verifier::verify;
use crate::RepairError;

/// Categories whose products carry Khmer names.
const KHMER_CATEGORY_FILTER: &str = "category_id IN (2,4,6,8,10)";

/// Tables and columns known to hold corrupted text.
pub fn default_targets() -> Vec<TableTarget> {
    vec![
        TableTarget::new("Categories", &["name", "description"]),
        TableTarget::new("Products", &["name", "description"]),
    ]
}

pub fn default_samples() -> Vec<SampleQuery> {
    vec![
        SampleQuery::new("Categories", "Categories", &["name"]),
        SampleQuery::new("Khmer Products", "Products", &["name"])
            .with_filter(KHMER_CATEGORY_FILTER)
            .with_limit(10),
    ]
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub dry_run: bool,
    /// Print the verification samples after repairing.
    pub verify: bool,
    pub targets: Vec<TableTarget>,
    pub samples: Vec<SampleQuery>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            verify: true,
            targets: default_targets(),
            samples: default_samples(),
        }
    }
}

/// Execute a whole run against `connector`.
///
/// # Errors
/// Only [`RepairError::Connectivity`], when the startup probe fails. Every
/// later failure is logged and skipped.
#[instrument(skip_all, fields(dry_run = options.dry_run))]
pub async fn run(connector: &dyn Connector, options: &RunOptions) -> Result<RunSummary, RepairError> {
    info!("=== Khmer Mojibake Fix ===");
    info!("Connecting to MySQL...");

    let server_version = match connector.server_version().await {
        Ok(v) => v,
        Err(e) => {
            error!("Connection failed: {e}");
            return Err(RepairError::Connectivity(e));
        }
    };
    info!("Connected. MySQL {server_version}");

    let driver = RepairDriver::new(connector, DriverConfig { dry_run: options.dry_run });

    let mut tables = Vec::with_capacity(options.targets.len());
    for target in &options.targets {
        tables.push(driver.fix_table(target).await);
    }

    if options.verify {
        verify(connector, &options.samples).await;
    }

    Ok(RunSummary {
        server_version,
        dry_run: options.dry_run,
        tables,
    })
}

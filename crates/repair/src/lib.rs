//! `repair` crate: mojibake correction, the row repair driver, and the
//! post-repair verifier.

pub mod corrector;
pub mod models;
pub mod error;
pub mod driver;
pub mod verifier;
pub mod plan;

pub use corrector::{is_ascii, reverse_mojibake, classify, Verdict};
pub use models::{TableTarget, RepairRecord, Outcome, TableReport, RunSummary};
pub use error::RepairError;
pub use driver::{RepairDriver, DriverConfig};
pub use plan::{run, RunOptions};

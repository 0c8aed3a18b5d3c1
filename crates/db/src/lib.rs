//! `db` crate: pure persistence layer.
//!
//! Provides the MySQL connection pool, the [`Connector`] seam the repair
//! logic talks through, and a few helpers for mysql-client style text.
//! No repair logic lives here.

pub mod error;
pub mod pool;
pub mod models;
pub mod connector;
pub mod mysql;
pub mod tabular;
pub mod mock;

pub use pool::{DbConfig, DbPool};
pub use error::DbError;
pub use connector::Connector;
pub use models::{SampleQuery, SourceRow};
pub use mysql::{MySqlConnector, quote_ident};

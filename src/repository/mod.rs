//! Repository layer for database persistence.
//!
//! All database access uses Diesel ORM with compile-time query checking
//! against SQLite.

mod audit_log;
mod context;
mod models;
mod order;
mod pool;
pub mod util;

pub use audit_log::{AuditEntry, AuditLogRepository};
pub use context::DbContext;
pub use order::OrderRepository;
pub use pool::{AsyncSqliteConnection, AsyncSqlitePool, DieselError};

use chrono::{DateTime, Utc};

/// Parse a datetime string from the database, defaulting to Unix epoch on error.
pub fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::UNIX_EPOCH)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{AsyncSqlitePool, DbContext};
    use tempfile::{tempdir, TempDir};

    /// A fresh database in a temporary directory with the schema applied.
    pub async fn setup_test_db() -> (AsyncSqlitePool, TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");

        let ctx = DbContext::new(&db_path);
        ctx.init_schema().await.unwrap();

        (ctx.pool().clone(), dir)
    }
}

//! Database context for managing connections and repository access.
//!
//! The DbContext is the primary entry point for all database operations.
//! It holds the connection factory and provides access to all repositories.

use std::path::Path;

use diesel_async::SimpleAsyncConnection;

use super::audit_log::AuditLogRepository;
use super::order::OrderRepository;
use super::pool::{AsyncSqlitePool, DieselError};

/// Database context that manages the connection pool and provides repository access.
///
/// # Example
/// ```ignore
/// let ctx = DbContext::from_url("sqlite:/var/lib/orderscan/orderscan.db");
/// ctx.init_schema().await?;
/// let orders = ctx.orders().get_all().await?;
/// ```
#[derive(Clone, Debug)]
pub struct DbContext {
    pool: AsyncSqlitePool,
}

impl DbContext {
    /// Create a context from a database file path.
    pub fn new(db_path: &Path) -> Self {
        Self {
            pool: AsyncSqlitePool::from_path(db_path),
        }
    }

    /// Create a context from a `sqlite:` URL or plain file path.
    pub fn from_url(url: &str) -> Self {
        Self {
            pool: AsyncSqlitePool::new(url),
        }
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &AsyncSqlitePool {
        &self.pool
    }

    /// Get an order repository.
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.pool.clone())
    }

    /// Get an audit log repository.
    pub fn audit_logs(&self) -> AuditLogRepository {
        AuditLogRepository::new(self.pool.clone())
    }

    /// Initialize database schema.
    ///
    /// This creates the necessary tables if they don't exist.
    pub async fn init_schema(&self) -> Result<(), DieselError> {
        let mut conn = self.pool.get().await?;
        conn.batch_execute(include_str!("schema_sqlite.sql")).await
    }
}

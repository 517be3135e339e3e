//! Audit log repository for SQLite.

use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::models::{AuditLogRecord, LastInsertRowId, NewAuditLog};
use super::parse_datetime;
use super::pool::{AsyncSqliteConnection, AsyncSqlitePool, DieselError};
use crate::models::AuditLog;
use crate::schema::audit_logs;

impl From<AuditLogRecord> for AuditLog {
    fn from(record: AuditLogRecord) -> Self {
        AuditLog {
            id: record.id,
            user_id: record.user_id,
            action: record.action,
            timestamp: parse_datetime(&record.timestamp),
        }
    }
}

/// An audit entry to write alongside the change it describes.
#[derive(Debug, Clone, Copy)]
pub struct AuditEntry<'a> {
    pub user_id: &'a str,
    pub action: &'a str,
}

impl<'a> AuditEntry<'a> {
    pub fn new(user_id: &'a str, action: &'a str) -> Self {
        Self { user_id, action }
    }
}

/// Insert an audit entry on an existing connection, e.g. inside a transaction.
pub(crate) async fn insert_entry(
    conn: &mut AsyncSqliteConnection,
    entry: AuditEntry<'_>,
) -> Result<AuditLog, DieselError> {
    let now = Utc::now();
    let timestamp = now.to_rfc3339();

    diesel::insert_into(audit_logs::table)
        .values(NewAuditLog {
            user_id: entry.user_id,
            action: entry.action,
            timestamp: &timestamp,
        })
        .execute(conn)
        .await?;

    let result: LastInsertRowId = diesel::sql_query("SELECT last_insert_rowid()")
        .get_result(conn)
        .await?;

    Ok(AuditLog {
        id: result.id as i32,
        user_id: entry.user_id.to_string(),
        action: entry.action.to_string(),
        timestamp: now,
    })
}

/// Append-only audit log repository.
#[derive(Clone)]
pub struct AuditLogRepository {
    pool: AsyncSqlitePool,
}

impl AuditLogRepository {
    pub fn new(pool: AsyncSqlitePool) -> Self {
        Self { pool }
    }

    /// Append an entry stamped with the current time.
    pub async fn record(&self, user_id: &str, action: &str) -> Result<AuditLog, DieselError> {
        let mut conn = self.pool.get().await?;
        insert_entry(&mut conn, AuditEntry::new(user_id, action)).await
    }

    /// All entries, oldest first.
    pub async fn get_all(&self) -> Result<Vec<AuditLog>, DieselError> {
        let mut conn = self.pool.get().await?;

        audit_logs::table
            .order(audit_logs::id.asc())
            .select(AuditLogRecord::as_select())
            .load::<AuditLogRecord>(&mut conn)
            .await
            .map(|records| records.into_iter().map(AuditLog::from).collect())
    }
}

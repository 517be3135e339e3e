//! Diesel ORM models for database tables.

use diesel::prelude::*;

use crate::schema;

/// Order record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OrderRecord {
    pub id: i32,
    pub patient_first_name: String,
    pub patient_last_name: String,
    pub patient_dob: String,
}

/// Order fields for insert and update.
#[derive(Insertable, AsChangeset, Debug, Clone, Copy)]
#[diesel(table_name = schema::orders)]
pub struct OrderFields<'a> {
    pub patient_first_name: &'a str,
    pub patient_last_name: &'a str,
    pub patient_dob: &'a str,
}

/// Audit log record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::audit_logs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AuditLogRecord {
    pub id: i32,
    pub user_id: String,
    pub action: String,
    pub timestamp: String,
}

/// New audit log entry for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::audit_logs)]
pub struct NewAuditLog<'a> {
    pub user_id: &'a str,
    pub action: &'a str,
    pub timestamp: &'a str,
}

/// Row id of the most recent insert on a connection.
#[derive(QueryableByName)]
pub(crate) struct LastInsertRowId {
    #[diesel(sql_type = diesel::sql_types::BigInt, column_name = "last_insert_rowid()")]
    pub id: i64,
}

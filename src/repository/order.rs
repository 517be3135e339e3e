//! Order repository for SQLite.
//!
//! Uses diesel-async's SyncConnectionWrapper to provide an async interface
//! while maintaining Diesel's compile-time query checking.

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};

use super::audit_log::{insert_entry, AuditEntry};
use super::models::{LastInsertRowId, OrderFields, OrderRecord};
use super::pool::{AsyncSqlitePool, DieselError};
use super::util::to_diesel_error;
use crate::models::{NewOrder, Order};
use crate::schema::orders;

/// Storage format for dates of birth.
const DOB_FORMAT: &str = "%Y-%m-%d";

/// Convert a database record to a domain model.
impl TryFrom<OrderRecord> for Order {
    type Error = DieselError;

    fn try_from(record: OrderRecord) -> Result<Self, Self::Error> {
        let patient_dob = NaiveDate::parse_from_str(&record.patient_dob, DOB_FORMAT)
            .map_err(|e| {
                to_diesel_error(format!(
                    "order {} has malformed patient_dob {:?}: {}",
                    record.id, record.patient_dob, e
                ))
            })?;
        Ok(Order {
            id: record.id,
            patient_first_name: record.patient_first_name,
            patient_last_name: record.patient_last_name,
            patient_dob,
        })
    }
}

fn order_fields<'a>(order: &'a NewOrder, dob: &'a str) -> OrderFields<'a> {
    OrderFields {
        patient_first_name: &order.patient_first_name,
        patient_last_name: &order.patient_last_name,
        patient_dob: dob,
    }
}

/// Order repository with compile-time query checking.
#[derive(Clone)]
pub struct OrderRepository {
    pool: AsyncSqlitePool,
}

impl OrderRepository {
    /// Create a new order repository with an existing pool.
    pub fn new(pool: AsyncSqlitePool) -> Self {
        Self { pool }
    }

    /// Get an order by ID.
    pub async fn get(&self, id: i32) -> Result<Option<Order>, DieselError> {
        let mut conn = self.pool.get().await?;

        orders::table
            .find(id)
            .select(OrderRecord::as_select())
            .first::<OrderRecord>(&mut conn)
            .await
            .optional()?
            .map(Order::try_from)
            .transpose()
    }

    /// Get all orders in insertion order.
    pub async fn get_all(&self) -> Result<Vec<Order>, DieselError> {
        let mut conn = self.pool.get().await?;

        orders::table
            .order(orders::id.asc())
            .select(OrderRecord::as_select())
            .load::<OrderRecord>(&mut conn)
            .await?
            .into_iter()
            .map(Order::try_from)
            .collect()
    }

    /// Insert an order and its audit entry in one transaction, returning
    /// the order with its assigned ID.
    pub async fn create(
        &self,
        order: &NewOrder,
        audit: AuditEntry<'_>,
    ) -> Result<Order, DieselError> {
        let mut conn = self.pool.get().await?;
        let dob = order.patient_dob.format(DOB_FORMAT).to_string();
        let fields = order_fields(order, &dob);

        conn.transaction(|conn| {
            Box::pin(async move {
                diesel::insert_into(orders::table)
                    .values(fields)
                    .execute(conn)
                    .await?;

                let result: LastInsertRowId = diesel::sql_query("SELECT last_insert_rowid()")
                    .get_result(conn)
                    .await?;

                insert_entry(conn, audit).await?;

                Ok(Order {
                    id: result.id as i32,
                    patient_first_name: order.patient_first_name.clone(),
                    patient_last_name: order.patient_last_name.clone(),
                    patient_dob: order.patient_dob,
                })
            })
        })
        .await
    }

    /// Replace every field of an existing order and record the audit entry
    /// in the same transaction.
    ///
    /// Returns `None`, writing nothing, when no order has this ID.
    pub async fn update(
        &self,
        id: i32,
        order: &NewOrder,
        audit: AuditEntry<'_>,
    ) -> Result<Option<Order>, DieselError> {
        let mut conn = self.pool.get().await?;
        let dob = order.patient_dob.format(DOB_FORMAT).to_string();
        let fields = order_fields(order, &dob);

        conn.transaction(|conn| {
            Box::pin(async move {
                let rows = diesel::update(orders::table.find(id))
                    .set(fields)
                    .execute(conn)
                    .await?;

                if rows == 0 {
                    return Ok(None);
                }
                insert_entry(conn, audit).await?;

                Ok(Some(Order {
                    id,
                    patient_first_name: order.patient_first_name.clone(),
                    patient_last_name: order.patient_last_name.clone(),
                    patient_dob: order.patient_dob,
                }))
            })
        })
        .await
    }

    /// Delete an order and record the audit entry in the same transaction.
    ///
    /// Returns whether a row was removed; nothing is audited otherwise.
    pub async fn delete(&self, id: i32, audit: AuditEntry<'_>) -> Result<bool, DieselError> {
        let mut conn = self.pool.get().await?;

        conn.transaction(|conn| {
            Box::pin(async move {
                let rows = diesel::delete(orders::table.find(id))
                    .execute(conn)
                    .await?;

                if rows == 0 {
                    return Ok(false);
                }
                insert_entry(conn, audit).await?;
                Ok(true)
            })
        })
        .await
    }

    /// Count stored orders.
    pub async fn count(&self) -> Result<u64, DieselError> {
        let mut conn = self.pool.get().await?;

        let count: i64 = orders::table.count().get_result(&mut conn).await?;
        Ok(count as u64)
    }
}

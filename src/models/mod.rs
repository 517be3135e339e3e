//! Data models for orderscan.

mod audit_log;
mod order;

pub use audit_log::{AuditAction, AuditLog, ANONYMOUS_USER};
pub use order::{NewOrder, Order};

//! Audit trail of actions taken against orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User recorded for every action; the API has no authentication.
pub const ANONYMOUS_USER: &str = "anonymous_user";

/// One audit entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: i32,
    pub user_id: String,
    pub action: String,
    pub timestamp: DateTime<Utc>,
}

/// Actions that are written to the audit log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditAction {
    ReadAll,
    Created { patient: String },
    Read { id: i32 },
    Updated { id: i32 },
    Deleted { id: i32 },
    Uploaded { patient: String },
}

impl AuditAction {
    /// Human-readable description stored in the `action` column.
    pub fn describe(&self) -> String {
        match self {
            Self::ReadAll => "Read all orders".to_string(),
            Self::Created { patient } => format!("Created order for patient: {}", patient),
            Self::Read { id } => format!("Read order with ID: {}", id),
            Self::Updated { id } => format!("Updated order with ID: {}", id),
            Self::Deleted { id } => format!("Deleted order with ID: {}", id),
            Self::Uploaded { patient } => {
                format!("Uploaded and created order from PDF for patient: {}", patient)
            }
        }
    }
}

//! Patient orders.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::extraction::IdentityRecord;

/// A stored order for one patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: i32,
    pub patient_first_name: String,
    pub patient_last_name: String,
    pub patient_dob: NaiveDate,
}

/// Order fields as submitted for create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub patient_first_name: String,
    pub patient_last_name: String,
    pub patient_dob: NaiveDate,
}

impl NewOrder {
    pub fn new(first_name: &str, last_name: &str, dob: NaiveDate) -> Self {
        Self {
            patient_first_name: first_name.to_string(),
            patient_last_name: last_name.to_string(),
            patient_dob: dob,
        }
    }

    /// "First Last" as used in audit messages.
    pub fn patient_name(&self) -> String {
        format!("{} {}", self.patient_first_name, self.patient_last_name)
    }
}

impl From<IdentityRecord> for NewOrder {
    fn from(record: IdentityRecord) -> Self {
        Self {
            patient_first_name: record.first_name,
            patient_last_name: record.last_name,
            patient_dob: record.date_of_birth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_json_shape() {
        let order = Order {
            id: 7,
            patient_first_name: "Jane".to_string(),
            patient_last_name: "Doe".to_string(),
            patient_dob: NaiveDate::from_ymd_opt(1985, 7, 4).unwrap(),
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "patient_first_name": "Jane",
                "patient_last_name": "Doe",
                "patient_dob": "1985-07-04"
            })
        );
    }

    #[test]
    fn test_new_order_rejects_bad_dob() {
        let result: Result<NewOrder, _> = serde_json::from_str(
            r#"{"patient_first_name":"Jane","patient_last_name":"Doe","patient_dob":"1985-13-01"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_from_identity_record() {
        let order = NewOrder::from(IdentityRecord {
            first_name: "Mary".to_string(),
            last_name: "Jones".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        });
        assert_eq!(order.patient_name(), "Mary Jones");
    }
}

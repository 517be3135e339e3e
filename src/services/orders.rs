//! Order management with audit logging.
//!
//! Every successful read or mutation of orders is appended to the audit log
//! under the anonymous user. Failed lookups are not audited.

use std::sync::Arc;

use thiserror::Error;

use crate::extraction::{ExtractionError, ExtractionFailure, ExtractionOutcome, PatientExtractor};
use crate::models::{AuditAction, AuditLog, NewOrder, Order, ANONYMOUS_USER};
use crate::repository::{
    AuditEntry, AuditLogRepository, DbContext, DieselError, OrderRepository,
};

/// Errors from order operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Order not found")]
    NotFound(i32),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("{}", .0.reason)]
    Unresolved(ExtractionFailure),

    #[error("Database error: {0}")]
    Database(#[from] DieselError),
}

/// Service for order CRUD, audit logging and document intake.
#[derive(Clone)]
pub struct OrderService {
    orders: OrderRepository,
    audit: AuditLogRepository,
    extractor: Arc<PatientExtractor>,
}

/// Audit entry for the anonymous user.
fn anonymous(description: &str) -> AuditEntry<'_> {
    AuditEntry::new(ANONYMOUS_USER, description)
}

impl OrderService {
    pub fn new(ctx: &DbContext, extractor: Arc<PatientExtractor>) -> Self {
        Self {
            orders: ctx.orders(),
            audit: ctx.audit_logs(),
            extractor,
        }
    }

    /// Audit a read. Writes carry their entry into the repository transaction.
    async fn audit(&self, action: AuditAction) -> Result<(), ServiceError> {
        let description = action.describe();
        tracing::debug!("Audit: {}", description);
        self.audit.record(ANONYMOUS_USER, &description).await?;
        Ok(())
    }

    /// List all orders.
    pub async fn list(&self) -> Result<Vec<Order>, ServiceError> {
        let orders = self.orders.get_all().await?;
        self.audit(AuditAction::ReadAll).await?;
        Ok(orders)
    }

    /// Create an order from submitted fields.
    pub async fn create(&self, order: NewOrder) -> Result<Order, ServiceError> {
        let description = AuditAction::Created {
            patient: order.patient_name(),
        }
        .describe();
        let created = self.orders.create(&order, anonymous(&description)).await?;
        tracing::debug!("Audit: {}", description);
        Ok(created)
    }

    /// Fetch a single order.
    pub async fn get(&self, id: i32) -> Result<Order, ServiceError> {
        let order = self
            .orders
            .get(id)
            .await?
            .ok_or(ServiceError::NotFound(id))?;
        self.audit(AuditAction::Read { id }).await?;
        Ok(order)
    }

    /// Replace the fields of an existing order.
    pub async fn update(&self, id: i32, order: NewOrder) -> Result<Order, ServiceError> {
        let description = AuditAction::Updated { id }.describe();
        let updated = self
            .orders
            .update(id, &order, anonymous(&description))
            .await?
            .ok_or(ServiceError::NotFound(id))?;
        tracing::debug!("Audit: {}", description);
        Ok(updated)
    }

    /// Delete an order.
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let description = AuditAction::Deleted { id }.describe();
        if !self.orders.delete(id, anonymous(&description)).await? {
            return Err(ServiceError::NotFound(id));
        }
        tracing::debug!("Audit: {}", description);
        Ok(())
    }

    /// Audit entries, oldest first. Reading the log is not itself audited.
    pub async fn logs(&self) -> Result<Vec<AuditLog>, ServiceError> {
        Ok(self.audit.get_all().await?)
    }

    /// Run the extraction pipeline on a blocking thread.
    pub async fn extract(&self, bytes: Vec<u8>) -> Result<ExtractionOutcome, ServiceError> {
        let extractor = Arc::clone(&self.extractor);
        let outcome = tokio::task::spawn_blocking(move || extractor.extract(&bytes))
            .await
            .map_err(|e| {
                ExtractionError::ExtractionFailed(format!("extraction task failed: {}", e))
            })??;
        Ok(outcome)
    }

    /// Extract patient identity from a document and store it as a new order.
    ///
    /// Nothing is written when extraction fails or is unresolved.
    pub async fn create_from_document(&self, bytes: Vec<u8>) -> Result<Order, ServiceError> {
        let record = self
            .extract(bytes)
            .await?
            .into_result()
            .map_err(ServiceError::Unresolved)?;

        let order = NewOrder::from(record);
        let description = AuditAction::Uploaded {
            patient: order.patient_name(),
        }
        .describe();
        let created = self.orders.create(&order, anonymous(&description)).await?;
        tracing::debug!("Audit: {}", description);
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::testing::{FakeDocument, FakeLoader, FakeOcr};
    use crate::extraction::NullSink;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    async fn service_with(document: FakeDocument) -> (OrderService, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let ctx = DbContext::new(&dir.path().join("orderscan.db"));
        ctx.init_schema().await.unwrap();

        let extractor = PatientExtractor::new(
            Box::new(FakeLoader::new(document)),
            Box::new(FakeOcr::new()),
        )
        .with_sink(Arc::new(NullSink));
        (OrderService::new(&ctx, Arc::new(extractor)), dir)
    }

    fn jane() -> NewOrder {
        NewOrder::new("Jane", "Doe", NaiveDate::from_ymd_opt(1985, 7, 4).unwrap())
    }

    fn actions(logs: &[AuditLog]) -> Vec<&str> {
        logs.iter().map(|l| l.action.as_str()).collect()
    }

    #[tokio::test]
    async fn test_each_operation_writes_one_audit_entry() {
        let (service, _dir) = service_with(FakeDocument::default()).await;

        let order = service.create(jane()).await.unwrap();
        service.list().await.unwrap();
        service.get(order.id).await.unwrap();
        service
            .update(
                order.id,
                NewOrder::new("Jane", "Roe", NaiveDate::from_ymd_opt(1985, 7, 4).unwrap()),
            )
            .await
            .unwrap();
        service.delete(order.id).await.unwrap();

        let logs = service.logs().await.unwrap();
        assert_eq!(
            actions(&logs),
            vec![
                "Created order for patient: Jane Doe".to_string(),
                "Read all orders".to_string(),
                format!("Read order with ID: {}", order.id),
                format!("Updated order with ID: {}", order.id),
                format!("Deleted order with ID: {}", order.id),
            ]
        );
        assert!(logs.iter().all(|l| l.user_id == ANONYMOUS_USER));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_creates_are_all_stored_and_audited() {
        let (service, _dir) = service_with(FakeDocument::default()).await;

        let handles: Vec<_> = (0..64)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.create(jane()).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(service.list().await.unwrap().len(), 64);
        let logs = service.logs().await.unwrap();
        let created = logs
            .iter()
            .filter(|l| l.action == "Created order for patient: Jane Doe")
            .count();
        assert_eq!(created, 64);
    }

    #[tokio::test]
    async fn test_missing_order_is_not_audited() {
        let (service, _dir) = service_with(FakeDocument::default()).await;

        assert!(matches!(service.get(9).await, Err(ServiceError::NotFound(9))));
        assert!(matches!(
            service.update(9, jane()).await,
            Err(ServiceError::NotFound(9))
        ));
        assert!(matches!(service.delete(9).await, Err(ServiceError::NotFound(9))));
        assert!(service.logs().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_from_document() {
        let doc = FakeDocument::embedded(&["Patient: Mary Jones\nDOB: 01/02/1990"]);
        let (service, _dir) = service_with(doc).await;

        let order = service
            .create_from_document(b"%PDF-1.7".to_vec())
            .await
            .unwrap();
        assert_eq!(order.patient_first_name, "Mary");
        assert_eq!(order.patient_dob, NaiveDate::from_ymd_opt(1990, 1, 2).unwrap());

        let logs = service.logs().await.unwrap();
        assert_eq!(
            actions(&logs),
            vec!["Uploaded and created order from PDF for patient: Mary Jones"]
        );
    }

    #[tokio::test]
    async fn test_unresolved_document_creates_nothing() {
        let doc = FakeDocument::embedded(&["Patient: Mary Jones"]);
        let (service, _dir) = service_with(doc).await;

        let err = service
            .create_from_document(b"%PDF-1.7".to_vec())
            .await
            .unwrap_err();
        match err {
            ServiceError::Unresolved(failure) => {
                assert_eq!(failure.candidate_lines, vec!["Patient: Mary Jones"]);
                assert_eq!(failure.first_name.as_deref(), Some("Mary"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(service.logs().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_document_is_extraction_error() {
        let (service, _dir) = service_with(FakeDocument::default()).await;

        let err = service
            .create_from_document(b"not a pdf".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Extraction(ExtractionError::InvalidDocument(_))
        ));
    }
}

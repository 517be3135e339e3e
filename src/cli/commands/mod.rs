//! Command implementations.

pub mod check;
pub mod extract;
pub mod init;
pub mod logs;
pub mod orders;
pub mod serve;

use std::sync::Arc;

use crate::config::Settings;
use crate::extraction::PatientExtractor;
use crate::services::OrderService;

/// Order service over the configured database, failing if it was never initialized.
pub(crate) fn open_service(settings: &Settings) -> anyhow::Result<OrderService> {
    if !settings.database_exists() {
        anyhow::bail!(
            "No database at {}. Run 'orderscan init' first.",
            settings.database_path().display()
        );
    }
    let ctx = settings.create_db_context();
    let extractor = Arc::new(PatientExtractor::from_settings(settings));
    Ok(OrderService::new(&ctx, extractor))
}

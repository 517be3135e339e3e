//! HTTP API for orders, audit logs and PDF intake.

mod handlers;
mod routes;

pub use routes::create_router;

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::Settings;
use crate::extraction::PatientExtractor;
use crate::services::OrderService;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<OrderService>,
    /// Maximum request body size in bytes.
    pub upload_limit: usize,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        let ctx = settings.create_db_context();
        let extractor = Arc::new(PatientExtractor::from_settings(settings));

        Self {
            orders: Arc::new(OrderService::new(&ctx, extractor)),
            upload_limit: settings.upload_limit,
        }
    }

    /// State around an existing service, e.g. one wired with fakes.
    pub fn with_service(orders: OrderService, upload_limit: usize) -> Self {
        Self {
            orders: Arc::new(orders),
            upload_limit,
        }
    }
}

/// Bind a listener, resolving `host` when it is a name rather than an IP.
pub async fn bind_listener(host: &str, port: u16) -> std::io::Result<TcpListener> {
    TcpListener::bind((host, port)).await
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings);
    let app = create_router(state);

    let listener = bind_listener(host, port).await?;
    tracing::info!("Starting server at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

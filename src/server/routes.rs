//! Router configuration for the web server.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let upload_limit = state.upload_limit;

    Router::new()
        // Orders
        .route(
            "/orders",
            get(handlers::list_orders).post(handlers::create_order),
        )
        .route(
            "/orders/",
            get(handlers::list_orders).post(handlers::create_order),
        )
        .route(
            "/orders/:id",
            get(handlers::get_order)
                .put(handlers::update_order)
                .delete(handlers::delete_order),
        )
        // PDF intake
        .route("/orders/upload_pdf", post(handlers::upload_pdf))
        // Audit log
        .route("/logs", get(handlers::list_logs))
        .route("/logs/", get(handlers::list_logs))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(upload_limit))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

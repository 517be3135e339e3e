//! Order CRUD endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::super::AppState;
use crate::models::NewOrder;

/// List all orders.
pub async fn list_orders(State(state): State<AppState>) -> Response {
    match state.orders.list().await {
        Ok(orders) => Json(orders).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create an order.
pub async fn create_order(
    State(state): State<AppState>,
    Json(order): Json<NewOrder>,
) -> Response {
    match state.orders.create(order).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Fetch one order.
pub async fn get_order(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    match state.orders.get(id).await {
        Ok(order) => Json(order).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Replace an order's fields.
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(order): Json<NewOrder>,
) -> Response {
    match state.orders.update(id, order).await {
        Ok(updated) => Json(updated).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete an order.
pub async fn delete_order(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    match state.orders.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

use crate::api::controllers::checkout_controller::{checkout_service, error_response};
use crate::api::response::OrderResponse;
use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Get a persisted order with its items (support/reconciliation use)
pub async fn get_order_by_id(Path(order_id): Path<i32>) -> impl IntoResponse {
    let service = checkout_service();

    match service.get_order(order_id).await {
        Ok(Some(order_with_items)) => {
            (StatusCode::OK, Json(OrderResponse::from(order_with_items))).into_response()
        }
        Ok(None) => (StatusCode::NOT_FOUND, "Order not found").into_response(),
        Err(err) => error_response(err),
    }
}

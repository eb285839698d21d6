use crate::api::controllers::order_controller;
use axum::Router;
use axum::routing::get;

pub fn routes() -> Router {
    Router::new().route("/{id}", get(order_controller::get_order_by_id))
}

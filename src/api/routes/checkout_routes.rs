use crate::api::controllers::checkout_controller;
use axum::Router;
use axum::routing::post;

pub fn routes() -> Router {
    Router::new()
        .route("/validate", post(checkout_controller::validate_cart))
        .route("/intent", post(checkout_controller::create_intent))
        .route("/finalize", post(checkout_controller::finalize_order))
}

use crate::api::config::Config;
use crate::api::routes::{checkout_routes, order_routes};
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

pub async fn start() {
    let config = Config::new();

    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .route("/api", get(|| async { "Atelier Server API is running!" }))
        .nest("/api/v1/checkout", checkout_routes::routes())
        .nest("/api/v1/orders", order_routes::routes())
        .layer(cors_layer)
        .with_state::<()>(());

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server running on http://{}", config.bind_addr);

    axum::serve(listener, router)
        .await
        .expect("Failed to start the server");
}

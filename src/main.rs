use atelier_server_lib::api::server;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("atelier_server=info,tower_http=info")
                }),
        )
        .init();

    server::start().await;
}

use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use ticket_storefront::api::HttpTicketingApi;
use ticket_storefront::config::Config;
use ticket_storefront::routes::create_routes;
use ticket_storefront::state::AppState;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().expect("Invalid configuration");

    let api = HttpTicketingApi::new(config.api_url.clone(), config.api_timeout)
        .expect("Failed to build ticketing API client");
    tracing::info!(api_url = %config.api_url, "Using ticketing API");

    let app = create_routes(AppState::new(Arc::new(api)), &config);

    tracing::info!("🚀 Storefront running at http://{}", config.addr);

    let listener = TcpListener::bind(config.addr)
        .await
        .expect("Failed to bind address");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server failed");
}

use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use news_gateway::config::{Args, Config};
use news_gateway::handlers;
use news_gateway::state::AppState;

// this is main async function with tokio
#[tokio::main]
async fn main() {
    // .env is a local convenience; absent in deployed environments
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // parse cli arguments, then merge with the environment
    let args = Args::parse();
    let config = Config::load(&args);

    if config.api_key.is_none() {
        warn!("NEWS_API_KEY is not set; /news will return configuration errors");
    }

    let state = Arc::new(AppState::new(&config).expect("failed to build http client"));
    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.expect("bind");

    info!(port = config.port, "gateway running");
    info!(base_url = %config.base_url, "forwarding to news api");
    info!(
        limit = config.rate_limit,
        window_secs = config.rate_window.as_secs(),
        "rate limit"
    );

    // connect-info keeps the peer address available for rate-limit keys
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("server error");
}

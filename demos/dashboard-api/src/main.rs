mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use farmprofit::{AsyncFarmProfit, LatestSlot};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_target(false)
        .init();

    let client = AsyncFarmProfit::builder()
        .timeout(config.upstream_timeout)
        .build();

    let state = Arc::new(AppState {
        client,
        board: LatestSlot::new(),
    });

    let app = Router::new()
        .route("/api/market-price", post(routes::market_price::market_price))
        .route("/api/crops", get(routes::crops::list_crops))
        .route("/api/crops/{slug}/sample", get(routes::crops::crop_sample))
        .route("/api/board", post(routes::board::select_date))
        .route("/api/board/regions", get(routes::board::regions))
        .route("/api/board/stats", get(routes::board::stats))
        .route("/api/board/distribution", get(routes::board::distribution))
        .route("/api/board/preview", get(routes::board::preview))
        .route("/api/board/recommend", get(routes::board::recommend))
        .route("/api/board/best", get(routes::board::best))
        .layer(CorsLayer::permissive())
        .with_state(state);

    info!(addr = %config.addr, "listening");
    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}

use std::sync::Arc;

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use cineapi::config::Config;
use cineapi::{AppState, router, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,cineapi=debug".to_string()),
        )
        .init();

    let config = Config::from_env()?;
    let addr = config.addr;
    let seed_demo_data = config.seed_demo_data;

    let state = Arc::new(AppState::new(config));

    if seed_demo_data {
        seed::demo_data(&state.store).await;
        tracing::info!("seeded demo fixtures");
    }

    let app = router(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use cogitara::api;
use cogitara::config::Config;
use cogitara::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    let bind_addr = config.bind_addr.clone();
    tracing::info!(
        "Guard: {} attempts per {} min, {} min block",
        config.guard.max_attempts,
        config.guard.attempt_window.num_minutes(),
        config.guard.block_duration.num_minutes()
    );

    let state = Arc::new(AppState::from_config(config));
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Cogitara server listening on {}", bind_addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

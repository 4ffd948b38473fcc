use contact_dashboard::{AppState, Config, FileCountSource, router};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    info!(
        "serving {} from {} (anchor {}, {:?})",
        config.display_year,
        config.data_path.display(),
        config.anchor_date,
        config.query_style
    );

    let source = Arc::new(FileCountSource::new(config.data_path.clone()));
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState::new(config, source);
    state.aggregator.load_week(1).await;

    let app = router(state);

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
    }
    info!("shutting down");
}

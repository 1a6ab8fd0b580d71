use axum::{routing::get, Router};
use dubbing_configuration::ServerConfig;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::{error_mapper, HttpError};
pub use handlers::*;
pub use state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(submit_dub))
        .route("/play_audio", get(play_audio))
        .route("/health", get(health_check))
        .with_state(state)
}

/// Binds the configured address and serves until ctrl-c.
pub async fn create_app_routes(state: AppState, config: &ServerConfig) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(addr = %listener.local_addr()?, "dubbing service listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

//! HTTP front-end for the weather record service.
//!
//! This crate focuses on:
//! - Routing and JSON (de)serialization
//! - Mapping service errors onto HTTP status codes
//! - CORS and request tracing

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

pub mod error;
pub mod routes;

pub use error::ApiError;
pub use routes::{AppState, router};

/// Serve `app` on `bind` until Ctrl-C.
pub async fn serve(app: Router, bind: &str) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;

    info!("weather-server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for Ctrl-C; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

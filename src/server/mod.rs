//! HTTP server for docqa-rs
//!
//! Thin JSON plumbing around [`DocumentAssistant`]; all behaviour lives in the api layer.

pub mod handlers;
pub mod router;

pub use router::build_router;

use crate::api::DocumentAssistant;
use crate::config::Config;
use crate::error::Result;
use std::sync::Arc;

/// Bind the configured address and serve until Ctrl-C
pub async fn serve(config: &Config) -> Result<()> {
    let assistant = Arc::new(DocumentAssistant::new(config)?);
    let app = build_router(Arc::clone(&assistant), config.server.max_upload_bytes);

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    log::info!(
        "Listening on http://{} (generation {})",
        address,
        if assistant.health().generator_initialized { "enabled" } else { "disabled" }
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

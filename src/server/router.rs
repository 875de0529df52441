//! HTTP router construction.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use tower_http::cors::CorsLayer;

use crate::api::DocumentAssistant;
use crate::server::handlers;

/// Build the complete application router with all routes and middleware.
pub fn build_router(assistant: Arc<DocumentAssistant>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/upload", post(handlers::upload))
        .route("/documents", get(handlers::list_documents))
        .route("/documents/{doc_id}", delete(handlers::delete_document))
        .route("/documents/{doc_id}/chunks", get(handlers::document_chunks))
        .route("/ask", post(handlers::ask))
        .route("/topic-explanation", post(handlers::topic_explanation))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(assistant)
}

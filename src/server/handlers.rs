//! HTTP handlers
//!
//! Every failure is answered with `{ "success": false, "error": "..." }`.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::{DocumentAssistant, HealthStatus};
use crate::error::DocQaError;
use crate::storage::DocumentSummary;

pub type SharedAssistant = Arc<DocumentAssistant>;

// ── Errors ───────────────────────────────────────

/// Failure response with status code and human-readable message
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

/// HTTP status for each error kind
pub fn status_for(err: &DocQaError) -> StatusCode {
    match err {
        DocQaError::Validation(_) => StatusCode::BAD_REQUEST,
        DocQaError::DocumentNotFound(_) => StatusCode::NOT_FOUND,
        DocQaError::Conflict(_) => StatusCode::CONFLICT,
        DocQaError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DocQaError::NotInitialized(_) => StatusCode::SERVICE_UNAVAILABLE,
        DocQaError::Generation(_) => StatusCode::BAD_GATEWAY,
        DocQaError::Config(_) | DocQaError::Io(_) | DocQaError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DocQaError> for ApiError {
    fn from(err: DocQaError) -> Self {
        let status = status_for(&err);
        if status.is_server_error() {
            log::error!("Request failed: {}", err);
        } else {
            log::warn!("Request rejected: {}", err);
        }
        Self::new(status, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<axum::extract::multipart::MultipartError> for ApiError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        Self::new(err.status(), format!("Multipart error: {}", err.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "success": false, "error": self.message }));
        (self.status, body).into_response()
    }
}

// ── Request/Response types ───────────────────────

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: Option<String>,
    pub doc_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TopicRequest {
    pub topic: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub doc_id: String,
    pub filename: String,
    pub chunks: usize,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentSummary>,
}

#[derive(Debug, Serialize)]
pub struct ChunksResponse {
    pub success: bool,
    pub doc_id: String,
    pub chunk_count: usize,
    pub chunks: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub doc_id: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub success: bool,
    pub question: String,
    pub answer: String,
    pub doc_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TopicResponse {
    pub success: bool,
    pub topic: String,
    pub explanation: String,
}

// ── Handlers ─────────────────────────────────────

pub async fn health(State(assistant): State<SharedAssistant>) -> Json<HealthStatus> {
    Json(assistant.health())
}

/// Accepts a multipart form with the PDF in the `file` field
pub async fn upload(
    State(assistant): State<SharedAssistant>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;

        let report = assistant.upload(&filename, &bytes).await?;
        return Ok(Json(UploadResponse {
            success: true,
            message: report.message(),
            doc_id: report.doc_id,
            filename: report.filename,
            chunks: report.chunk_count,
        }));
    }

    Err(DocQaError::Validation("No file provided".to_string()).into())
}

pub async fn list_documents(State(assistant): State<SharedAssistant>) -> Json<DocumentListResponse> {
    Json(DocumentListResponse {
        documents: assistant.list().await,
    })
}

pub async fn document_chunks(
    State(assistant): State<SharedAssistant>,
    Path(doc_id): Path<String>,
) -> Result<Json<ChunksResponse>, ApiError> {
    let chunks = assistant.chunks(&doc_id).await?;
    Ok(Json(ChunksResponse {
        success: true,
        doc_id,
        chunk_count: chunks.len(),
        chunks,
    }))
}

pub async fn delete_document(
    State(assistant): State<SharedAssistant>,
    Path(doc_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let removed = assistant.delete(&doc_id).await?;
    Ok(Json(DeleteResponse {
        success: true,
        message: format!("Document '{}' deleted", removed.filename),
        doc_id: removed.doc_id,
    }))
}

pub async fn ask(
    State(assistant): State<SharedAssistant>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let Json(request) = payload?;

    let answer = assistant
        .ask(
            request.question.as_deref().unwrap_or_default(),
            request.doc_id.as_deref(),
        )
        .await?;

    Ok(Json(AskResponse {
        success: true,
        question: answer.question,
        answer: answer.answer,
        doc_id: answer.doc_id,
    }))
}

pub async fn topic_explanation(
    State(assistant): State<SharedAssistant>,
    payload: Result<Json<TopicRequest>, JsonRejection>,
) -> Result<Json<TopicResponse>, ApiError> {
    let Json(request) = payload?;

    let explanation = assistant
        .explain(request.topic.as_deref().unwrap_or_default())
        .await?;

    Ok(Json(TopicResponse {
        success: true,
        topic: explanation.topic,
        explanation: explanation.explanation,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&DocQaError::Validation("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&DocQaError::DocumentNotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status_for(&DocQaError::Conflict("x".into())), StatusCode::CONFLICT);
        assert_eq!(status_for(&DocQaError::Extraction("x".into())), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(status_for(&DocQaError::NotInitialized("x".into())), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(status_for(&DocQaError::Generation("x".into())), StatusCode::BAD_GATEWAY);
    }
}

//! API routes for the document intelligence server

pub mod dashboard;
pub mod documents;
pub mod jobs;
pub mod query;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Upload - with larger body limit for multipart payloads
        .route(
            "/upload",
            post(upload::upload_files).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Natural-language query, JSON body or query string
        .route(
            "/query/documents",
            get(query::query_documents_get).post(query::query_documents),
        )
        // Stored documents
        .route("/documents", get(documents::list_documents))
        .route("/documents/:id", get(documents::get_document))
        // Dashboard
        .route("/dashboard", get(dashboard::get_dashboard))
        // Job management
        .route("/jobs", get(jobs::list_jobs))
        .route("/jobs/:id", get(jobs::get_job_progress))
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "legal-intel",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Document intelligence over legal agreements",
        "endpoints": {
            "POST /api/upload": "Upload documents for background classification",
            "POST /api/query/documents": "Ask a natural-language question over the corpus",
            "GET /api/query/documents": "Same query via query string",
            "GET /api/documents": "List classified documents",
            "GET /api/documents/:id": "Get one document with extracted text",
            "GET /api/dashboard": "Frequency tables over the classified corpus",
            "GET /api/jobs": "List all jobs and queue stats",
            "GET /api/jobs/:id": "Get job progress"
        }
    }))
}

//! Stored document endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{Document, DocumentListResponse, DocumentSummary};

/// GET /api/documents - list the classified corpus in insertion order
/// (extracted text omitted)
pub async fn list_documents(
    State(state): State<AppState>,
) -> Result<Json<DocumentListResponse>> {
    let docs = state.store().list_documents()?;
    let documents: Vec<DocumentSummary> = docs.iter().map(DocumentSummary::from).collect();
    let total = documents.len();

    Ok(Json(DocumentListResponse { documents, total }))
}

/// GET /api/documents/:id - one document, extracted text included
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Document>> {
    let doc = state
        .store()
        .get_document(id)?
        .ok_or_else(|| Error::DocumentNotFound(id.to_string()))?;

    Ok(Json(doc))
}

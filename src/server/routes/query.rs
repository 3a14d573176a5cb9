//! Natural-language query endpoint

use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{DocumentHit, QueryRequest};

/// POST /api/query/documents - ask a question over the classified corpus
pub async fn query_documents(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<Vec<DocumentHit>>> {
    run_query(&state, request)
}

/// GET /api/query/documents?question=...&limit=... - same contract for
/// clients that prefer a query string
pub async fn query_documents_get(
    State(state): State<AppState>,
    Query(request): Query<QueryRequest>,
) -> Result<Json<Vec<DocumentHit>>> {
    run_query(&state, request)
}

fn run_query(state: &AppState, request: QueryRequest) -> Result<Json<Vec<DocumentHit>>> {
    tracing::info!("Query: \"{}\"", request.question);

    let hits = state
        .engine()
        .search(&request.question, request.clamped_limit())?;

    tracing::debug!("Query returned {} hits", hits.len());
    Ok(Json(hits))
}

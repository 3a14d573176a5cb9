//! Dashboard endpoint

use axum::{extract::State, Json};

use crate::dashboard::{aggregate, DashboardSummary};
use crate::error::Result;
use crate::server::state::AppState;

/// GET /api/dashboard - frequency tables over the classified corpus
pub async fn get_dashboard(State(state): State<AppState>) -> Result<Json<DashboardSummary>> {
    let docs = state.store().list_documents()?;
    Ok(Json(aggregate(&docs)))
}

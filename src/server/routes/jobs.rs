//! Job progress endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::processing::{JobProgress, QueueStats};
use crate::server::state::AppState;

/// Response for the job list
#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobProgress>,
    pub stats: QueueStats,
}

/// GET /api/jobs - all tracked jobs plus queue stats
pub async fn list_jobs(State(state): State<AppState>) -> Json<JobListResponse> {
    let mut jobs = state.job_queue().list_jobs();
    // DashMap iteration order is arbitrary
    jobs.sort_by_key(|j| j.created_at);

    let stats = state.job_queue().stats();
    Json(JobListResponse { jobs, stats })
}

/// GET /api/jobs/:id - progress for one job
pub async fn get_job_progress(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobProgress>> {
    let progress = state
        .job_queue()
        .get_progress(job_id)
        .ok_or(Error::JobNotFound(job_id))?;

    Ok(Json(progress))
}

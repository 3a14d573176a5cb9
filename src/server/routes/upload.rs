//! Upload endpoint feeding the background ingest pipeline

use std::path::Path;

use axum::{
    extract::{Multipart, State},
    Json,
};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::processing::{Job, UploadedFile};
use crate::server::state::AppState;
use crate::types::UploadAccepted;

/// A file pulled out of the multipart body, not yet on disk
struct PendingFile {
    filename: String,
    content_type: Option<String>,
    data: Vec<u8>,
}

/// POST /api/upload - accept files and queue them for classification
///
/// The response acknowledges the job before any extraction or
/// classification runs; clients poll `/api/jobs/:id` for progress.
pub async fn upload_files(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadAccepted>> {
    let limit_mb = state.config().ingest.max_file_mb;
    let max_bytes = state.max_file_bytes();

    // Collect and size-check every part before anything touches disk, so
    // a rejected request stages and queues nothing.
    let mut pending: Vec<PendingFile> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Internal(format!("Failed to read multipart field: {}", e)))?
    {
        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("file_{}.bin", Uuid::new_v4()));
        let content_type = field.content_type().map(|s| s.to_string());

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::Internal(format!("Failed to read {}: {}", filename, e)))?;

        if data.len() as u64 > max_bytes {
            return Err(Error::upload_too_large(filename, limit_mb));
        }

        pending.push(PendingFile {
            filename,
            content_type,
            data: data.to_vec(),
        });
    }

    if pending.is_empty() {
        return Err(Error::NoFilesProvided);
    }

    let mut staged = Vec::with_capacity(pending.len());
    for file in pending {
        let path = stage_upload(&state, &file.filename, &file.data).await?;
        tracing::info!("Staged upload: {} ({} bytes)", file.filename, file.data.len());

        staged.push(UploadedFile {
            filename: file.filename,
            content_type: file.content_type,
            path,
            size_bytes: file.data.len() as u64,
        });
    }

    let files_queued = staged.len();
    let job_id = state.job_queue().submit(Job::new(staged)).await;

    Ok(Json(UploadAccepted {
        job_id,
        files_queued,
        message: format!("Job queued. Use /api/jobs/{} to check progress.", job_id),
    }))
}

/// Write the bytes under a random stem, keeping the original extension so
/// the extractor's dispatch still works on the stored copy.
async fn stage_upload(state: &AppState, filename: &str, data: &[u8]) -> Result<std::path::PathBuf> {
    let stem = Uuid::new_v4().simple().to_string();
    let stored_name = match Path::new(filename).extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}.{}", stem, ext),
        None => stem,
    };

    let path = state.config().storage.upload_dir.join(stored_name);
    tokio::fs::write(&path, data).await?;
    Ok(path)
}

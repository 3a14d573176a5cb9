//! Job queue with in-memory progress tracking
//!
//! Uploads are acknowledged immediately; classification happens on a
//! background worker. The queue hands jobs to the worker over a bounded
//! channel and keeps per-job progress in a `DashMap` so `/api/jobs` can
//! report on a job the moment its upload request returns. Finished jobs are
//! retained for polling up to a cap; the oldest are evicted so the progress
//! map stays bounded over the process lifetime.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Job status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Processing,
    Complete,
    Failed,
}

impl JobStatus {
    /// Complete or failed; no further transitions happen
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Complete | JobStatus::Failed)
    }
}

/// Error for a specific file within a job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileError {
    pub filename: String,
    pub error: String,
}

/// Progress tracking for a job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobProgress {
    pub job_id: Uuid,
    pub status: JobStatus,
    pub total_files: usize,
    pub files_processed: usize,
    pub files_failed: usize,
    pub current_file: Option<String>,
    pub error: Option<String>,
    pub file_errors: Vec<FileError>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobProgress {
    pub fn new(job_id: Uuid, total_files: usize) -> Self {
        let now = Utc::now();
        Self {
            job_id,
            status: JobStatus::Pending,
            total_files,
            files_processed: 0,
            files_failed: 0,
            current_file: None,
            error: None,
            file_errors: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A file staged in the upload directory, awaiting ingestion
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original filename as sent by the client
    pub filename: String,
    pub content_type: Option<String>,
    /// Where the bytes were staged on disk
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// An ingestion job
#[derive(Debug, Clone)]
pub struct Job {
    pub id: Uuid,
    pub files: Vec<UploadedFile>,
}

impl Job {
    pub fn new(files: Vec<UploadedFile>) -> Self {
        Self {
            id: Uuid::new_v4(),
            files,
        }
    }
}

/// Queue statistics
#[derive(Debug, Clone, Serialize)]
pub struct QueueStats {
    pub total_jobs: usize,
    pub pending: usize,
    pub processing: usize,
    pub complete: usize,
    pub failed: usize,
    /// Jobs submitted but not yet in a terminal state
    pub queued: usize,
}

/// Terminal jobs kept for status polling; the oldest are evicted past this
const FINISHED_JOBS_RETAINED: usize = 256;

/// Job queue for background ingestion
pub struct JobQueue {
    /// Active jobs with progress
    jobs: Arc<DashMap<Uuid, JobProgress>>,
    /// Channel for sending jobs to the worker
    sender: mpsc::Sender<Job>,
    /// Jobs in flight
    queue_size: Arc<AtomicUsize>,
    /// Cap on retained terminal jobs
    retained_finished: usize,
}

impl JobQueue {
    /// Create a new job queue and the receiver the worker drains
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<Job>) {
        Self::with_retention(capacity, FINISHED_JOBS_RETAINED)
    }

    /// Create a queue keeping at most `retained_finished` terminal jobs
    pub fn with_retention(
        capacity: usize,
        retained_finished: usize,
    ) -> (Self, mpsc::Receiver<Job>) {
        let (sender, receiver) = mpsc::channel(capacity);

        let queue = Self {
            jobs: Arc::new(DashMap::new()),
            sender,
            queue_size: Arc::new(AtomicUsize::new(0)),
            retained_finished,
        };

        (queue, receiver)
    }

    /// Submit a job for processing
    ///
    /// The progress entry is inserted before the job is handed to the
    /// worker, so a client polling `/api/jobs/:id` right after the upload
    /// response always finds it.
    pub async fn submit(&self, job: Job) -> Uuid {
        let job_id = job.id;
        let total_files = job.files.len();

        let progress = JobProgress::new(job_id, total_files);
        self.jobs.insert(job_id, progress);
        self.queue_size.fetch_add(1, Ordering::SeqCst);

        if let Err(e) = self.sender.send(job).await {
            tracing::error!("Failed to submit job {}: {}", job_id, e);
            self.update_status(job_id, JobStatus::Failed, Some(e.to_string()));
        }

        job_id
    }

    /// Get job progress
    pub fn get_progress(&self, job_id: Uuid) -> Option<JobProgress> {
        self.jobs.get(&job_id).map(|p| p.clone())
    }

    /// Get all jobs
    pub fn list_jobs(&self) -> Vec<JobProgress> {
        self.jobs.iter().map(|e| e.value().clone()).collect()
    }

    /// Update job status
    pub fn update_status(&self, job_id: Uuid, status: JobStatus, error: Option<String>) {
        if let Some(mut progress) = self.jobs.get_mut(&job_id) {
            progress.status = status;
            progress.error = error;
            progress.updated_at = Utc::now();
            if status.is_terminal() {
                progress.current_file = None;
                self.queue_size.fetch_sub(1, Ordering::SeqCst);
                drop(progress); // Release the shard lock before pruning
                self.prune_finished();
            }
        }
    }

    /// Evict the oldest terminal jobs once more than `retained_finished` are
    /// tracked; active jobs are never evicted
    fn prune_finished(&self) {
        let mut finished: Vec<(Uuid, DateTime<Utc>)> = self
            .jobs
            .iter()
            .filter(|job| job.status.is_terminal())
            .map(|job| (job.job_id, job.updated_at))
            .collect();

        if finished.len() <= self.retained_finished {
            return;
        }

        finished.sort_by_key(|(_, updated_at)| *updated_at);
        let excess = finished.len() - self.retained_finished;
        for (job_id, _) in finished.into_iter().take(excess) {
            self.jobs.remove(&job_id);
        }
    }

    /// Update the file currently being ingested
    pub fn update_current_file(&self, job_id: Uuid, filename: &str) {
        if let Some(mut progress) = self.jobs.get_mut(&job_id) {
            progress.current_file = Some(filename.to_string());
            progress.updated_at = Utc::now();
        }
    }

    /// Increment files processed
    pub fn increment_files_processed(&self, job_id: Uuid) {
        if let Some(mut progress) = self.jobs.get_mut(&job_id) {
            progress.files_processed += 1;
            progress.updated_at = Utc::now();
        }
    }

    /// Record a file-level failure without aborting the rest of the job
    pub fn add_file_error(&self, job_id: Uuid, filename: &str, error: &str) {
        if let Some(mut progress) = self.jobs.get_mut(&job_id) {
            progress.files_failed += 1;
            progress.file_errors.push(FileError {
                filename: filename.to_string(),
                error: error.to_string(),
            });
            progress.updated_at = Utc::now();
        }
    }

    /// Queue statistics across all tracked jobs
    pub fn stats(&self) -> QueueStats {
        let total = self.jobs.len();
        let pending = self.count_with(JobStatus::Pending);
        let processing = self.count_with(JobStatus::Processing);
        let complete = self.count_with(JobStatus::Complete);
        let failed = self.count_with(JobStatus::Failed);

        QueueStats {
            total_jobs: total,
            pending,
            processing,
            complete,
            failed,
            queued: self.queue_size.load(Ordering::SeqCst),
        }
    }

    fn count_with(&self, status: JobStatus) -> usize {
        self.jobs.iter().filter(|j| j.status == status).count()
    }
}

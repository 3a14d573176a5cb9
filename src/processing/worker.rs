//! Background worker that drains the ingest queue

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::ingestion::{MetadataClassifier, TextExtractor};
use crate::storage::DocumentStore;
use crate::types::{Document, NewDocument};
use crate::Result;

use super::job_queue::{Job, JobQueue, JobStatus, UploadedFile};

/// Worker that extracts, classifies, and stores uploaded documents
pub struct IngestWorker {
    store: Arc<DocumentStore>,
    classifier: MetadataClassifier,
    job_queue: Arc<JobQueue>,
}

impl IngestWorker {
    pub fn new(store: Arc<DocumentStore>, job_queue: Arc<JobQueue>) -> Self {
        Self {
            store,
            classifier: MetadataClassifier::new(),
            job_queue,
        }
    }

    /// Drain jobs from the queue until the channel closes
    pub async fn run(self, mut receiver: mpsc::Receiver<Job>) {
        tracing::info!("Ingest worker started");

        while let Some(job) = receiver.recv().await {
            let job_id = job.id;
            let total_files = job.files.len();
            tracing::info!("Processing job {} with {} files", job_id, total_files);

            self.job_queue.update_status(job_id, JobStatus::Processing, None);
            self.process_job(job).await;

            let files_failed = self
                .job_queue
                .get_progress(job_id)
                .map(|p| p.files_failed)
                .unwrap_or(0);

            if files_failed > 0 {
                let summary = format!("{} of {} files failed", files_failed, total_files);
                tracing::error!("Job {} finished with errors: {}", job_id, summary);
                self.job_queue
                    .update_status(job_id, JobStatus::Failed, Some(summary));
            } else {
                tracing::info!("Job {} completed", job_id);
                self.job_queue.update_status(job_id, JobStatus::Complete, None);
            }
        }

        tracing::info!("Ingest worker stopped");
    }

    /// A file-level failure is recorded on the job; the remaining files
    /// still get their turn.
    async fn process_job(&self, job: Job) {
        let job_id = job.id;

        for file in &job.files {
            self.job_queue.update_current_file(job_id, &file.filename);

            match self.ingest_file(file).await {
                Ok(doc) => {
                    self.job_queue.increment_files_processed(job_id);
                    tracing::debug!(
                        "Stored {} as document {} ({})",
                        file.filename,
                        doc.id,
                        doc.agreement_type
                    );
                }
                Err(e) => {
                    tracing::warn!("Failed to ingest {}: {}", file.filename, e);
                    self.job_queue.add_file_error(job_id, &file.filename, &e.to_string());
                }
            }
        }
    }

    async fn ingest_file(&self, file: &UploadedFile) -> Result<Document> {
        let data = tokio::fs::read(&file.path).await?;

        let text = TextExtractor::extract(&file.filename, file.content_type.as_deref(), &data);
        let metadata = self.classifier.classify(&text);

        let record = NewDocument::new(
            file.filename.clone(),
            file.content_type.clone(),
            file.size_bytes,
            text,
            metadata,
        );
        self.store.insert_document(&record)
    }
}

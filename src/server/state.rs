//! Application state for the document intelligence server

use std::fs;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::Result;
use crate::processing::{IngestWorker, JobQueue};
use crate::retrieval::RetrievalEngine;
use crate::storage::DocumentStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AppConfig,
    /// Document store
    store: Arc<DocumentStore>,
    /// Tiered retrieval over the store
    engine: RetrievalEngine,
    /// Queue feeding the background ingest worker
    job_queue: Arc<JobQueue>,
}

impl AppState {
    /// Create new application state and spawn the ingest worker
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: AppConfig) -> Result<Self> {
        if let Some(parent) = config.storage.database_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::create_dir_all(&config.storage.upload_dir)?;

        let store = Arc::new(DocumentStore::new(&config.storage.database_path)?);
        tracing::info!(
            "Document store ready at {}",
            config.storage.database_path.display()
        );

        let engine = RetrievalEngine::new(store.clone());

        let (job_queue, receiver) = JobQueue::new(config.ingest.queue_capacity);
        let job_queue = Arc::new(job_queue);

        let state = Self {
            inner: Arc::new(AppStateInner {
                config,
                store: store.clone(),
                engine,
                job_queue: job_queue.clone(),
            }),
        };

        // The worker owns the receiving half of the queue
        let worker = IngestWorker::new(store, job_queue);
        tokio::spawn(async move {
            worker.run(receiver).await;
        });

        Ok(state)
    }

    /// Get the configuration
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get the document store
    pub fn store(&self) -> &Arc<DocumentStore> {
        &self.inner.store
    }

    /// Get the retrieval engine
    pub fn engine(&self) -> &RetrievalEngine {
        &self.inner.engine
    }

    /// Get the job queue
    pub fn job_queue(&self) -> &Arc<JobQueue> {
        &self.inner.job_queue
    }

    /// Per-file upload limit in bytes
    pub fn max_file_bytes(&self) -> u64 {
        self.inner.config.ingest.max_file_mb * 1024 * 1024
    }

    /// Whether the backing store is answering queries
    pub fn is_ready(&self) -> bool {
        self.inner.store.count_documents().is_ok()
    }
}

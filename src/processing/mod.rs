//! Background ingestion with job queue and progress tracking

mod job_queue;
mod worker;

pub use job_queue::{
    FileError, Job, JobProgress, JobQueue, JobStatus, QueueStats, UploadedFile,
};
pub use worker::IngestWorker;

//! Response types for the HTTP API

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::document::{Document, DocumentSummary};

/// A retrieval hit: the document identifier plus its governing law
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentHit {
    /// Document identifier (the uploaded filename)
    pub document: String,
    /// Governing law classified for the document, if any
    pub governing_law: Option<String>,
}

impl From<&Document> for DocumentHit {
    fn from(doc: &Document) -> Self {
        Self {
            document: doc.filename.clone(),
            governing_law: doc.governing_law.clone(),
        }
    }
}

/// Acknowledgment returned when uploaded files are queued for processing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadAccepted {
    /// Job id for polling progress
    pub job_id: Uuid,
    /// Number of files queued behind this job
    pub files_queued: usize,
    /// Human-readable status message
    pub message: String,
}

/// Document listing with the corpus total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentSummary>,
    pub total: usize,
}

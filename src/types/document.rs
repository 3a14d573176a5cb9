//! Document records and classified metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel standing in for an absent classification value
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Metadata fields produced by the vocabulary scans
///
/// `agreement_type` is always populated (falling back to [`UNKNOWN_LABEL`]);
/// the other three stay `None` when no vocabulary term matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Agreement type, e.g. "NDA" or "Master Services Agreement"
    pub agreement_type: String,
    /// Jurisdiction whose legal rules apply, e.g. "Delaware"
    pub governing_law: Option<String>,
    /// Regional classification, e.g. "Middle East"
    pub geography: Option<String>,
    /// Industry classification, e.g. "Healthcare"
    pub industry: Option<String>,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            agreement_type: UNKNOWN_LABEL.to_string(),
            governing_law: None,
            geography: None,
            industry: None,
        }
    }
}

/// A document row as stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Row id; assignment order doubles as corpus insertion order
    pub id: i64,
    /// Original filename as uploaded
    pub filename: String,
    /// Content type declared at upload time
    pub content_type: Option<String>,
    /// Size of the uploaded bytes
    pub size_bytes: u64,
    /// Extracted plain text (empty string when extraction degraded)
    pub text: Option<String>,
    /// Agreement type, never null
    pub agreement_type: String,
    pub governing_law: Option<String>,
    pub geography: Option<String>,
    pub industry: Option<String>,
    /// When the classified record was persisted
    pub created_at: DateTime<Utc>,
}

/// A fully classified document that has not been assigned a row id yet
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub filename: String,
    pub content_type: Option<String>,
    pub size_bytes: u64,
    pub text: Option<String>,
    pub metadata: DocumentMetadata,
    pub created_at: DateTime<Utc>,
}

impl NewDocument {
    /// Build a record from the extraction and classification outputs
    pub fn new(
        filename: impl Into<String>,
        content_type: Option<String>,
        size_bytes: u64,
        text: String,
        metadata: DocumentMetadata,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type,
            size_bytes,
            text: Some(text),
            metadata,
            created_at: Utc::now(),
        }
    }
}

/// Listing view of a document: everything except the extracted text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: i64,
    pub filename: String,
    pub content_type: Option<String>,
    pub size_bytes: u64,
    pub agreement_type: String,
    pub governing_law: Option<String>,
    pub geography: Option<String>,
    pub industry: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Document> for DocumentSummary {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id,
            filename: doc.filename.clone(),
            content_type: doc.content_type.clone(),
            size_bytes: doc.size_bytes,
            agreement_type: doc.agreement_type.clone(),
            governing_law: doc.governing_law.clone(),
            geography: doc.geography.clone(),
            industry: doc.industry.clone(),
            created_at: doc.created_at,
        }
    }
}

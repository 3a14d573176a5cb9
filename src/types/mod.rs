//! Core types for the document intelligence service

pub mod document;
pub mod query;
pub mod response;

pub use document::{Document, DocumentMetadata, DocumentSummary, NewDocument, UNKNOWN_LABEL};
pub use query::QueryRequest;
pub use response::{DocumentHit, DocumentListResponse, UploadAccepted};

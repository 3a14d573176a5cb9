//! legal-intel: document intelligence over legal agreements
//!
//! Uploads are extracted to plain text, classified against a small
//! controlled vocabulary (agreement type, governing law, geography,
//! industry), and stored. Natural-language questions are answered by a
//! deterministic filter-then-keyword retrieval cascade over the
//! classified corpus; a dashboard endpoint tabulates it.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod ingestion;
pub mod processing;
pub mod retrieval;
pub mod server;
pub mod storage;
pub mod types;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use types::{
    document::{Document, DocumentMetadata},
    query::QueryRequest,
    response::{DocumentHit, UploadAccepted},
};

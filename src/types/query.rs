//! Query request types

use serde::{Deserialize, Serialize};

/// Default number of hits returned when the caller does not say
pub const DEFAULT_LIMIT: usize = 50;

/// Upper bound on the number of hits a single query may return
pub const MAX_LIMIT: usize = 200;

/// A natural-language question against the classified corpus
///
/// Used both as the POST body and, field for field, as the GET query string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The question to match against the corpus
    pub question: String,

    /// Maximum number of hits to return (default: 50, capped at 200)
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl QueryRequest {
    /// Create a request with the default limit
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            limit: DEFAULT_LIMIT,
        }
    }

    /// Set the hit limit
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// The requested limit clamped into the allowed range
    pub fn clamped_limit(&self) -> usize {
        self.limit.clamp(1, MAX_LIMIT)
    }
}

//! Document ingestion: fail-safe text extraction and rule-based classification

pub mod classifier;
pub mod extractor;

pub use classifier::MetadataClassifier;
pub use extractor::TextExtractor;

//! Question handling: place-filter extraction and tiered retrieval

pub mod filters;
pub mod search;

pub use filters::{FilterExtractor, PlaceFilter};
pub use search::RetrievalEngine;

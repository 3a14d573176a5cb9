//! Tiered retrieval over the classified corpus
//!
//! Three tiers with short-circuit semantics: a structured place filter, a
//! keyword fallback over the indexed fields, then the empty result. A tier
//! that answers ends the cascade; hits come back in corpus insertion order
//! with no relevance ranking.

use std::collections::HashSet;
use std::sync::Arc;

use regex::Regex;

use crate::error::Result;
use crate::retrieval::filters::FilterExtractor;
use crate::storage::DocumentStore;
use crate::types::response::DocumentHit;

/// Tokens excluded from the keyword fallback
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "with", "under", "which", "show", "docs", "doc", "law", "valid",
    "in", "by", "of",
];

/// Answers natural-language questions against the document store
pub struct RetrievalEngine {
    store: Arc<DocumentStore>,
    filters: FilterExtractor,
    token_re: Regex,
    stop_words: HashSet<&'static str>,
}

impl RetrievalEngine {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self {
            store,
            filters: FilterExtractor::new(),
            token_re: Regex::new(r"[a-zA-Z]+").expect("token pattern is valid"),
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }

    /// Search the corpus for documents answering the question
    ///
    /// Total over all questions: no matches is an empty list, never an
    /// error. Deterministic against an unchanged corpus.
    pub fn search(&self, question: &str, limit: usize) -> Result<Vec<DocumentHit>> {
        let question = question.to_lowercase();
        let q = question.trim();

        // Tier 1: structured place filter. A non-empty answer ends the
        // cascade even when it is smaller than the limit.
        let filter = self.filters.extract(q);
        if !filter.is_empty() {
            let docs = self.store.find_by_place(&filter, limit)?;
            if !docs.is_empty() {
                return Ok(docs.iter().map(DocumentHit::from).collect());
            }
        }

        // Tier 2: keyword fallback across the five searchable fields
        let tokens = self.keywords(q);
        if tokens.is_empty() {
            // Tier 3: nothing to match on
            return Ok(Vec::new());
        }

        let docs = self.store.find_by_keywords(&tokens, limit)?;
        Ok(docs.iter().map(DocumentHit::from).collect())
    }

    /// Maximal alphabetic runs longer than two characters, minus stop words
    fn keywords(&self, q: &str) -> Vec<String> {
        self.token_re
            .find_iter(q)
            .map(|m| m.as_str())
            .filter(|t| t.len() > 2 && !self.stop_words.contains(t))
            .map(|t| t.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::document::{DocumentMetadata, NewDocument};

    fn doc(filename: &str, metadata: DocumentMetadata) -> NewDocument {
        NewDocument::new(
            filename,
            Some("text/plain".to_string()),
            64,
            String::new(),
            metadata,
        )
    }

    fn law(jurisdiction: &str) -> DocumentMetadata {
        DocumentMetadata {
            agreement_type: "NDA".to_string(),
            governing_law: Some(jurisdiction.to_string()),
            geography: None,
            industry: None,
        }
    }

    fn engine_with(docs: Vec<NewDocument>) -> RetrievalEngine {
        let store = Arc::new(DocumentStore::in_memory().unwrap());
        for d in &docs {
            store.insert_document(d).unwrap();
        }
        RetrievalEngine::new(store)
    }

    #[test]
    fn test_tier1_filter_match() {
        let engine = engine_with(vec![
            doc("alpha-nda.pdf", law("Delaware")),
            doc("beta-msa.pdf", law("UAE")),
        ]);

        let hits = engine
            .search("Find documents governed by Delaware law", 50)
            .unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].document, "alpha-nda.pdf");
        assert_eq!(hits[0].governing_law.as_deref(), Some("Delaware"));
    }

    #[test]
    fn test_tier1_matches_canonical_place_substring() {
        let engine = engine_with(vec![doc("gulf-supply.docx", law("United Arab Emirates"))]);

        let hits = engine.search("governed by uae law", 50).unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].document, "gulf-supply.docx");
    }

    #[test]
    fn test_tier1_result_ends_cascade() {
        // The second document would match Tier 2 on its filename, but a
        // non-empty Tier 1 answer is returned as-is
        let engine = engine_with(vec![
            doc("classified.pdf", law("Delaware")),
            doc("delaware-notes.txt", DocumentMetadata::default()),
        ]);

        let hits = engine.search("governed by delaware law", 50).unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].document, "classified.pdf");
    }

    #[test]
    fn test_tier2_keyword_fallback_when_tier1_empty() {
        // "valid in uae" produces a geography filter, but no document has a
        // geography value; the keyword "uae" still finds the filename
        let engine = engine_with(vec![doc("uae-supplier.pdf", DocumentMetadata::default())]);

        let hits = engine.search("valid in uae", 50).unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].document, "uae-supplier.pdf");
    }

    #[test]
    fn test_stop_words_only_yields_empty() {
        let engine = engine_with(vec![doc("anything.pdf", law("Delaware"))]);

        let hits = engine.search("the and for", 50).unwrap();

        assert!(hits.is_empty());
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let engine = engine_with(vec![doc("anything.pdf", law("Delaware"))]);

        let hits = engine.search("zebra xylophone", 50).unwrap();

        assert!(hits.is_empty());
    }

    #[test]
    fn test_hits_follow_insertion_order_and_repeat_identically() {
        let engine = engine_with(vec![
            doc("first.pdf", law("Delaware")),
            doc("second.pdf", law("Delaware")),
            doc("third.pdf", law("Delaware")),
        ]);

        let once = engine.search("governed by delaware law", 50).unwrap();
        let again = engine.search("governed by delaware law", 50).unwrap();

        let names: Vec<&str> = once.iter().map(|h| h.document.as_str()).collect();
        assert_eq!(names, vec!["first.pdf", "second.pdf", "third.pdf"]);
        assert_eq!(once, again);
    }

    #[test]
    fn test_limit_caps_results() {
        let engine = engine_with(vec![
            doc("first.pdf", law("Delaware")),
            doc("second.pdf", law("Delaware")),
            doc("third.pdf", law("Delaware")),
        ]);

        let hits = engine.search("governed by delaware law", 2).unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].document, "first.pdf");
        assert_eq!(hits[1].document, "second.pdf");
    }

    #[test]
    fn test_tier2_keyword_matches_agreement_type() {
        let engine = engine_with(vec![doc(
            "contract-007.pdf",
            DocumentMetadata {
                agreement_type: "Franchise Agreement".to_string(),
                governing_law: None,
                geography: None,
                industry: None,
            },
        )]);

        let hits = engine.search("show franchise docs", 50).unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].document, "contract-007.pdf");
    }
}

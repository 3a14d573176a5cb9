//! Rule-based metadata classification against a controlled vocabulary
//!
//! Four independent scans over fixed, ordered term lists. Each scan returns
//! the first term (in list order) found as a case-insensitive whole-word
//! match anywhere in the text. Deterministic and total: every input,
//! including the empty string, classifies to a fully populated result.

use regex::Regex;

use crate::types::document::{DocumentMetadata, UNKNOWN_LABEL};

/// Agreement-type vocabulary; list order is match priority
const AGREEMENT_TYPES: &[&str] = &[
    "NDA",
    "Non-Disclosure Agreement",
    "MSA",
    "Master Services Agreement",
    "Franchise Agreement",
    "Supplier Agreement",
    "Employment Agreement",
];

/// Governing-law vocabulary
const JURISDICTIONS: &[&str] = &[
    "UAE", "UK", "Delaware", "US", "EU", "KSA", "Dubai", "Abu Dhabi",
];

/// Geography vocabulary
const GEOGRAPHIES: &[&str] = &["Middle East", "Europe", "Asia", "GCC", "United States"];

/// Industry vocabulary
const INDUSTRIES: &[&str] = &["Oil & Gas", "Healthcare", "Technology", "Finance", "Retail"];

/// Classified values are capped at this many characters
const MAX_VALUE_LEN: usize = 40;

/// One vocabulary compiled into whole-word matchers, kept in list order
struct VocabScan {
    rules: Vec<(Regex, &'static str)>,
}

impl VocabScan {
    fn compile(terms: &[&'static str]) -> Self {
        let rules = terms
            .iter()
            .map(|term| {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(term));
                let re = Regex::new(&pattern).expect("vocabulary pattern is valid");
                (re, *term)
            })
            .collect();

        Self { rules }
    }

    /// First term, in list order, appearing as a whole word in the text
    fn find_first(&self, text: &str) -> Option<String> {
        self.rules
            .iter()
            .find(|(re, _)| re.is_match(text))
            .map(|(_, term)| cap_len(term))
    }
}

/// Truncate a matched value to [`MAX_VALUE_LEN`] characters
fn cap_len(term: &str) -> String {
    if term.chars().count() > MAX_VALUE_LEN {
        term.chars().take(MAX_VALUE_LEN).collect()
    } else {
        term.to_string()
    }
}

/// Deterministic vocabulary classifier for uploaded documents
pub struct MetadataClassifier {
    agreement_types: VocabScan,
    jurisdictions: VocabScan,
    geographies: VocabScan,
    industries: VocabScan,
}

impl MetadataClassifier {
    /// Compile the rule tables once; the classifier is then immutable
    pub fn new() -> Self {
        Self {
            agreement_types: VocabScan::compile(AGREEMENT_TYPES),
            jurisdictions: VocabScan::compile(JURISDICTIONS),
            geographies: VocabScan::compile(GEOGRAPHIES),
            industries: VocabScan::compile(INDUSTRIES),
        }
    }

    /// Classify extracted text into the four metadata fields
    pub fn classify(&self, text: &str) -> DocumentMetadata {
        let mut metadata = DocumentMetadata {
            agreement_type: self
                .agreement_types
                .find_first(text)
                .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
            governing_law: self.jurisdictions.find_first(text),
            geography: self.geographies.find_first(text),
            industry: self.industries.find_first(text),
        };

        // NDA override outranks any vocabulary result, applied last
        if text.to_lowercase().contains("non-disclosure") {
            metadata.agreement_type = "NDA".to_string();
        }

        metadata
    }
}

impl Default for MetadataClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_classifies_as_unknown() {
        let classifier = MetadataClassifier::new();
        let metadata = classifier.classify("");

        assert_eq!(metadata.agreement_type, UNKNOWN_LABEL);
        assert_eq!(metadata.governing_law, None);
        assert_eq!(metadata.geography, None);
        assert_eq!(metadata.industry, None);
    }

    #[test]
    fn test_unrecognized_text_classifies_as_unknown() {
        let classifier = MetadataClassifier::new();
        let metadata = classifier.classify("quarterly sales figures and meeting minutes");

        assert_eq!(metadata.agreement_type, UNKNOWN_LABEL);
        assert_eq!(metadata.governing_law, None);
    }

    #[test]
    fn test_list_order_beats_text_position() {
        let classifier = MetadataClassifier::new();
        // "Employment Agreement" appears first in the text, but "MSA" comes
        // earlier in the vocabulary
        let metadata =
            classifier.classify("This Employment Agreement supplements the MSA dated 2024.");

        assert_eq!(metadata.agreement_type, "MSA");
    }

    #[test]
    fn test_whole_word_matching() {
        let classifier = MetadataClassifier::new();

        // "US" inside "trust" must not match
        let metadata = classifier.classify("held in trust for the beneficiary");
        assert_eq!(metadata.governing_law, None);

        let metadata = classifier.classify("expansion into the US market");
        assert_eq!(metadata.governing_law, Some("US".to_string()));
    }

    #[test]
    fn test_match_is_case_insensitive_and_returns_canonical_term() {
        let classifier = MetadataClassifier::new();
        let metadata = classifier.classify("incorporated in delaware under local statutes");

        assert_eq!(metadata.governing_law, Some("Delaware".to_string()));
    }

    #[test]
    fn test_nda_override_beats_other_agreement_types() {
        let classifier = MetadataClassifier::new();
        let metadata = classifier
            .classify("Master Services Agreement incorporating non-disclosure obligations");

        assert_eq!(metadata.agreement_type, "NDA");
    }

    #[test]
    fn test_nda_override_is_case_insensitive() {
        let classifier = MetadataClassifier::new();
        let metadata = classifier.classify("NON-DISCLOSURE terms apply to both parties");

        assert_eq!(metadata.agreement_type, "NDA");
    }

    #[test]
    fn test_geography_and_industry_scans() {
        let classifier = MetadataClassifier::new();
        let metadata =
            classifier.classify("serving Oil & Gas operators across the Middle East region");

        assert_eq!(metadata.geography, Some("Middle East".to_string()));
        assert_eq!(metadata.industry, Some("Oil & Gas".to_string()));
    }

    #[test]
    fn test_delaware_nda_scenario() {
        let classifier = MetadataClassifier::new();
        let metadata =
            classifier.classify("This Non-Disclosure Agreement is governed by Delaware law.");

        assert_eq!(metadata.agreement_type, "NDA");
        assert_eq!(metadata.governing_law, Some("Delaware".to_string()));
    }

    #[test]
    fn test_long_terms_are_capped() {
        let scan = VocabScan::compile(&[
            "An Extremely Long Vocabulary Term That Exceeds The Cap",
        ]);
        let found = scan
            .find_first("contains An Extremely Long Vocabulary Term That Exceeds The Cap here")
            .unwrap();

        assert_eq!(found.chars().count(), MAX_VALUE_LEN);
        assert!(found.starts_with("An Extremely Long"));
    }
}

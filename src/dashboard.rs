//! Frequency tables over the classified corpus

use std::collections::HashMap;

use serde::Serialize;

use crate::types::{Document, UNKNOWN_LABEL};

/// Per-category counts for the dashboard, plus the corpus size
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub agreement_types: HashMap<String, usize>,
    pub jurisdictions: HashMap<String, usize>,
    pub industries: HashMap<String, usize>,
    pub geographies: HashMap<String, usize>,
    pub count_documents: usize,
}

/// Tabulate the corpus. Null fields count under the `"Unknown"` label so
/// every document shows up in every table.
pub fn aggregate(documents: &[Document]) -> DashboardSummary {
    DashboardSummary {
        agreement_types: tally(documents.iter().map(|d| Some(d.agreement_type.as_str()))),
        jurisdictions: tally(documents.iter().map(|d| d.governing_law.as_deref())),
        industries: tally(documents.iter().map(|d| d.industry.as_deref())),
        geographies: tally(documents.iter().map(|d| d.geography.as_deref())),
        count_documents: documents.len(),
    }
}

fn tally<'a, I>(values: I) -> HashMap<String, usize>
where
    I: Iterator<Item = Option<&'a str>>,
{
    let mut counts = HashMap::new();
    for value in values {
        let label = value.unwrap_or(UNKNOWN_LABEL);
        *counts.entry(label.to_string()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn doc(agreement_type: &str, governing_law: Option<&str>, industry: Option<&str>) -> Document {
        Document {
            id: 0,
            filename: "contract.pdf".to_string(),
            content_type: Some("application/pdf".to_string()),
            size_bytes: 100,
            text: Some("".to_string()),
            agreement_type: agreement_type.to_string(),
            governing_law: governing_law.map(str::to_string),
            geography: None,
            industry: industry.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_corpus_yields_empty_tables() {
        let summary = aggregate(&[]);
        assert_eq!(summary.count_documents, 0);
        assert!(summary.agreement_types.is_empty());
        assert!(summary.jurisdictions.is_empty());
        assert!(summary.industries.is_empty());
        assert!(summary.geographies.is_empty());
    }

    #[test]
    fn counts_group_by_field_value() {
        let corpus = vec![
            doc("NDA", Some("UAE"), Some("Technology")),
            doc("NDA", Some("UK"), None),
            doc("MSA", Some("UAE"), Some("Healthcare")),
        ];

        let summary = aggregate(&corpus);
        assert_eq!(summary.count_documents, 3);
        assert_eq!(summary.agreement_types["NDA"], 2);
        assert_eq!(summary.agreement_types["MSA"], 1);
        assert_eq!(summary.jurisdictions["UAE"], 2);
        assert_eq!(summary.jurisdictions["UK"], 1);
        assert_eq!(summary.industries["Technology"], 1);
    }

    #[test]
    fn null_fields_count_as_unknown() {
        let corpus = vec![
            doc("Unknown", None, None),
            doc("NDA", None, Some("Finance")),
        ];

        let summary = aggregate(&corpus);
        assert_eq!(summary.jurisdictions[UNKNOWN_LABEL], 2);
        assert_eq!(summary.industries[UNKNOWN_LABEL], 1);
        assert_eq!(summary.industries["Finance"], 1);
        assert_eq!(summary.geographies[UNKNOWN_LABEL], 2);
        assert_eq!(summary.agreement_types[UNKNOWN_LABEL], 1);
    }
}

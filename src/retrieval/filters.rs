//! Place-filter extraction from natural-language questions
//!
//! A question yields at most one filter key. Phrase templates are tried in
//! order and the first hit wins, so a question mentioning both a
//! governing-law phrase and a geographic one resolves to a single key; that
//! single-filter behavior is part of the contract, not an accident.

use regex::Regex;

/// Informal place name → canonical place, in table order
const PLACE_ALIASES: &[(&str, &str)] = &[
    ("uae", "United Arab Emirates"),
    ("united arab emirates", "United Arab Emirates"),
    ("ksa", "Saudi Arabia"),
    ("saudi", "Saudi Arabia"),
    ("us", "United States"),
    ("usa", "United States"),
    ("united states", "United States"),
    ("uk", "United Kingdom"),
    ("united kingdom", "United Kingdom"),
    ("england", "United Kingdom"),
    ("scotland", "United Kingdom"),
    ("wales", "United Kingdom"),
    ("northern ireland", "United Kingdom"),
    ("delaware", "Delaware"),
    ("california", "California"),
    ("dubai", "Dubai"),
    ("abu dhabi", "Abu Dhabi"),
    ("europe", "Europe"),
    ("gcc", "GCC"),
];

/// Abbreviations recognized after collapsing internal spaces and periods
const COLLAPSED_ABBREVIATIONS: &[&str] = &["uae", "usa", "uk", "ksa"];

/// Phrase templates tried in order; each captures a candidate place phrase
const PLACE_TEMPLATES: &[&str] = &[
    r"governed by (?P<place>[a-zA-Z\s]+?) law",
    r"under (?P<place>[a-zA-Z\s]+?) law",
    r"valid in (?P<place>[a-zA-Z\s]+)",
    r"applicable in (?P<place>[a-zA-Z\s]+)",
    r"in (?P<place>[a-zA-Z\s]+)$",
    r"(?P<place>[a-zA-Z\s]+) law",
];

/// Structured filter for one question; at most one key is ever populated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceFilter {
    pub governing_law: Option<String>,
    pub geography: Option<String>,
}

impl PlaceFilter {
    /// True when no key is populated
    pub fn is_empty(&self) -> bool {
        self.governing_law.is_none() && self.geography.is_none()
    }

    fn governing_law(place: String) -> Self {
        Self {
            governing_law: Some(place),
            geography: None,
        }
    }

    fn geography(place: String) -> Self {
        Self {
            governing_law: None,
            geography: Some(place),
        }
    }
}

/// Extracts a place filter from questions via ordered phrase templates
pub struct FilterExtractor {
    /// Template source paired with its compiled form, in priority order
    templates: Vec<(&'static str, Regex)>,
    /// Alias table ordered longest key first; ties keep table order
    fallback_aliases: Vec<(&'static str, &'static str)>,
}

impl FilterExtractor {
    /// Compile the templates and order the fallback table once
    pub fn new() -> Self {
        let templates = PLACE_TEMPLATES
            .iter()
            .map(|pattern| {
                let re = Regex::new(pattern).expect("place template is valid");
                (*pattern, re)
            })
            .collect();

        // Longest alias first so "united arab emirates" beats "saudi" on
        // containment; the sort is stable, ties keep table order
        let mut fallback_aliases = PLACE_ALIASES.to_vec();
        fallback_aliases.sort_by_key(|(alias, _)| std::cmp::Reverse(alias.len()));

        Self {
            templates,
            fallback_aliases,
        }
    }

    /// Extract at most one filter key from a question
    ///
    /// Total: every input yields a (possibly empty) filter, never an error.
    pub fn extract(&self, question: &str) -> PlaceFilter {
        let question = question.to_lowercase();
        let q = question.trim();

        for (template, re) in &self.templates {
            let Some(caps) = re.captures(q) else {
                continue;
            };
            let raw = caps.name("place").map(|m| m.as_str()).unwrap_or("");
            if raw.is_empty() {
                continue;
            }
            let Some(place) = normalize_place(raw) else {
                continue;
            };

            // "law" in the matched template or anywhere in the question
            // marks a governing-law filter; anything else is geographic
            return if template.contains("law") || q.contains("law") {
                PlaceFilter::governing_law(place)
            } else {
                PlaceFilter::geography(place)
            };
        }

        // No template matched: fall back to raw alias containment
        for (alias, canonical) in &self.fallback_aliases {
            if q.contains(alias) {
                let place = (*canonical).to_string();
                return if q.contains("law") || q.contains("governed") || q.contains("under") {
                    PlaceFilter::governing_law(place)
                } else {
                    PlaceFilter::geography(place)
                };
            }
        }

        PlaceFilter::default()
    }
}

impl Default for FilterExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Canonicalize a captured place phrase; `None` when nothing usable remains
fn normalize_place(raw: &str) -> Option<String> {
    let key = raw.trim().to_lowercase();

    if let Some(canonical) = alias_lookup(&key) {
        return Some(canonical.to_string());
    }

    // "u a e" or "u.s.a." style abbreviations collapse to a known alias
    let collapsed: String = key.chars().filter(|c| *c != '.' && *c != ' ').collect();
    if COLLAPSED_ABBREVIATIONS.contains(&collapsed.as_str()) {
        if let Some(canonical) = alias_lookup(&collapsed) {
            return Some(canonical.to_string());
        }
    }

    // Title-case each word as a last resort
    let words: Vec<String> = key.split_whitespace().map(capitalize).collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

fn alias_lookup(key: &str) -> Option<&'static str> {
    PLACE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| *canonical)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_question_yields_empty_filter() {
        let extractor = FilterExtractor::new();
        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("   ").is_empty());
    }

    #[test]
    fn test_every_alias_resolves_through_governed_by_template() {
        let extractor = FilterExtractor::new();

        for (alias, canonical) in PLACE_ALIASES {
            let question = format!("governed by {} law", alias);
            let filter = extractor.extract(&question);

            assert_eq!(
                filter.governing_law.as_deref(),
                Some(*canonical),
                "alias '{}' did not resolve",
                alias
            );
            assert_eq!(filter.geography, None);
        }
    }

    #[test]
    fn test_under_law_template() {
        let extractor = FilterExtractor::new();
        let filter = extractor.extract("Which agreements fall under UK law?");

        assert_eq!(filter.governing_law.as_deref(), Some("United Kingdom"));
    }

    #[test]
    fn test_valid_in_is_geographic_without_law_keyword() {
        let extractor = FilterExtractor::new();
        let filter = extractor.extract("which agreements are valid in europe");

        assert_eq!(filter.geography.as_deref(), Some("Europe"));
        assert_eq!(filter.governing_law, None);
    }

    #[test]
    fn test_trailing_in_phrase() {
        let extractor = FilterExtractor::new();
        let filter = extractor.extract("show contracts in gcc");

        assert_eq!(filter.geography.as_deref(), Some("GCC"));
    }

    #[test]
    fn test_collapsed_abbreviation_normalizes() {
        let extractor = FilterExtractor::new();
        let filter = extractor.extract("valid in u a e");

        assert_eq!(filter.geography.as_deref(), Some("United Arab Emirates"));
    }

    #[test]
    fn test_unknown_place_title_cased() {
        let extractor = FilterExtractor::new();
        let filter = extractor.extract("valid in atlantis");

        assert_eq!(filter.geography.as_deref(), Some("Atlantis"));
    }

    #[test]
    fn test_first_template_wins_never_both_keys() {
        let extractor = FilterExtractor::new();
        // Mentions both a geography phrase and a governing-law phrase; the
        // earlier template wins and only one key is ever set
        let filter = extractor.extract("msa valid in uae governed by uk law");

        assert_eq!(filter.governing_law.as_deref(), Some("United Kingdom"));
        assert_eq!(filter.geography, None);
    }

    #[test]
    fn test_fallback_alias_containment() {
        let extractor = FilterExtractor::new();
        let filter = extractor.extract("any nda for uae entities");

        assert_eq!(filter.geography.as_deref(), Some("United Arab Emirates"));
    }

    #[test]
    fn test_fallback_prefers_longest_alias() {
        let extractor = FilterExtractor::new();
        // Both "uk" and "europe" are contained; "europe" is longer and wins
        // even though "uk" appears first in the question
        let filter = extractor.extract("do we hold agreements for uk and europe");

        assert_eq!(filter.geography.as_deref(), Some("Europe"));
    }

    #[test]
    fn test_fallback_law_keywords_pick_governing_law() {
        let extractor = FilterExtractor::new();
        let filter = extractor.extract("agreements under dubai jurisdiction");

        assert_eq!(filter.governing_law.as_deref(), Some("Dubai"));
    }

    #[test]
    fn test_delaware_question() {
        let extractor = FilterExtractor::new();
        let filter = extractor.extract("Find documents governed by Delaware law");

        assert_eq!(filter.governing_law.as_deref(), Some("Delaware"));
    }
}

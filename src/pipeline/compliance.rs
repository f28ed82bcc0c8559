//! Compliance filtering of generated note text.
//!
//! Two passes over the raw model output: clinical-terminology substitution,
//! then full-name redaction. The redaction is deliberately a
//! two-capitalized-words heuristic, not an NER pass: it over-matches
//! unrelated proper nouns ("New York" becomes "New Y.") and misses single,
//! lowercase, or punctuation-separated names. Callers and tests depend on
//! exactly this behavior; do not swap in a smarter redactor.

use std::sync::LazyLock;

use regex::Regex;

/// Replacement for every barred clinical role or practice term.
const PEER_TERM: &str = "peer support specialist";

/// Clinical terms barred from peer-support documentation. Matched as
/// case-insensitive substrings, longer variants listed first.
static CLINICAL_TERMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("(?i)therapist|therapy|counseling|counselor|psychologist")
        .expect("clinical term pattern is valid")
});

/// Two consecutive capitalized words separated by whitespace.
static FULL_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z][a-z]+)\s+([A-Z][a-z]+)").expect("full name pattern is valid")
});

/// Apply both compliance passes. Total over its input: empty text returns
/// empty text, text with no matches is returned unchanged.
pub fn apply(text: &str) -> String {
    redact_full_names(&substitute_clinical_terms(text))
}

fn substitute_clinical_terms(text: &str) -> String {
    CLINICAL_TERMS.replace_all(text, PEER_TERM).into_owned()
}

/// Reduce "First Last" to "First L." wherever the pattern appears.
fn redact_full_names(text: &str) -> String {
    FULL_NAME
        .replace_all(text, |caps: &regex::Captures<'_>| {
            // [A-Z][a-z]+ guarantees an ASCII first byte in group 2.
            format!("{} {}.", &caps[1], &caps[2][..1])
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_every_clinical_term() {
        for term in ["therapist", "therapy", "counselor", "counseling", "psychologist"] {
            let filtered = apply(&format!("met with the {term} today"));
            assert!(
                !filtered.to_lowercase().contains(term),
                "{term} survived filtering: {filtered}"
            );
            assert!(filtered.contains("peer support specialist"));
        }
    }

    #[test]
    fn substitution_is_case_insensitive() {
        assert_eq!(
            apply("Spoke with the THERAPIST."),
            "Spoke with the peer support specialist."
        );
        assert_eq!(
            apply("Discussed Counseling options."),
            "Discussed peer support specialist options."
        );
    }

    #[test]
    fn substitution_matches_inside_words() {
        // Substring matching is part of the contract, not word boundaries.
        let filtered = apply("referred for psychotherapy");
        assert!(filtered.contains("psychopeer support specialist"));
    }

    #[test]
    fn redacts_full_name_to_initial() {
        let filtered = apply("John Smith met today");
        assert!(filtered.contains("John S."));
        assert!(!filtered.contains("Smith"));
    }

    #[test]
    fn redaction_applies_to_every_occurrence() {
        let filtered = apply("Maria Lopez greeted Maria Lopez");
        assert_eq!(filtered, "Maria L. greeted Maria L.");
    }

    #[test]
    fn redaction_over_matches_proper_nouns() {
        // Known false positive, preserved on purpose.
        assert_eq!(apply("visited New York today"), "visited New Y. today");
    }

    #[test]
    fn single_names_pass_through() {
        assert_eq!(apply("Maria attended the group"), "Maria attended the group");
    }

    #[test]
    fn clean_text_is_unchanged() {
        let text = "the client practiced breathing exercises at the community garden";
        assert_eq!(apply(text), text);
    }

    #[test]
    fn already_redacted_text_is_stable() {
        // "John S." no longer matches the two-word pattern, so a second
        // pass is a no-op.
        let once = apply("John Smith met today");
        assert_eq!(apply(&once), once);
    }

    #[test]
    fn empty_input_returns_empty() {
        assert_eq!(apply(""), "");
    }

    #[test]
    fn substitution_runs_before_redaction() {
        // "Dr. Anna Reyes, therapist" exercises both passes in order.
        let filtered = apply("Anna Reyes, the therapist, led the session");
        assert!(filtered.contains("Anna R."));
        assert!(filtered.contains("peer support specialist"));
        assert!(!filtered.contains("Reyes"));
    }
}

//! Symptom extraction over the lexicon.

use std::collections::BTreeSet;

use crate::lexicon::Lexicon;

/// The matched pattern keys for one query.
///
/// Extraction produces a set: duplicates are impossible and iteration order
/// carries no meaning. Ranking walks the lexicon in table order instead of
/// relying on any order here.
pub type SymptomSet = BTreeSet<&'static str>;

/// Returns the keys of every lexicon pattern that matches `text`.
///
/// Matching is case-insensitive and word-bounded. A pipe pattern is matched
/// when any of its alternatives matches, and the whole key is recorded. An
/// empty result is a valid outcome, not an error.
pub fn extract_symptoms(lexicon: &Lexicon, text: &str) -> SymptomSet {
    lexicon
        .patterns()
        .iter()
        .filter(|pattern| pattern.matches(text))
        .map(|pattern| pattern.key())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_simple_keywords() {
        let lexicon = Lexicon::standard();
        let matched = extract_symptoms(&lexicon, "I have a persistent cough and fever for 3 days");
        assert!(matched.contains("cough"));
        assert!(matched.contains("fever"));
        assert_eq!(matched.len(), 2);
    }

    #[test]
    fn test_extracts_pipe_alternative_as_whole_key() {
        let lexicon = Lexicon::standard();
        let matched = extract_symptoms(&lexicon, "feeling lightheaded since this morning");
        assert!(matched.contains("dizziness|lightheaded"));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let lexicon = Lexicon::standard();
        let matched = extract_symptoms(&lexicon, "SEVERE HEADACHE and Nausea");
        assert!(matched.contains("headache"));
        assert!(matched.contains("nausea"));
    }

    #[test]
    fn test_word_boundary_blocks_substring_hits() {
        let lexicon = Lexicon::standard();
        // "coughing" must not satisfy the "cough" pattern
        let matched = extract_symptoms(&lexicon, "coughing fits all night");
        assert!(!matched.contains("cough"));
    }

    #[test]
    fn test_no_matches_returns_empty_set() {
        let lexicon = Lexicon::standard();
        let matched = extract_symptoms(&lexicon, "hello there, general question");
        assert!(matched.is_empty());
    }

    #[test]
    fn test_duplicate_mentions_collapse_to_one_entry() {
        let lexicon = Lexicon::standard();
        let matched = extract_symptoms(&lexicon, "fever in the morning, fever at night");
        assert_eq!(matched.iter().filter(|k| **k == "fever").count(), 1);
    }

    #[test]
    fn test_multi_word_phrase_matches() {
        let lexicon = Lexicon::standard();
        let matched = extract_symptoms(&lexicon, "sharp chest pain when climbing stairs");
        assert!(matched.contains("chest pain"));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let lexicon = Lexicon::standard();
        let text = "runny nose, sore throat, and feeling tired";
        let first = extract_symptoms(&lexicon, text);
        let second = extract_symptoms(&lexicon, text);
        assert_eq!(first, second);
    }
}

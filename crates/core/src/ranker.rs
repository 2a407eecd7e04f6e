//! Code ranking across matched symptoms, and the suggestion data contract.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::confidence::adjusted_confidence;
use crate::extract::SymptomSet;
use crate::lexicon::Lexicon;

/// Returned suggestion lists never exceed this many entries.
pub const MAX_SUGGESTIONS: usize = 5;

/// Human-readable confidence bucket derived from a numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
    #[serde(rename = "Very Low")]
    VeryLow,
}

impl ConfidenceTier {
    /// Buckets a confidence score: `>= 0.8` High, `>= 0.6` Medium,
    /// `>= 0.4` Low, otherwise Very Low.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::High
        } else if score >= 0.6 {
            Self::Medium
        } else if score >= 0.4 {
            Self::Low
        } else {
            Self::VeryLow
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::VeryLow => "Very Low",
        }
    }

    /// Advisory presentation colour. Cosmetic only, carried for display
    /// layers.
    pub fn colour(&self) -> &'static str {
        match self {
            Self::High => "green",
            Self::Medium => "yellow",
            Self::Low => "orange",
            Self::VeryLow => "red",
        }
    }
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One ranked ICD-10 suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub code: String,
    pub description: String,
    pub confidence: f64,
    pub tier: ConfidenceTier,
    /// Every symptom pattern that proposed this code, in first-seen order.
    pub supporting_symptoms: Vec<String>,
}

impl Suggestion {
    /// Confidence as a whole-number percentage, truncated.
    pub fn percentage(&self) -> u8 {
        (self.confidence * 100.0) as u8
    }
}

/// Ranks candidate codes across every matched symptom.
///
/// Per code, the highest adjusted confidence wins while supporting symptoms
/// accumulate from every pattern that proposed the code, whether or not that
/// appearance supplied the winning confidence. The description is fixed at
/// first sight of the code. The sort is stable and descending, so equal
/// confidences keep first-seen code order; the list is then truncated to
/// [`MAX_SUGGESTIONS`].
pub fn rank_codes(lexicon: &Lexicon, matched: &SymptomSet) -> Vec<Suggestion> {
    struct Entry {
        description: &'static str,
        confidence: f64,
        supporting: Vec<&'static str>,
    }

    let mut order: Vec<&'static str> = Vec::new();
    let mut entries: HashMap<&'static str, Entry> = HashMap::new();

    for pattern in lexicon.patterns() {
        if !matched.contains(pattern.key()) {
            continue;
        }
        for candidate in pattern.candidates() {
            let confidence =
                adjusted_confidence(lexicon, candidate.code, candidate.base_confidence, matched);
            match entries.get_mut(candidate.code) {
                Some(entry) => {
                    if confidence > entry.confidence {
                        entry.confidence = confidence;
                    }
                    if !entry.supporting.contains(&pattern.key()) {
                        entry.supporting.push(pattern.key());
                    }
                }
                None => {
                    order.push(candidate.code);
                    entries.insert(
                        candidate.code,
                        Entry {
                            description: candidate.description,
                            confidence,
                            supporting: vec![pattern.key()],
                        },
                    );
                }
            }
        }
    }

    let mut suggestions: Vec<Suggestion> = order
        .into_iter()
        .filter_map(|code| {
            entries.remove(code).map(|entry| Suggestion {
                code: code.to_owned(),
                description: entry.description.to_owned(),
                confidence: entry.confidence,
                tier: ConfidenceTier::from_score(entry.confidence),
                supporting_symptoms: entry
                    .supporting
                    .iter()
                    .map(|symptom| (*symptom).to_owned())
                    .collect(),
            })
        })
        .collect();

    suggestions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_symptoms;

    fn rank(text: &str) -> Vec<Suggestion> {
        let lexicon = Lexicon::shared();
        let matched = extract_symptoms(lexicon, text);
        rank_codes(lexicon, &matched)
    }

    #[test]
    fn test_empty_set_ranks_to_empty_list() {
        let lexicon = Lexicon::shared();
        let matched = SymptomSet::new();
        assert!(rank_codes(lexicon, &matched).is_empty());
    }

    #[test]
    fn test_single_symptom_orders_by_confidence() {
        let suggestions = rank("a dull headache");
        let codes: Vec<_> = suggestions.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["R51", "G43.909", "G44.1"]);
    }

    #[test]
    fn test_equal_confidences_keep_first_seen_code_order() {
        // R05 (via cough) and R50.9 (via fever) both score 0.9; cough comes
        // first in the lexicon, so R05 must stay ahead after the stable sort.
        let suggestions = rank("cough and fever");
        let codes: Vec<_> = suggestions.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(&codes[..2], &["R05", "R50.9"]);
    }

    #[test]
    fn test_sorted_non_increasing_and_capped_at_five() {
        let suggestions = rank("cough, fever, sore throat, runny nose and wheezing");
        assert!(suggestions.len() <= MAX_SUGGESTIONS);
        for pair in suggestions.windows(2) {
            assert!(
                pair[0].confidence >= pair[1].confidence,
                "suggestions must be sorted by confidence"
            );
        }
    }

    #[test]
    fn test_shared_code_keeps_max_confidence() {
        // J00 appears under cough (0.6), runny nose (0.8) and fever (0.5).
        // The fever+cough modifier lists J00 at 1.2 and applies to every
        // appearance, so the max is the runny-nose path: 0.8 * 1.2 = 0.96.
        let suggestions = rank("fever, cough and a runny nose");
        let j00 = suggestions
            .iter()
            .find(|s| s.code == "J00")
            .expect("J00 suggested");
        assert!((j00.confidence - 0.96).abs() < 1e-9, "got {}", j00.confidence);
    }

    #[test]
    fn test_supporting_symptoms_union_across_patterns() {
        let suggestions = rank("fever, cough and a runny nose");
        let j00 = suggestions
            .iter()
            .find(|s| s.code == "J00")
            .expect("J00 suggested");
        assert_eq!(
            j00.supporting_symptoms,
            vec![
                "cough".to_owned(),
                "runny nose|nasal congestion|stuffy nose".to_owned(),
                "fever".to_owned(),
            ],
            "supporting symptoms accumulate from every contributing pattern"
        );
    }

    #[test]
    fn test_description_fixed_at_first_sight() {
        // J44.1 carries different wording under the dyspnea and wheezing
        // patterns; the first-seen one must win.
        let suggestions = rank("wheezing and shortness of breath");
        let j441 = suggestions
            .iter()
            .find(|s| s.code == "J44.1")
            .expect("J44.1 suggested");
        assert_eq!(
            j441.description,
            "Chronic obstructive pulmonary disease with acute exacerbation"
        );
    }

    #[test]
    fn test_top_suggestion_for_cough_and_fever_is_high_tier() {
        let suggestions = rank("I have a persistent cough and fever for 3 days");
        let top = suggestions.first().expect("suggestions returned");
        assert!(top.code == "R05" || top.code == "R50.9");
        assert_eq!(top.tier, ConfidenceTier::High);
        assert!(top.confidence >= 0.8);
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(ConfidenceTier::from_score(0.95), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_score(0.8), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_score(0.79), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_score(0.6), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_score(0.59), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::from_score(0.4), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::from_score(0.39), ConfidenceTier::VeryLow);
        assert_eq!(ConfidenceTier::from_score(0.0), ConfidenceTier::VeryLow);
    }

    #[test]
    fn test_tier_labels_and_colours() {
        assert_eq!(ConfidenceTier::High.label(), "High");
        assert_eq!(ConfidenceTier::High.colour(), "green");
        assert_eq!(ConfidenceTier::VeryLow.label(), "Very Low");
        assert_eq!(ConfidenceTier::VeryLow.colour(), "red");
    }

    #[test]
    fn test_percentage_truncates() {
        let suggestion = Suggestion {
            code: "J06.9".to_owned(),
            description: "Acute upper respiratory infection, unspecified".to_owned(),
            confidence: 0.65,
            tier: ConfidenceTier::from_score(0.65),
            supporting_symptoms: vec!["cough".to_owned()],
        };
        assert_eq!(suggestion.percentage(), 65);
    }

    #[test]
    fn test_tier_serializes_to_label_text() {
        let json = serde_json::to_string(&ConfidenceTier::VeryLow).unwrap();
        assert_eq!(json, "\"Very Low\"");
        let json = serde_json::to_string(&ConfidenceTier::High).unwrap();
        assert_eq!(json, "\"High\"");
    }
}

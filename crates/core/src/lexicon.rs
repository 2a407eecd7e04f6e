//! Symptom lexicon: the static clinical tables behind the coding engine.
//!
//! The lexicon maps symptom patterns to candidate ICD-10 codes with base
//! confidences, and carries combination modifiers that reweight those
//! confidences when specific symptoms co-occur. The tables are compiled into
//! matchers once, on first use, and are read-only afterwards; every
//! classification call borrows the same [`Lexicon`].
//!
//! A pattern key may contain pipe-separated alternatives
//! (`"sore throat|throat pain"`): the pattern matches when any single
//! alternative matches, and the whole key is what gets recorded as the
//! matched symptom.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::extract::SymptomSet;

/// One ICD-10 code attached to a symptom pattern.
#[derive(Debug, Clone, Copy)]
pub struct CodeCandidate {
    /// ICD-10 code, e.g. `"J06.9"`.
    pub code: &'static str,
    /// Human-readable code description.
    pub description: &'static str,
    /// Confidence assigned when the owning pattern matches in isolation.
    pub base_confidence: f64,
}

/// A symptom pattern: compiled matchers plus the codes it suggests.
#[derive(Debug)]
pub struct SymptomPattern {
    key: &'static str,
    matchers: Vec<Regex>,
    candidates: Vec<CodeCandidate>,
}

impl SymptomPattern {
    /// The pattern key as written in the table, alternatives joined by `|`.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Code candidates attached to this pattern, in table order.
    pub fn candidates(&self) -> &[CodeCandidate] {
        &self.candidates
    }

    /// Returns true when any alternative matches `text` as a whole word or
    /// phrase, case-insensitively.
    pub fn matches(&self, text: &str) -> bool {
        self.matchers.iter().any(|matcher| matcher.is_match(text))
    }

    /// Iterates the alternative phrases of this pattern.
    pub fn alternatives(&self) -> impl Iterator<Item = &'static str> {
        self.key.split('|')
    }
}

/// A co-occurrence rule: when every required symptom is present in the
/// matched set, the listed per-code multipliers apply.
#[derive(Debug)]
pub struct CombinationModifier {
    key: &'static str,
    required: Vec<String>,
    multipliers: BTreeMap<&'static str, f64>,
}

impl CombinationModifier {
    /// The rule key as written in the table, e.g. `"fever+cough"`.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Number of required symptoms. Used as a cheap pre-filter: a rule can
    /// never be satisfied by a smaller matched set.
    pub fn required_len(&self) -> usize {
        self.required.len()
    }

    /// Returns true when every required symptom is present in `matched`.
    ///
    /// Required names are stored space-joined (`"chest pain"`); a matched
    /// pattern satisfies one when any of its pipe alternatives equals the
    /// required name exactly.
    pub fn is_satisfied_by(&self, matched: &SymptomSet) -> bool {
        self.required.iter().all(|required| {
            matched
                .iter()
                .any(|key| key.split('|').any(|alternative| alternative == required))
        })
    }

    /// Multiplier for `code`, if this rule lists one.
    pub fn multiplier_for(&self, code: &str) -> Option<f64> {
        self.multipliers.get(code).copied()
    }
}

/// The complete static rule set: symptom patterns plus combination modifiers.
///
/// Use [`Lexicon::shared`] in production paths so the matchers are compiled
/// only once per process.
#[derive(Debug)]
pub struct Lexicon {
    patterns: Vec<SymptomPattern>,
    modifiers: BTreeMap<&'static str, CombinationModifier>,
}

static STANDARD: LazyLock<Lexicon> = LazyLock::new(Lexicon::standard);

impl Lexicon {
    /// Borrows the shared standard lexicon, compiling it on first use.
    pub fn shared() -> &'static Lexicon {
        &STANDARD
    }

    /// Builds the standard clinical tables.
    pub fn standard() -> Self {
        let patterns = SYMPTOM_TABLE
            .iter()
            .map(|&(key, candidates)| SymptomPattern {
                key,
                matchers: key.split('|').map(compile_phrase).collect(),
                candidates: candidates
                    .iter()
                    .map(|&(code, description, base_confidence)| CodeCandidate {
                        code,
                        description,
                        base_confidence,
                    })
                    .collect(),
            })
            .collect();

        let modifiers = MODIFIER_TABLE
            .iter()
            .map(|&(key, multipliers)| {
                let modifier = CombinationModifier {
                    key,
                    required: key.split('+').map(|part| part.replace('_', " ")).collect(),
                    multipliers: multipliers.iter().copied().collect(),
                };
                (key, modifier)
            })
            .collect();

        Self {
            patterns,
            modifiers,
        }
    }

    /// Symptom patterns in table order.
    pub fn patterns(&self) -> &[SymptomPattern] {
        &self.patterns
    }

    /// Combination modifiers, iterated in lexical order of their keys.
    ///
    /// Multiplier composition is order-sensitive at float precision, so the
    /// iteration order must be stable across runs and platforms; the backing
    /// `BTreeMap` guarantees that.
    pub fn modifiers(&self) -> impl Iterator<Item = &CombinationModifier> {
        self.modifiers.values()
    }

    /// Looks up one pattern by its full key.
    pub fn pattern(&self, key: &str) -> Option<&SymptomPattern> {
        self.patterns.iter().find(|pattern| pattern.key == key)
    }
}

/// Compiles one alternative phrase into a case-insensitive, word-bounded
/// matcher.
fn compile_phrase(phrase: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(phrase.trim())))
        .expect("lexicon phrases compile to valid regexes")
}

/// Symptom pattern table: pattern key to `(code, description, base
/// confidence)` candidates. Declaration order fixes the ranker's first-seen
/// code order.
const SYMPTOM_TABLE: &[(&str, &[(&str, &str, f64)])] = &[
    // Respiratory
    (
        "cough",
        &[
            ("R05", "Cough", 0.9),
            ("J00", "Acute nasopharyngitis [common cold]", 0.6),
            ("J06.9", "Acute upper respiratory infection, unspecified", 0.5),
        ],
    ),
    (
        "shortness of breath|difficulty breathing|dyspnea",
        &[
            ("R06.02", "Shortness of breath", 0.95),
            (
                "J44.1",
                "Chronic obstructive pulmonary disease with acute exacerbation",
                0.4,
            ),
            ("I50.9", "Heart failure, unspecified", 0.3),
        ],
    ),
    (
        "sore throat|throat pain",
        &[
            ("J02.9", "Acute pharyngitis, unspecified", 0.85),
            ("J03.90", "Acute tonsillitis, unspecified", 0.7),
            ("J06.9", "Acute upper respiratory infection, unspecified", 0.6),
        ],
    ),
    (
        "runny nose|nasal congestion|stuffy nose",
        &[
            ("J00", "Acute nasopharyngitis [common cold]", 0.8),
            ("J30.9", "Allergic rhinitis, unspecified", 0.6),
            ("J06.9", "Acute upper respiratory infection, unspecified", 0.5),
        ],
    ),
    (
        "wheezing",
        &[
            ("R06.2", "Wheezing", 0.9),
            ("J45.9", "Asthma, unspecified", 0.7),
            ("J44.1", "COPD with acute exacerbation", 0.4),
        ],
    ),
    // Cardiovascular
    (
        "chest pain",
        &[
            ("R07.89", "Other chest pain", 0.8),
            ("I20.9", "Angina pectoris, unspecified", 0.4),
            ("R07.81", "Chest pain on breathing", 0.6),
        ],
    ),
    (
        "heart palpitations|racing heart|irregular heartbeat",
        &[
            ("R00.2", "Palpitations", 0.85),
            ("I47.1", "Supraventricular tachycardia", 0.4),
            ("R00.1", "Bradycardia, unspecified", 0.3),
        ],
    ),
    // Neurological
    (
        "headache",
        &[
            ("R51", "Headache", 0.9),
            (
                "G43.909",
                "Migraine, unspecified, not intractable, without status migrainosus",
                0.4,
            ),
            ("G44.1", "Vascular headache, not elsewhere classified", 0.3),
        ],
    ),
    (
        "dizziness|lightheaded",
        &[
            ("R42", "Dizziness and giddiness", 0.9),
            (
                "H81.10",
                "Benign paroxysmal positional vertigo, unspecified ear",
                0.4,
            ),
            ("R55", "Syncope and collapse", 0.3),
        ],
    ),
    (
        "nausea",
        &[
            ("R11.10", "Vomiting, unspecified", 0.8),
            ("R11.0", "Nausea", 0.9),
            ("K59.00", "Constipation, unspecified", 0.2),
        ],
    ),
    // Gastrointestinal
    (
        "abdominal pain|stomach pain|belly pain",
        &[
            ("R10.9", "Unspecified abdominal pain", 0.85),
            ("K59.00", "Constipation, unspecified", 0.3),
            (
                "K21.9",
                "Gastro-esophageal reflux disease without esophagitis",
                0.4,
            ),
        ],
    ),
    (
        "diarrhea",
        &[
            ("K59.1", "Diarrhea, unspecified", 0.9),
            (
                "A09",
                "Infectious gastroenteritis and colitis, unspecified",
                0.6,
            ),
            ("K58.9", "Irritable bowel syndrome, unspecified", 0.4),
        ],
    ),
    (
        "constipation",
        &[
            ("K59.00", "Constipation, unspecified", 0.9),
            ("K59.09", "Other constipation", 0.7),
        ],
    ),
    // General
    (
        "fever",
        &[
            ("R50.9", "Fever, unspecified", 0.9),
            ("A49.9", "Bacterial infection, unspecified", 0.4),
            ("J00", "Acute nasopharyngitis [common cold]", 0.5),
        ],
    ),
    (
        "fatigue|tired|weakness",
        &[
            ("R53.1", "Weakness", 0.8),
            ("R53.83", "Fatigue", 0.9),
            ("Z73.0", "Burn-out", 0.3),
        ],
    ),
    (
        "joint pain|arthralgia",
        &[
            ("M25.50", "Pain in unspecified joint", 0.8),
            ("M79.3", "Panniculitis, unspecified", 0.3),
            ("M25.9", "Joint disorder, unspecified", 0.6),
        ],
    ),
    (
        "back pain",
        &[
            ("M54.9", "Dorsalgia, unspecified", 0.85),
            ("M54.5", "Low back pain", 0.8),
            ("M25.50", "Pain in unspecified joint", 0.4),
        ],
    ),
    // Dermatological
    (
        "rash|skin rash",
        &[
            ("R21", "Rash and other nonspecific skin eruption", 0.9),
            ("L30.9", "Dermatitis, unspecified", 0.6),
            ("L50.9", "Urticaria, unspecified", 0.4),
        ],
    ),
    (
        "itching|pruritus",
        &[
            ("L29.9", "Pruritus, unspecified", 0.9),
            ("L30.9", "Dermatitis, unspecified", 0.5),
        ],
    ),
];

/// Combination modifier table: `symptom+symptom` key (underscores stand for
/// spaces within one symptom name) to per-code multipliers.
const MODIFIER_TABLE: &[(&str, &[(&str, f64)])] = &[
    (
        "fever+cough",
        &[("J00", 1.2), ("J06.9", 1.3), ("A49.9", 0.8)],
    ),
    (
        "chest_pain+shortness_of_breath",
        &[("I20.9", 1.5), ("R06.02", 1.2), ("R07.89", 1.1)],
    ),
    ("headache+nausea", &[("G43.909", 1.4), ("R51", 1.1)]),
    ("cough+sore_throat+runny_nose", &[("J00", 1.4), ("J06.9", 1.3)]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_counts() {
        let lexicon = Lexicon::standard();
        assert_eq!(lexicon.patterns().len(), 19);
        assert_eq!(lexicon.modifiers().count(), 4);
    }

    #[test]
    fn test_pattern_lookup_by_key() {
        let lexicon = Lexicon::standard();
        let cough = lexicon.pattern("cough").expect("cough pattern exists");
        assert_eq!(cough.candidates().len(), 3);
        assert_eq!(cough.candidates()[0].code, "R05");
        assert_eq!(cough.candidates()[0].base_confidence, 0.9);
    }

    #[test]
    fn test_pattern_matches_case_insensitively() {
        let lexicon = Lexicon::standard();
        let fever = lexicon.pattern("fever").expect("fever pattern exists");
        assert!(fever.matches("I have a FEVER today"));
        assert!(fever.matches("fever."));
    }

    #[test]
    fn test_pattern_requires_word_boundary() {
        let lexicon = Lexicon::standard();
        let cough = lexicon.pattern("cough").expect("cough pattern exists");
        assert!(!cough.matches("I was coughing all night"));
        assert!(cough.matches("a dry cough at night"));
    }

    #[test]
    fn test_alternatives_split_on_pipe() {
        let lexicon = Lexicon::standard();
        let throat = lexicon
            .pattern("sore throat|throat pain")
            .expect("throat pattern exists");
        let alternatives: Vec<_> = throat.alternatives().collect();
        assert_eq!(alternatives, vec!["sore throat", "throat pain"]);
        assert!(throat.matches("my throat pain is worse"));
        assert!(throat.matches("I have a sore throat"));
    }

    #[test]
    fn test_modifiers_iterate_in_lexical_key_order() {
        let lexicon = Lexicon::standard();
        let keys: Vec<_> = lexicon.modifiers().map(|m| m.key()).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted, "modifier iteration must be lexical");
    }

    #[test]
    fn test_modifier_satisfaction_uses_exact_alternatives() {
        let lexicon = Lexicon::standard();
        let modifier = lexicon
            .modifiers()
            .find(|m| m.key() == "chest_pain+shortness_of_breath")
            .expect("modifier exists");

        let mut matched = SymptomSet::new();
        matched.insert("chest pain");
        matched.insert("shortness of breath|difficulty breathing|dyspnea");
        assert!(modifier.is_satisfied_by(&matched));

        let mut partial = SymptomSet::new();
        partial.insert("chest pain");
        assert!(!modifier.is_satisfied_by(&partial));
    }

    #[test]
    fn test_modifier_multiplier_lookup() {
        let lexicon = Lexicon::standard();
        let modifier = lexicon
            .modifiers()
            .find(|m| m.key() == "fever+cough")
            .expect("modifier exists");
        assert_eq!(modifier.multiplier_for("J06.9"), Some(1.3));
        assert_eq!(modifier.multiplier_for("A49.9"), Some(0.8));
        assert_eq!(modifier.multiplier_for("R05"), None);
    }
}

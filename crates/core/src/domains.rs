//! Clinical-domain tagging.

use serde::{Deserialize, Serialize};

/// Clinical domains recognised by the tagger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedicalDomain {
    Cardiology,
    Pulmonology,
    Gastroenterology,
    Neurology,
    Dermatology,
    Orthopedics,
    Psychiatry,
    InfectiousDisease,
    /// Fallback when no domain keyword matches.
    GeneralMedicine,
}

impl MedicalDomain {
    /// Wire/display name of the domain.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cardiology => "cardiology",
            Self::Pulmonology => "pulmonology",
            Self::Gastroenterology => "gastroenterology",
            Self::Neurology => "neurology",
            Self::Dermatology => "dermatology",
            Self::Orthopedics => "orthopedics",
            Self::Psychiatry => "psychiatry",
            Self::InfectiousDisease => "infectious_disease",
            Self::GeneralMedicine => "general_medicine",
        }
    }
}

impl std::fmt::Display for MedicalDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Domain keyword table. Declaration order fixes the output order of
/// [`classify_domains`]; the order is stable but carries no clinical
/// meaning.
const DOMAIN_KEYWORDS: &[(MedicalDomain, &[&str])] = &[
    (
        MedicalDomain::Cardiology,
        &["heart", "chest", "cardiac", "blood pressure", "palpitations"],
    ),
    (
        MedicalDomain::Pulmonology,
        &["lung", "breathing", "cough", "respiratory", "chest pain"],
    ),
    (
        MedicalDomain::Gastroenterology,
        &["stomach", "digestive", "nausea", "vomiting", "diarrhea"],
    ),
    (
        MedicalDomain::Neurology,
        &["headache", "dizzy", "numbness", "weakness", "seizure"],
    ),
    (
        MedicalDomain::Dermatology,
        &["skin", "rash", "itch", "mole", "burn"],
    ),
    (
        MedicalDomain::Orthopedics,
        &["bone", "joint", "muscle", "back pain", "fracture"],
    ),
    (
        MedicalDomain::Psychiatry,
        &["depression", "anxiety", "mental health", "stress"],
    ),
    (
        MedicalDomain::InfectiousDisease,
        &["fever", "infection", "virus", "bacteria", "flu"],
    ),
];

/// Tags `query` with every domain whose keyword set has a substring hit.
///
/// Domains are tested independently, so a query can carry several tags.
/// When nothing matches the single fallback tag
/// [`MedicalDomain::GeneralMedicine`] is returned.
pub fn classify_domains(query: &str) -> Vec<MedicalDomain> {
    let query_lower = query.to_lowercase();
    let mut domains: Vec<MedicalDomain> = DOMAIN_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|keyword| query_lower.contains(keyword)))
        .map(|&(domain, _)| domain)
        .collect();

    if domains.is_empty() {
        domains.push(MedicalDomain::GeneralMedicine);
    }
    domains
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_domain_hit() {
        assert_eq!(
            classify_domains("itchy skin on my arm"),
            vec![MedicalDomain::Dermatology]
        );
    }

    #[test]
    fn test_multiple_domains_in_table_order() {
        let domains = classify_domains("persistent cough and fever");
        assert_eq!(
            domains,
            vec![MedicalDomain::Pulmonology, MedicalDomain::InfectiousDisease]
        );
    }

    #[test]
    fn test_chest_pain_tags_both_cardiology_and_pulmonology() {
        let domains = classify_domains("chest pain when breathing");
        assert!(domains.contains(&MedicalDomain::Cardiology));
        assert!(domains.contains(&MedicalDomain::Pulmonology));
    }

    #[test]
    fn test_fallback_domain_when_nothing_matches() {
        assert_eq!(
            classify_domains("requesting a repeat prescription"),
            vec![MedicalDomain::GeneralMedicine]
        );
    }

    #[test]
    fn test_substring_matching_catches_inflected_forms() {
        // "dizzy" matches inside "dizziness"
        assert_eq!(
            classify_domains("sudden dizziness"),
            vec![MedicalDomain::Neurology]
        );
    }

    #[test]
    fn test_classification_is_case_insensitive_and_idempotent() {
        let first = classify_domains("ANXIETY under STRESS");
        let second = classify_domains("ANXIETY under STRESS");
        assert_eq!(first, vec![MedicalDomain::Psychiatry]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_wire_names_are_snake_case() {
        assert_eq!(MedicalDomain::InfectiousDisease.as_str(), "infectious_disease");
        assert_eq!(
            serde_json::to_string(&MedicalDomain::InfectiousDisease).unwrap(),
            "\"infectious_disease\""
        );
        assert_eq!(
            serde_json::to_string(&MedicalDomain::GeneralMedicine).unwrap(),
            "\"general_medicine\""
        );
    }
}

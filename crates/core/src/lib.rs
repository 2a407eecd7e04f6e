//! Rule-based prescreening: symptom extraction, ICD-10 code suggestion,
//! urgency classification and domain tagging.
//!
//! The crate is organised around three entry points:
//!
//! * [`Icd10Mapper`] turns free-text symptom descriptions into ranked
//!   ICD-10 code suggestions.
//! * [`PrescreeningEngine`] layers urgency and domain classification,
//!   recommendations and a care pathway on top of the mapper.
//! * The free functions [`generate_icd10_report`] and
//!   [`analyze_urgency_and_domain`] cover the common one-shot cases.
//!
//! All classification is deterministic and driven by the static tables in
//! [`lexicon`], [`urgency`] and [`domains`]. No network or model calls
//! happen here.

pub mod confidence;
pub mod context;
pub mod domains;
pub mod engine;
pub mod error;
pub mod extract;
pub mod lexicon;
pub mod mapper;
pub mod ranker;
pub mod urgency;

pub use context::PatientContext;
pub use domains::{classify_domains, MedicalDomain};
pub use engine::{CarePathway, PrescreeningEngine, TriageAssessment, UrgencyAnalysis};
pub use error::{InputError, TriageResult};
pub use extract::{extract_symptoms, SymptomSet};
pub use lexicon::Lexicon;
pub use mapper::{Icd10Mapper, Icd10Report, DISCLAIMER};
pub use ranker::{ConfidenceTier, Suggestion, MAX_SUGGESTIONS};
pub use urgency::{classify_urgency, triage_recommendations, UrgencyLevel};

/// Generates an ICD-10 suggestion report for one symptom description.
///
/// Convenience wrapper over [`Icd10Mapper::generate_icd10_report`] using the
/// shared standard lexicon.
///
/// # Errors
///
/// Returns [`InputError::EmptyText`] when `text` is empty or contains only
/// whitespace.
pub fn generate_icd10_report(
    text: &str,
    patient_context: Option<&PatientContext>,
) -> TriageResult<Icd10Report> {
    Icd10Mapper::new().generate_icd10_report(text, patient_context)
}

/// Classifies urgency and medical domains for one query.
///
/// Convenience wrapper over [`PrescreeningEngine::analyze_urgency_and_domain`].
///
/// # Errors
///
/// Returns [`InputError::EmptyText`] when `query` is empty or contains only
/// whitespace.
pub fn analyze_urgency_and_domain(
    query: &str,
    response_text: Option<&str>,
) -> TriageResult<UrgencyAnalysis> {
    PrescreeningEngine::new().analyze_urgency_and_domain(query, response_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_icd10_report_end_to_end() {
        let report =
            generate_icd10_report("fever and cough", None).expect("report generated");
        assert!(report.has_suggestions);
        let j069 = report
            .suggestions
            .iter()
            .find(|s| s.code == "J06.9")
            .expect("J06.9 suggested for fever and cough");
        assert!((j069.confidence - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_analyze_urgency_and_domain_end_to_end() {
        let analysis = analyze_urgency_and_domain("I have a persistent cough and fever", None)
            .expect("analysis returned");
        assert_eq!(analysis.urgency_level, UrgencyLevel::Moderate);
        assert!(!analysis.medical_domains.is_empty());
    }

    #[test]
    fn test_free_functions_reject_empty_input() {
        assert!(matches!(
            generate_icd10_report("   ", None),
            Err(InputError::EmptyText)
        ));
        assert!(matches!(
            analyze_urgency_and_domain("", None),
            Err(InputError::EmptyText)
        ));
    }
}

//! Query assessment: classification, recommendations and care pathway.

use serde::{Deserialize, Serialize};

use crate::context::PatientContext;
use crate::domains::{classify_domains, MedicalDomain};
use crate::error::{InputError, TriageResult};
use crate::mapper::Icd10Mapper;
use crate::ranker::Suggestion;
use crate::urgency::{classify_urgency, triage_recommendations, UrgencyLevel};

/// How many code suggestions are embedded in a full assessment.
const EMBEDDED_SUGGESTIONS: usize = 3;

/// Urgency plus domain tags for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrgencyAnalysis {
    pub urgency_level: UrgencyLevel,
    pub medical_domains: Vec<MedicalDomain>,
}

/// Which care settings fit an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarePathway {
    pub primary_care: bool,
    pub urgent_care: bool,
    pub emergency_care: bool,
    pub specialist_referral: bool,
}

/// Full structured assessment of one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageAssessment {
    pub urgency_level: UrgencyLevel,
    pub medical_domains: Vec<MedicalDomain>,
    pub recommendations: Vec<String>,
    pub follow_up_questions: Vec<String>,
    pub risk_factors: Vec<String>,
    pub care_pathway: CarePathway,
    pub next_steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icd10_suggestions: Option<Vec<Suggestion>>,
    pub has_icd10: bool,
}

/// Combines the classifiers and the mapper into one assessment pass.
#[derive(Clone, Copy, Default)]
pub struct PrescreeningEngine {
    mapper: Icd10Mapper,
}

impl PrescreeningEngine {
    /// Creates an engine over the shared standard tables.
    pub fn new() -> Self {
        Self {
            mapper: Icd10Mapper::new(),
        }
    }

    /// Classifies urgency and clinical domains only.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::EmptyText`] when `query` is empty or contains
    /// only whitespace.
    pub fn analyze_urgency_and_domain(
        &self,
        query: &str,
        response_text: Option<&str>,
    ) -> TriageResult<UrgencyAnalysis> {
        if query.trim().is_empty() {
            return Err(InputError::EmptyText);
        }
        Ok(UrgencyAnalysis {
            urgency_level: classify_urgency(query, response_text),
            medical_domains: classify_domains(query),
        })
    }

    /// Runs the full assessment: classification, recommendations, follow-up
    /// questions, risk factors, care pathway, next steps and embedded code
    /// suggestions.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::EmptyText`] when `query` is empty or contains
    /// only whitespace.
    pub fn analyze_query(
        &self,
        query: &str,
        patient: Option<&PatientContext>,
        response_text: Option<&str>,
    ) -> TriageResult<TriageAssessment> {
        let UrgencyAnalysis {
            urgency_level,
            medical_domains,
        } = self.analyze_urgency_and_domain(query, response_text)?;

        let mut suggestions = self.mapper.map_symptoms(query)?;
        suggestions.truncate(EMBEDDED_SUGGESTIONS);
        let has_icd10 = !suggestions.is_empty();
        let icd10_suggestions = has_icd10.then_some(suggestions);

        tracing::info!(
            urgency = %urgency_level,
            domains = ?medical_domains,
            has_icd10,
            "query assessed"
        );

        Ok(TriageAssessment {
            recommendations: triage_recommendations(urgency_level)
                .iter()
                .map(|item| (*item).to_owned())
                .collect(),
            follow_up_questions: follow_up_questions(&medical_domains),
            risk_factors: risk_factors(patient),
            care_pathway: care_pathway(urgency_level, &medical_domains),
            next_steps: next_steps(urgency_level)
                .iter()
                .map(|item| (*item).to_owned())
                .collect(),
            urgency_level,
            medical_domains,
            icd10_suggestions,
            has_icd10,
        })
    }
}

/// General intake questions used when no domain-specific bank applies.
const GENERAL_QUESTIONS: &[&str] = &[
    "When did these symptoms first start?",
    "On a scale of 1-10, how would you rate the severity?",
    "Does anything make the symptoms better or worse?",
    "Have you taken any medications for these symptoms?",
];

/// Picks at most three follow-up questions, preferring domain-specific ones.
fn follow_up_questions(domains: &[MedicalDomain]) -> Vec<String> {
    let mut questions: Vec<&str> = Vec::new();

    if domains.contains(&MedicalDomain::Cardiology) {
        questions.extend([
            "Do you experience the chest pain during physical activity?",
            "Have you had any family history of heart disease?",
        ]);
    }
    if domains.contains(&MedicalDomain::Pulmonology) {
        questions.extend([
            "Are you experiencing shortness of breath at rest or with activity?",
            "Do you have a history of smoking or lung conditions?",
        ]);
    }
    if domains.contains(&MedicalDomain::Gastroenterology) {
        questions.extend([
            "How long have you been experiencing digestive symptoms?",
            "Have you made any recent changes to your diet?",
        ]);
    }

    if questions.is_empty() {
        questions.extend(GENERAL_QUESTIONS.iter().take(2).copied());
    }

    questions.truncate(3);
    questions.into_iter().map(str::to_owned).collect()
}

/// Flags context-driven risk factors: age bands and history keywords.
fn risk_factors(patient: Option<&PatientContext>) -> Vec<String> {
    let context = match patient {
        Some(context) => context,
        None => return Vec::new(),
    };

    let mut factors: Vec<String> = Vec::new();

    if let Some(age) = context.age {
        if age > 65 {
            factors.push("Advanced age (increased risk for various conditions)".to_owned());
        } else if age < 18 {
            factors.push("Pediatric patient (specialized care considerations)".to_owned());
        }
    }

    if let Some(history) = context.medical_history.as_deref() {
        let history = history.to_lowercase();
        if history.contains("diabetes") {
            factors.push("Diabetes (affects healing and infection risk)".to_owned());
        }
        if history.contains("heart") || history.contains("cardiac") {
            factors.push("Heart disease history (cardiovascular risk factors)".to_owned());
        }
        if history.contains("hypertension") || history.contains("blood pressure") {
            factors.push("Hypertension (cardiovascular complications)".to_owned());
        }
    }

    factors
}

/// Derives the care-setting flags from urgency and tagged domains.
fn care_pathway(urgency: UrgencyLevel, domains: &[MedicalDomain]) -> CarePathway {
    CarePathway {
        primary_care: matches!(urgency, UrgencyLevel::Low | UrgencyLevel::Moderate),
        urgent_care: urgency == UrgencyLevel::Urgent,
        emergency_care: urgency == UrgencyLevel::Immediate,
        specialist_referral: domains.len() > 1
            || domains
                .iter()
                .any(|domain| matches!(domain, MedicalDomain::Cardiology | MedicalDomain::Neurology)),
    }
}

/// Fixed next-step list per urgency level.
fn next_steps(urgency: UrgencyLevel) -> &'static [&'static str] {
    match urgency {
        UrgencyLevel::Immediate => &[
            "Call 911 or go to nearest emergency room immediately",
            "Bring list of current medications and medical history",
            "Have emergency contact information ready",
        ],
        UrgencyLevel::Urgent => &[
            "Contact healthcare provider or urgent care within 24 hours",
            "Document symptoms and when they started",
            "Prepare medical history and medication list",
        ],
        UrgencyLevel::Moderate | UrgencyLevel::Low => &[
            "Monitor symptoms and document changes",
            "Schedule appointment with primary care provider",
            "Consider lifestyle modifications if applicable",
        ],
    }
}

//! ICD-10 report generation: the coding entry point.

use serde::{Deserialize, Serialize};

use crate::context::PatientContext;
use crate::error::{InputError, TriageResult};
use crate::extract::{extract_symptoms, SymptomSet};
use crate::lexicon::Lexicon;
use crate::ranker::{rank_codes, Suggestion};

/// Disclaimer attached to every generated coding report.
pub const DISCLAIMER: &str = "IMPORTANT: These ICD-10 codes are AI-generated suggestions only. \
     Professional medical review and validation required for clinical use, \
     billing, or diagnostic purposes.";

/// Outcome of mapping a free-text symptom description to ICD-10 codes.
///
/// `has_suggestions == false` with an empty list is the structured "nothing
/// matched" outcome, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Icd10Report {
    pub has_suggestions: bool,
    pub suggestions: Vec<Suggestion>,
    pub disclaimer: String,
    pub total_codes: usize,
}

/// Rule-based symptom-to-code mapper over the shared lexicon.
#[derive(Debug, Clone, Copy)]
pub struct Icd10Mapper {
    lexicon: &'static Lexicon,
}

impl Default for Icd10Mapper {
    fn default() -> Self {
        Self::new()
    }
}

impl Icd10Mapper {
    /// Creates a mapper over the shared standard lexicon.
    pub fn new() -> Self {
        Self {
            lexicon: Lexicon::shared(),
        }
    }

    /// Extracts the matched symptom set for `text`.
    pub fn extract_symptoms(&self, text: &str) -> SymptomSet {
        extract_symptoms(self.lexicon, text)
    }

    /// Maps symptoms in `text` to ranked code suggestions.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::EmptyText`] when `text` is empty or contains
    /// only whitespace.
    pub fn map_symptoms(&self, text: &str) -> TriageResult<Vec<Suggestion>> {
        if text.trim().is_empty() {
            return Err(InputError::EmptyText);
        }

        let matched = self.extract_symptoms(text);
        if matched.is_empty() {
            tracing::debug!("no lexicon patterns matched");
            return Ok(Vec::new());
        }

        tracing::debug!(symptoms = ?matched, "mapping matched symptoms to codes");
        Ok(rank_codes(self.lexicon, &matched))
    }

    /// Generates the full coding report for `text`.
    ///
    /// Patient context is accepted for interface parity with the assessment
    /// entry points; the coding rules themselves do not consult it.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::EmptyText`] when `text` is empty or contains
    /// only whitespace.
    pub fn generate_icd10_report(
        &self,
        text: &str,
        patient: Option<&PatientContext>,
    ) -> TriageResult<Icd10Report> {
        if let Some(context) = patient {
            tracing::debug!(age = ?context.age, "patient context supplied with coding request");
        }

        let suggestions = self.map_symptoms(text)?;
        Ok(Icd10Report {
            has_suggestions: !suggestions.is_empty(),
            total_codes: suggestions.len(),
            suggestions,
            disclaimer: DISCLAIMER.to_owned(),
        })
    }
}

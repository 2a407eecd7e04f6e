//! Patient context accompanying a query.

use serde::{Deserialize, Serialize};

/// Optional demographic and history details supplied with a query.
///
/// Every field is optional; risk-factor assessment and report assembly use
/// whatever is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medications: Option<String>,
}

impl PatientContext {
    /// Returns true when no field is populated.
    pub fn is_empty(&self) -> bool {
        self.patient_id.is_none()
            && self.name.is_none()
            && self.age.is_none()
            && self.sex.is_none()
            && self.medical_history.is_none()
            && self.medications.is_none()
    }

    /// Compact one-line rendering of the clinical fields, e.g.
    /// `"Age: 45; Sex: female; Medical history: asthma"`.
    ///
    /// Returns `None` when none of the clinical fields are set. Identity
    /// fields (`patient_id`, `name`) are deliberately left out; prompts and
    /// report bodies carry clinical context only.
    pub fn summary_line(&self) -> Option<String> {
        let mut parts: Vec<String> = Vec::new();
        if let Some(age) = self.age {
            parts.push(format!("Age: {}", age));
        }
        if let Some(sex) = self.sex.as_deref() {
            parts.push(format!("Sex: {}", sex));
        }
        if let Some(history) = self.medical_history.as_deref() {
            parts.push(format!("Medical history: {}", history));
        }
        if let Some(medications) = self.medications.as_deref() {
            parts.push(format!("Current medications: {}", medications));
        }
        if parts.is_empty() {
            return None;
        }
        Some(parts.join("; "))
    }
}

//! Plain-text report assembly for healthcare provider handoff.

use chrono::{DateTime, Utc};
use prescreen_core::{Icd10Mapper, UrgencyLevel, DISCLAIMER};
use serde::{Deserialize, Serialize};

use crate::store::ReportPayload;
use crate::truncated;

/// Horizontal rule used between report sections.
const RULE: &str = "----------------------------------------------------------------";

/// How many conversation interactions the consultation summary lists.
const SUMMARY_INTERACTIONS: usize = 5;

/// How many action items the recommendations section lists.
const MAX_ACTION_ITEMS: usize = 5;

/// How many recommendations the storage payload carries.
const MAX_STORED_RECOMMENDATIONS: usize = 10;

/// One exchange from a prescreening conversation.
///
/// Carries the patient's query together with the urgency level and
/// recommendations that were produced in response to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency_level: Option<UrgencyLevel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
}

impl ConversationEntry {
    /// Creates an entry holding only the patient's query.
    pub fn query_only(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            urgency_level: None,
            recommendations: Vec::new(),
        }
    }
}

/// Generation metadata attached to every assembled report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// UTC timestamp of assembly
    pub generated_at: DateTime<Utc>,

    /// Human-quotable reference in the form `RPT-YYYYMMDD-HHMMSS`
    pub reference: String,
}

/// A fully assembled prescreening report, one string per section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssembledReport {
    pub header: String,
    pub patient_info: String,
    pub consultation_summary: String,
    pub icd10_analysis: String,
    pub recommendations: String,
    pub footer: String,
    pub metadata: ReportMetadata,
}

impl AssembledReport {
    /// Renders the report as a single plain-text document.
    pub fn to_text(&self) -> String {
        format!(
            "{}\n\n{}\n\n{}\n\n{}\n\n{}\n\n{}\n",
            self.header,
            self.patient_info,
            self.consultation_summary,
            self.icd10_analysis,
            self.recommendations,
            self.footer,
        )
    }
}

/// Assembles provider-facing reports from conversation transcripts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportAssembler {
    mapper: Icd10Mapper,
}

impl ReportAssembler {
    /// Creates an assembler over the shared standard lexicon.
    pub fn new() -> Self {
        Self {
            mapper: Icd10Mapper::new(),
        }
    }

    /// Assembles a report from patient context, the conversation so far and
    /// the accumulated symptom text.
    pub fn assemble(
        &self,
        patient: Option<&prescreen_core::PatientContext>,
        history: &[ConversationEntry],
        symptoms_text: &str,
    ) -> AssembledReport {
        let generated_at = Utc::now();
        let reference = format!("RPT-{}", generated_at.format("%Y%m%d-%H%M%S"));

        tracing::info!(%reference, interactions = history.len(), "assembling report");

        AssembledReport {
            header: header(generated_at),
            patient_info: patient_section(patient),
            consultation_summary: consultation_section(history),
            icd10_analysis: self.icd10_section(symptoms_text),
            recommendations: recommendations_section(history),
            footer: footer(),
            metadata: ReportMetadata {
                generated_at,
                reference,
            },
        }
    }

    /// Builds the storage payload for an assembled report.
    pub fn payload(
        &self,
        report: &AssembledReport,
        history: &[ConversationEntry],
        symptoms_text: &str,
    ) -> ReportPayload {
        let summary = match history.first() {
            Some(entry) => truncated(&entry.query, 200),
            None => "No conversation recorded".to_owned(),
        };

        let icd10_analysis = if symptoms_text.trim().is_empty() {
            None
        } else {
            self.mapper.generate_icd10_report(symptoms_text, None).ok()
        };

        let mut recommendations = unique_recommendations(history);
        recommendations.truncate(MAX_STORED_RECOMMENDATIONS);

        ReportPayload {
            summary,
            icd10_analysis,
            conversation_count: history.len(),
            symptoms_text: symptoms_text.to_owned(),
            recommendations,
            generated_report: report.to_text(),
        }
    }

    fn icd10_section(&self, symptoms_text: &str) -> String {
        let heading = format!("ICD-10 CODE ANALYSIS:\n{RULE}");

        let report = match self.mapper.generate_icd10_report(symptoms_text, None) {
            Ok(report) => report,
            Err(_) => return format!("{heading}\nNo ICD-10 analysis available."),
        };

        if !report.has_suggestions {
            return format!(
                "{heading}\nNo specific ICD-10 codes identified from symptom presentation."
            );
        }

        let mut section = heading;
        if let Some(primary) = report.suggestions.first() {
            section.push_str(&format!(
                "\nPrimary Diagnosis:\n  {} - {}\n  Confidence: {} ({}%)",
                primary.code,
                primary.description,
                primary.tier.label(),
                primary.percentage(),
            ));
        }

        if report.suggestions.len() > 1 {
            section.push_str("\n\nSecondary Considerations:");
            for suggestion in report.suggestions.iter().skip(1).take(2) {
                section.push_str(&format!(
                    "\n  {} - {}\n  Confidence: {} ({}%)",
                    suggestion.code,
                    suggestion.description,
                    suggestion.tier.label(),
                    suggestion.percentage(),
                ));
            }
        }

        section.push_str(&format!(
            "\n\nClinical Note:\n  {}",
            truncated(DISCLAIMER, 120)
        ));
        section
    }
}

fn header(generated_at: DateTime<Utc>) -> String {
    format!(
        "{RULE}\n                 MEDICAL PRESCREENING REPORT\n\n  Generated: {}\n  System: Medical Prescreening Assistant\n{RULE}",
        generated_at.format("%B %d, %Y at %I:%M %p UTC"),
    )
}

fn patient_section(patient: Option<&prescreen_core::PatientContext>) -> String {
    let age = patient
        .and_then(|p| p.age)
        .map(|age| age.to_string())
        .unwrap_or_else(|| "Not specified".to_owned());
    let sex = patient
        .and_then(|p| p.sex.clone())
        .unwrap_or_else(|| "Not specified".to_owned());
    let history = patient
        .and_then(|p| p.medical_history.clone())
        .unwrap_or_else(|| "None reported".to_owned());
    let medications = patient
        .and_then(|p| p.medications.clone())
        .unwrap_or_else(|| "None reported".to_owned());

    format!(
        "PATIENT INFORMATION:\n{RULE}\nAge: {age}\nSex: {sex}\nMedical History: {history}\nCurrent Medications: {medications}"
    )
}

fn consultation_section(history: &[ConversationEntry]) -> String {
    let first = match history.first() {
        Some(entry) => entry,
        None => return "No conversation recorded.".to_owned(),
    };

    let mut section = format!(
        "CONSULTATION SUMMARY:\n{RULE}\nChief Complaint: {}\n\nSymptoms Discussed: ({} interactions)",
        truncated(&first.query, 100),
        history.len(),
    );

    for (position, entry) in history.iter().take(SUMMARY_INTERACTIONS).enumerate() {
        let query = entry.query.trim();
        if !query.is_empty() {
            section.push_str(&format!(
                "\n  {}. \"{}\"",
                position + 1,
                truncated(query, 80)
            ));
        }
    }

    if history.len() > SUMMARY_INTERACTIONS {
        section.push_str(&format!(
            "\n  ... and {} more interactions",
            history.len() - SUMMARY_INTERACTIONS
        ));
    }

    section
}

fn recommendations_section(history: &[ConversationEntry]) -> String {
    let overall = if history.iter().any(|entry| {
        matches!(
            entry.urgency_level,
            Some(UrgencyLevel::Immediate) | Some(UrgencyLevel::Urgent)
        )
    }) {
        "HIGH PRIORITY"
    } else if history
        .iter()
        .any(|entry| entry.urgency_level == Some(UrgencyLevel::Moderate))
    {
        "MODERATE"
    } else {
        "ROUTINE"
    };

    let mut section = format!(
        "RECOMMENDATIONS:\n{RULE}\nOverall Priority: {overall}\n\nAction Items:"
    );

    let action_items = unique_recommendations(history);
    if action_items.is_empty() {
        section.push_str("\n  1. Continue monitoring symptoms\n  2. Follow up if symptoms worsen");
    } else {
        for (position, item) in action_items.iter().take(MAX_ACTION_ITEMS).enumerate() {
            section.push_str(&format!("\n  {}. {}", position + 1, item));
        }
    }

    section
}

/// Collects recommendations across the conversation, deduplicated with
/// first-seen order preserved.
fn unique_recommendations(history: &[ConversationEntry]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for entry in history {
        for recommendation in &entry.recommendations {
            if !unique.contains(recommendation) {
                unique.push(recommendation.clone());
            }
        }
    }
    unique
}

fn footer() -> String {
    format!(
        "IMPORTANT DISCLAIMERS:\n{RULE}\n\
         - This report is generated by an automated prescreening system\n\
         - Not intended to replace professional medical diagnosis\n\
         - ICD-10 codes are preliminary suggestions requiring clinical validation\n\
         - For medical emergencies, seek immediate professional care\n\
         - Healthcare provider review and assessment recommended\n\n\
         {RULE}\nEnd of Report"
    )
}

//! Prompt assembly for the prescreening assistant.

use prescreen_core::PatientContext;

/// System prompt framing every model exchange.
pub const SYSTEM_PROMPT: &str = "You are a medical assistant specialised in patient \
prescreening. Your role is to:\n\
1. Analyse patient symptoms and medical history\n\
2. Ask relevant follow-up questions to gather comprehensive information\n\
3. Provide preliminary assessments and triage recommendations\n\
4. Suggest appropriate next steps for care\n\n\
Always maintain a professional, empathetic tone and remind patients that this is \
preliminary guidance, not a medical diagnosis. Encourage patients to seek appropriate \
medical care when needed.";

/// Builds the user prompt, prefixing the patient-context block when the
/// context carries any clinical detail.
pub fn build_prompt(query: &str, patient: Option<&PatientContext>) -> String {
    match patient.and_then(PatientContext::summary_line) {
        Some(context) => format!("Patient context: {context}\n\n{query}"),
        None => query.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_without_context_is_the_query() {
        assert_eq!(build_prompt("I have a headache", None), "I have a headache");
    }

    #[test]
    fn test_prompt_with_empty_context_is_the_query() {
        let patient = PatientContext::default();
        assert_eq!(
            build_prompt("I have a headache", Some(&patient)),
            "I have a headache"
        );
    }

    #[test]
    fn test_prompt_prefixes_context_block() {
        let patient = PatientContext {
            age: Some(45),
            sex: Some("female".to_owned()),
            medical_history: Some("Hypertension".to_owned()),
            ..Default::default()
        };
        let prompt = build_prompt("I feel dizzy", Some(&patient));

        assert!(prompt.starts_with("Patient context: Age: 45; Sex: female;"));
        assert!(prompt.ends_with("\n\nI feel dizzy"));
    }
}

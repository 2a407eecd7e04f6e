//! Urgency classification and triage recommendations.
//!
//! Keyword tiers are evaluated in strict priority order and short-circuit:
//! one emergency hit settles the classification and lower tiers are never
//! consulted. Matching here is plain case-insensitive substring containment,
//! unlike the word-bounded symptom extractor; the two must not be unified.

use serde::{Deserialize, Serialize};

/// Triage urgency, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    /// Routine care or monitoring
    Low,
    /// Within 2-3 days
    Moderate,
    /// Within 24 hours
    Urgent,
    /// Emergency: seek immediate care
    Immediate,
}

impl UrgencyLevel {
    /// Wire/display name of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::Urgent => "urgent",
            Self::Immediate => "immediate",
        }
    }
}

impl std::fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Emergency indicators grouped by presentation; any hit classifies as
/// [`UrgencyLevel::Immediate`].
const EMERGENCY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "chest_pain",
        &["chest pain", "heart attack", "crushing pain", "chest pressure"],
    ),
    (
        "breathing",
        &[
            "can't breathe",
            "difficulty breathing",
            "shortness of breath",
            "suffocating",
        ],
    ),
    (
        "consciousness",
        &["unconscious", "passed out", "fainting", "blackout", "seizure"],
    ),
    (
        "bleeding",
        &["severe bleeding", "heavy bleeding", "blood loss", "hemorrhage"],
    ),
    (
        "allergic",
        &["allergic reaction", "anaphylaxis", "severe allergy", "swelling face"],
    ),
    (
        "stroke",
        &[
            "stroke",
            "face drooping",
            "arm weakness",
            "speech slurred",
            "sudden confusion",
        ],
    ),
    (
        "mental_health",
        &["suicide", "self-harm", "want to die", "hurt myself"],
    ),
];

/// Indicators that warrant care within 24 hours.
const URGENT_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "severe_pain",
        &["severe pain", "excruciating", "unbearable pain", "10/10 pain"],
    ),
    (
        "high_fever",
        &["high fever", "fever over", "104", "40 degrees"],
    ),
    (
        "infection_signs",
        &["infected", "pus", "red streak", "spreading redness"],
    ),
    (
        "vomiting",
        &["can't keep down", "persistent vomiting", "dehydrated"],
    ),
    (
        "vision_changes",
        &["sudden vision loss", "double vision", "blind"],
    ),
];

/// Indicators that warrant care within a few days.
const MODERATE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "persistent",
        &["persistent", "ongoing", "won't go away", "getting worse"],
    ),
    ("fever", &["fever", "temperature", "chills"]),
    ("pain", &["pain", "ache", "sore", "tender"]),
    (
        "digestive",
        &["nausea", "vomiting", "diarrhea", "stomach"],
    ),
    (
        "respiratory",
        &["cough", "congestion", "runny nose", "sinus"],
    ),
];

/// Classifies combined query/response text into exactly one urgency level.
///
/// The optional model response participates in classification so that
/// model-surfaced red flags still escalate the triage outcome.
pub fn classify_urgency(query: &str, response_text: Option<&str>) -> UrgencyLevel {
    let combined = match response_text {
        Some(response) => format!("{} {}", query, response).to_lowercase(),
        None => query.to_lowercase(),
    };

    for (category, keywords) in EMERGENCY_KEYWORDS {
        if keywords.iter().any(|keyword| combined.contains(keyword)) {
            tracing::debug!(category, "emergency keyword matched");
            return UrgencyLevel::Immediate;
        }
    }

    for (category, keywords) in URGENT_KEYWORDS {
        if keywords.iter().any(|keyword| combined.contains(keyword)) {
            tracing::debug!(category, "urgent keyword matched");
            return UrgencyLevel::Urgent;
        }
    }

    for (category, keywords) in MODERATE_KEYWORDS {
        if keywords.iter().any(|keyword| combined.contains(keyword)) {
            tracing::debug!(category, "moderate keyword matched");
            return UrgencyLevel::Moderate;
        }
    }

    UrgencyLevel::Low
}

/// Fixed action list for an urgency level.
pub fn triage_recommendations(urgency: UrgencyLevel) -> &'static [&'static str] {
    match urgency {
        UrgencyLevel::Immediate => &[
            "Seek immediate medical attention - call 911 or go to emergency room",
            "Do not drive yourself - have someone else drive or call ambulance",
            "If alone, call emergency services and stay on the line",
        ],
        UrgencyLevel::Urgent => &[
            "Contact your healthcare provider within 24 hours",
            "Consider urgent care if primary care is unavailable",
            "Monitor symptoms closely and seek immediate care if they worsen",
        ],
        UrgencyLevel::Moderate => &[
            "Schedule appointment with your healthcare provider within 2-3 days",
            "Monitor symptoms and keep a symptom diary",
            "Take appropriate over-the-counter medications if suitable",
        ],
        UrgencyLevel::Low => &[
            "Consider routine medical consultation if symptoms persist",
            "Practice self-care and monitor for any changes",
            "Schedule regular check-up with healthcare provider",
        ],
    }
}

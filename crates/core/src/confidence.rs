//! Combination-aware confidence adjustment.

use crate::extract::SymptomSet;
use crate::lexicon::Lexicon;

/// Adjusts `base` confidence for `code` given the full matched-symptom set.
///
/// Every combination modifier whose required symptoms are all present in
/// `matched` and whose multiplier table lists `code` multiplies the running
/// confidence. Modifiers apply in lexical key order, keeping composed
/// results bit-stable across runs. The final value is clamped to
/// `[0.0, 1.0]`.
pub fn adjusted_confidence(
    lexicon: &Lexicon,
    code: &str,
    base: f64,
    matched: &SymptomSet,
) -> f64 {
    let mut confidence = base;

    for modifier in lexicon.modifiers() {
        if modifier.required_len() > matched.len() {
            continue;
        }
        if !modifier.is_satisfied_by(matched) {
            continue;
        }
        if let Some(multiplier) = modifier.multiplier_for(code) {
            tracing::debug!(
                combination = modifier.key(),
                code,
                multiplier,
                "applying combination modifier"
            );
            confidence *= multiplier;
        }
    }

    confidence.clamp(0.0, 1.0)
}

/// Errors surfaced to callers of the engine's entry points.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// The supplied text was empty or contained only whitespace
    #[error("input text cannot be empty")]
    EmptyText,
}

/// Result type for triage and coding operations.
pub type TriageResult<T> = std::result::Result<T, InputError>;

//! Language-model seam for the prescreening assistant.
//!
//! The structured assessment pipeline is fully rule-based; this crate only
//! supplies the optional conversational layer on top of it. A
//! [`LanguageModel`] implementation produces free-text responses, with two
//! backends provided:
//!
//! - [`OllamaClient`] talks to a local Ollama instance over HTTP.
//! - [`ScriptedClient`] returns deterministic text for tests and offline use.
//!
//! [`Assistant`] wraps a backend together with a resolved model name and the
//! prescreening system prompt, falling back to scripted operation when no
//! model server is reachable.

mod assistant;
mod ollama;
mod prompt;
mod scripted;

pub use assistant::{Assistant, SCRIPTED_MODEL};
pub use ollama::{OllamaClient, PREFERRED_MODELS};
pub use prompt::{build_prompt, SYSTEM_PROMPT};
pub use scripted::ScriptedClient;

/// Errors from language-model backends
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Model server is not reachable at the configured URL
    #[error("Model server is not running at {0}")]
    Connection(String),

    /// Model server answered with a non-success status
    #[error("Model server returned error (status {status}): {body}")]
    Backend { status: u16, body: String },

    /// None of the preferred medical models is installed
    #[error("No compatible medical model available")]
    NoModelAvailable,

    /// Transport-level HTTP failure
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Model server answered with a body we cannot parse
    #[error("Response parsing error: {0}")]
    ResponseParsing(String),
}

/// Convenience alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Language-model backend abstraction (allows scripted substitution).
pub trait LanguageModel {
    /// Generates a completion for `prompt` under `system` using `model`.
    fn generate(&self, model: &str, prompt: &str, system: &str) -> ModelResult<String>;

    /// Whether a model whose name starts with `model` is installed.
    fn is_model_available(&self, model: &str) -> ModelResult<bool>;

    /// Names of all installed models.
    fn list_models(&self) -> ModelResult<Vec<String>>;
}

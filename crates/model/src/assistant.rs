//! Backend resolution and the conversational entry point.

use prescreen_core::PatientContext;

use crate::prompt::{build_prompt, SYSTEM_PROMPT};
use crate::{LanguageModel, ModelResult, OllamaClient, ScriptedClient};

/// Model name reported when running on the scripted backend.
pub const SCRIPTED_MODEL: &str = "scripted";

/// A language-model backend paired with a resolved model name.
pub struct Assistant {
    client: Box<dyn LanguageModel>,
    model: String,
}

impl Assistant {
    /// Wraps an already-chosen backend and model name.
    pub fn new(client: Box<dyn LanguageModel>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Resolves a usable backend against an Ollama instance at `base_url`.
    ///
    /// A `model_override` is honoured when that model is installed; otherwise
    /// the preferred medical models are tried in order. When the server is
    /// unreachable or carries no suitable model, the scripted backend is used
    /// so the assistant keeps working offline.
    pub fn connect(base_url: &str, model_override: Option<&str>) -> Self {
        let client = OllamaClient::new(base_url, 120);

        let resolved = match model_override {
            Some(name) => match client.is_model_available(name) {
                Ok(true) => Some(name.to_owned()),
                Ok(false) => {
                    tracing::warn!(model = name, "requested model is not installed");
                    client.find_best_model().ok()
                }
                Err(e) => {
                    tracing::debug!(error = %e, "model server not reachable");
                    None
                }
            },
            None => match client.find_best_model() {
                Ok(model) => Some(model),
                Err(e) => {
                    tracing::debug!(error = %e, "no medical model available");
                    None
                }
            },
        };

        match resolved {
            Some(model) => {
                tracing::info!(%model, "language model connected");
                Self::new(Box::new(client), model)
            }
            None => {
                tracing::info!("falling back to scripted responses");
                Self::offline()
            }
        }
    }

    /// An assistant over the scripted backend, for offline operation.
    pub fn offline() -> Self {
        Self::new(Box::new(ScriptedClient::offline()), SCRIPTED_MODEL)
    }

    /// The resolved model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Whether responses come from the scripted backend.
    pub fn is_scripted(&self) -> bool {
        self.model == SCRIPTED_MODEL
    }

    /// Produces a free-text response to one patient message.
    ///
    /// # Errors
    ///
    /// Propagates backend failures (connection, HTTP, parsing).
    pub fn ask(&self, query: &str, patient: Option<&PatientContext>) -> ModelResult<String> {
        let prompt = build_prompt(query, patient);
        self.client.generate(&self.model, &prompt, SYSTEM_PROMPT)
    }
}

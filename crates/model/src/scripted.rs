//! Deterministic backend for tests and offline operation.

use crate::{LanguageModel, ModelResult};

const OFFLINE_RESPONSE: &str = "Thank you for sharing that. I have noted your symptoms. \
The structured assessment below is produced by the built-in clinical rules; please review \
the urgency guidance and recommendations, and seek professional care where advised.";

/// Backend that returns a fixed response without any network access.
pub struct ScriptedClient {
    response: String,
    available_models: Vec<String>,
}

impl ScriptedClient {
    /// Creates a client that always answers with `response`.
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            available_models: vec!["medgemma:latest".to_string()],
        }
    }

    /// Canned client used when no model server is reachable.
    pub fn offline() -> Self {
        Self::new(OFFLINE_RESPONSE)
    }

    /// Overrides the advertised model list.
    pub fn with_models(mut self, models: Vec<String>) -> Self {
        self.available_models = models;
        self
    }
}

impl LanguageModel for ScriptedClient {
    fn generate(&self, _model: &str, _prompt: &str, _system: &str) -> ModelResult<String> {
        Ok(self.response.clone())
    }

    fn is_model_available(&self, model: &str) -> ModelResult<bool> {
        Ok(self.available_models.iter().any(|m| m.starts_with(model)))
    }

    fn list_models(&self) -> ModelResult<Vec<String>> {
        Ok(self.available_models.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_client_returns_configured_response() {
        let client = ScriptedClient::new("test response");
        let result = client.generate("model", "prompt", "system").unwrap();
        assert_eq!(result, "test response");
    }

    #[test]
    fn test_scripted_client_lists_models() {
        let client = ScriptedClient::new("")
            .with_models(vec!["medgemma:latest".into(), "llama3:8b".into()]);
        let models = client.list_models().unwrap();
        assert_eq!(models.len(), 2);
        assert!(client.is_model_available("medgemma").unwrap());
    }

    #[test]
    fn test_scripted_client_model_not_available() {
        let client = ScriptedClient::new("").with_models(vec!["llama3:8b".into()]);
        assert!(!client.is_model_available("medgemma").unwrap());
    }

    #[test]
    fn test_offline_response_is_deterministic() {
        let first = ScriptedClient::offline().generate("m", "p", "s").unwrap();
        let second = ScriptedClient::offline().generate("m", "p", "s").unwrap();
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }
}

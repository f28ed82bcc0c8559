//! Completion provider trait and its Ollama-backed implementation.
//!
//! The pipeline sees one operation: `complete`. Each generation or
//! refinement request makes exactly one call, with no retries, no
//! streaming, and no cancellation; a caller-side timeout simply abandons
//! the call. Every failure mode collapses into `NoteGenError::Provider`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::NoteGenError;

/// Opaque text-completion service behind note generation.
pub trait CompletionProvider {
    fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, NoteGenError>;
}

/// HTTP client for a local Ollama instance.
pub struct OllamaClient {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OllamaClient {
    /// Create a client with an explicit endpoint, model, and timeout.
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Result<Self, NoteGenError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| NoteGenError::Provider(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
            timeout_secs,
        })
    }

    /// Default Ollama instance at localhost:11434 with a 5-minute timeout.
    pub fn default_local(model: &str) -> Result<Self, NoteGenError> {
        Self::new("http://localhost:11434", model, 300)
    }

    /// The model name requests are issued against.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Whether the configured model is present on the instance.
    ///
    /// Intended as a startup probe by the embedding application, before
    /// any staff member tries to generate a note.
    pub fn is_model_available(&self) -> Result<bool, NoteGenError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NoteGenError::Provider(format!(
                "Ollama returned status {status} listing models"
            )));
        }

        let tags: OllamaTagsResponse = response
            .json()
            .map_err(|e| NoteGenError::Provider(format!("malformed Ollama tag list: {e}")))?;
        let tagged_prefix = format!("{}:", self.model);
        Ok(tags
            .models
            .iter()
            .any(|m| m.name == self.model || m.name.starts_with(&tagged_prefix)))
    }

    fn transport_error(&self, e: reqwest::Error) -> NoteGenError {
        if e.is_connect() {
            NoteGenError::Provider(format!("Ollama is not reachable at {}", self.base_url))
        } else if e.is_timeout() {
            NoteGenError::Provider(format!("request timed out after {}s", self.timeout_secs))
        } else {
            NoteGenError::Provider(e.to_string())
        }
    }
}

/// Request body for Ollama /api/generate.
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

/// Response body from Ollama /api/generate.
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

/// Response body from Ollama /api/tags.
#[derive(Deserialize)]
struct OllamaTagsResponse {
    models: Vec<OllamaModel>,
}

#[derive(Deserialize)]
struct OllamaModel {
    name: String,
}

impl CompletionProvider for OllamaClient {
    fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, NoteGenError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = OllamaGenerateRequest {
            model: &self.model,
            prompt: user,
            system,
            stream: false,
            options: OllamaOptions {
                temperature,
                num_predict: max_tokens,
            },
        };

        tracing::debug!(model = %self.model, temperature, max_tokens, "sending completion request");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(NoteGenError::Provider(format!(
                "Ollama returned status {status}: {body}"
            )));
        }

        let parsed: OllamaGenerateResponse = response
            .json()
            .map_err(|e| NoteGenError::Provider(format!("malformed Ollama response: {e}")))?;
        Ok(parsed.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_satisfies_provider_trait() {
        fn _accepts_provider<P: CompletionProvider>(_p: &P) {}

        // Compile-time check; connecting to a real Ollama is out of scope
        // for unit tests.
        let _: fn(&OllamaClient) = _accepts_provider;
    }

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let client = OllamaClient::new("http://localhost:11434/", "llama3.1:8b", 30).unwrap();
        assert_eq!(client.base_url, "http://localhost:11434");
        assert_eq!(client.model(), "llama3.1:8b");
    }

    #[test]
    fn generate_request_serializes_options() {
        let body = OllamaGenerateRequest {
            model: "llama3.1:8b",
            prompt: "user turn",
            system: "system turn",
            stream: false,
            options: OllamaOptions {
                temperature: 0.85,
                num_predict: 2000,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "llama3.1:8b");
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["num_predict"], 2000);
        assert!((json["options"]["temperature"].as_f64().unwrap() - 0.85).abs() < 1e-6);
    }

    #[test]
    fn tags_response_deserializes() {
        let tags: OllamaTagsResponse = serde_json::from_str(
            r#"{"models": [{"name": "llama3.1:8b"}, {"name": "mistral:7b"}]}"#,
        )
        .unwrap();
        assert_eq!(tags.models.len(), 2);
        assert_eq!(tags.models[0].name, "llama3.1:8b");
    }
}

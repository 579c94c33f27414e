use serde::{Deserialize, Serialize};

use crate::error::EmbedError;
use crate::provider::Embedder;

/// Embedding client for the Ollama `/api/embed` endpoint, which accepts a
/// batched `input` array and returns embeddings in input order.
#[derive(Debug, Clone)]
pub struct OllamaEmbedder {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl OllamaEmbedder {
    #[must_use]
    pub fn new(base_url: &str, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/api/embed", base_url.trim_end_matches('/')),
            model: model.into(),
        }
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Embedder for OllamaEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = EmbedRequest {
            model: &self.model,
            input: texts,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let parsed: EmbedResponse = response.json().await?;
        if parsed.embeddings.is_empty() {
            return Err(EmbedError::EmptyResponse { provider: "ollama" });
        }
        if parsed.embeddings.len() != texts.len() {
            return Err(EmbedError::CountMismatch {
                got: parsed.embeddings.len(),
                expected: texts.len(),
            });
        }

        Ok(parsed.embeddings)
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}

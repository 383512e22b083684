use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::PipelineError;

const REQUEST_TIMEOUT_SECS: u64 = 60;
const BATCH_SIZE: usize = 64;

/// Client for an OpenAI-compatible `/embeddings` endpoint.
///
/// The embedding model is a black box here: text in, vector out. Failures are
/// reported as `StoreUnavailable` since embedding is part of the storage path.
pub struct EmbeddingClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingEntry>,
}

#[derive(Deserialize)]
struct EmbeddingEntry {
    index: usize,
    embedding: Vec<f32>,
}

impl EmbeddingClient {
    pub fn new(config: &StoreConfig) -> Result<Self, PipelineError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                PipelineError::Configuration(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.embedding_api_url.trim_end_matches('/').to_string(),
            api_key: config.embedding_api_key.clone(),
            model: config.embedding_model.clone(),
        })
    }

    /// Embed `texts` in order; the result is index-aligned with the input.
    pub async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, PipelineError> {
        let mut vectors = Vec::with_capacity(texts.len());

        for batch in texts.chunks(BATCH_SIZE) {
            vectors.extend(self.embed_batch(batch).await?);
        }

        Ok(vectors)
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, PipelineError> {
        debug!("Requesting embeddings for {} texts", texts.len());

        let url = format!("{}/embeddings", self.base_url);
        let request = EmbeddingRequest {
            model: &self.model,
            input: texts,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                PipelineError::StoreUnavailable(format!("embedding request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::StoreUnavailable(format!(
                "embedding backend returned HTTP {}: {}",
                status, body
            )));
        }

        let parsed: EmbeddingResponse = response.json().await.map_err(|e| {
            PipelineError::StoreUnavailable(format!("failed to parse embedding response: {}", e))
        })?;

        if parsed.data.len() != texts.len() {
            return Err(PipelineError::StoreUnavailable(format!(
                "embedding backend returned {} vectors for {} inputs",
                parsed.data.len(),
                texts.len()
            )));
        }

        let mut entries = parsed.data;
        entries.sort_by_key(|entry| entry.index);

        Ok(entries.into_iter().map(|entry| entry.embedding).collect())
    }
}

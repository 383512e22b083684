use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use shared::error::PipelineError;

use crate::config::{FIREFLIES_GRAPHQL_URL, REQUEST_TIMEOUT_SECS, TRANSCRIPTS_QUERY};
use crate::models::{GraphQLResponse, Transcript};

/// Source of raw transcripts for one participant filter. A fetch is atomic:
/// it either yields the whole filter's transcripts or fails as
/// `SourceUnavailable`.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch(
        &self,
        participant_email: &str,
        limit: i64,
    ) -> Result<Vec<Transcript>, PipelineError>;
}

#[async_trait]
impl<T: TranscriptSource + ?Sized> TranscriptSource for std::sync::Arc<T> {
    async fn fetch(
        &self,
        participant_email: &str,
        limit: i64,
    ) -> Result<Vec<Transcript>, PipelineError> {
        (**self).fetch(participant_email, limit).await
    }
}

pub struct FirefliesClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

fn source_err(message: impl Into<String>) -> PipelineError {
    PipelineError::SourceUnavailable(message.into())
}

impl FirefliesClient {
    pub fn new(api_key: String) -> Result<Self, PipelineError> {
        Self::with_base_url(api_key, FIREFLIES_GRAPHQL_URL.to_string())
    }

    /// Point the client at a different endpoint; used by tests.
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, PipelineError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                PipelineError::Configuration(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    pub async fn fetch_transcripts(
        &self,
        participant_email: &str,
        limit: i64,
    ) -> Result<Vec<Transcript>, PipelineError> {
        let body = json!({
            "query": TRANSCRIPTS_QUERY,
            "variables": {
                "participantEmail": participant_email,
                "limit": limit,
            },
        });

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| source_err(format!("request to Fireflies failed: {}", e)))?;

        let status = response.status();

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(source_err(format!(
                "authentication failed ({}); check the Fireflies API key",
                status
            )));
        }

        if status.as_u16() == 429 {
            return Err(source_err("rate limited by the Fireflies API"));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(source_err(format!(
                "Fireflies API returned HTTP {}: {}",
                status, body
            )));
        }

        let gql_response: GraphQLResponse = response
            .json()
            .await
            .map_err(|e| source_err(format!("failed to parse Fireflies response: {}", e)))?;

        if let Some(errors) = &gql_response.errors {
            if !errors.is_empty() {
                let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
                return Err(source_err(format!(
                    "GraphQL errors: {}",
                    messages.join("; ")
                )));
            }
        }

        Ok(gql_response
            .data
            .map(|d| d.transcripts)
            .unwrap_or_default())
    }

    /// Cheap pre-flight check before a run commits to ingesting.
    pub async fn test_connection(&self, participant_email: &str) -> Result<(), PipelineError> {
        debug!("Testing Fireflies API connection...");
        let transcripts = self.fetch_transcripts(participant_email, 1).await?;
        debug!(
            "Fireflies connection test successful, got {} transcript(s)",
            transcripts.len()
        );
        Ok(())
    }
}

#[async_trait]
impl TranscriptSource for FirefliesClient {
    async fn fetch(
        &self,
        participant_email: &str,
        limit: i64,
    ) -> Result<Vec<Transcript>, PipelineError> {
        self.fetch_transcripts(participant_email, limit).await
    }
}

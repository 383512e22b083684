use std::sync::Arc;

use tracing::info;

use shared::error::PipelineError;
use shared::store::{ChunkFilter, ScoredChunk, VectorStore};

/// Read-path companion to the ingestion pipeline: turns a natural-language
/// question into a ranked set of transcript chunks for the conversational
/// layer. Stateless; every call re-queries the store.
pub struct RetrievalTool {
    store: Arc<dyn VectorStore>,
    default_k: usize,
    exclude_internal_default: bool,
}

impl RetrievalTool {
    pub fn new(
        store: Arc<dyn VectorStore>,
        default_k: usize,
        exclude_internal_default: bool,
    ) -> Self {
        Self {
            store,
            default_k,
            exclude_internal_default,
        }
    }

    /// A failed query is an explicit error, never an empty result set that
    /// could pass for "no matches".
    pub async fn retrieve(
        &self,
        query: &str,
        k: Option<usize>,
        exclude_internal: Option<bool>,
    ) -> Result<Vec<ScoredChunk>, PipelineError> {
        if query.trim().is_empty() {
            return Err(PipelineError::InvalidQuery(
                "query cannot be empty".to_string(),
            ));
        }

        let k = k.unwrap_or(self.default_k);
        let filter = ChunkFilter {
            exclude_internal: exclude_internal.unwrap_or(self.exclude_internal_default),
        };

        info!(
            "Retrieving up to {} chunks (exclude_internal: {})",
            k, filter.exclude_internal
        );

        self.store.query(query, k, filter).await
    }
}

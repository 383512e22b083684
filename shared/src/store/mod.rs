use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::PipelineError;
use crate::models::{ChunkDocument, ChunkMetadata};

pub mod memory;
pub mod pgvector;

pub use memory::MemoryVectorStore;
pub use pgvector::PgVectorStore;

/// Metadata predicate applied to query results. When `exclude_internal` is
/// set, no chunk from an internal-only call may appear in the results.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChunkFilter {
    pub exclude_internal: bool,
}

/// One ranked query hit.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredChunk {
    pub id: String,
    pub content: String,
    pub metadata: ChunkMetadata,
    pub score: f32,
}

/// Thin contract around the embedding-plus-storage backend.
///
/// Duplicate-id policy: `upsert` overwrites an existing chunk rather than
/// rejecting it. Within a run the `Deduplicator` is the primary guard; the
/// overwrite policy makes re-ingestion of unchanged transcripts idempotent.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Store the chunks (content, metadata, id travel together, so the
    /// id/metadata/content alignment holds by construction). Returns the
    /// number of chunks written.
    async fn upsert(&self, chunks: &[ChunkDocument]) -> Result<usize, PipelineError>;

    /// Return up to `k` chunks ranked by decreasing relevance to `text`,
    /// every one satisfying `filter`.
    async fn query(
        &self,
        text: &str,
        k: usize,
        filter: ChunkFilter,
    ) -> Result<Vec<ScoredChunk>, PipelineError>;
}

#[async_trait]
impl<T: VectorStore + ?Sized> VectorStore for Arc<T> {
    async fn upsert(&self, chunks: &[ChunkDocument]) -> Result<usize, PipelineError> {
        (**self).upsert(chunks).await
    }

    async fn query(
        &self,
        text: &str,
        k: usize,
        filter: ChunkFilter,
    ) -> Result<Vec<ScoredChunk>, PipelineError> {
        (**self).query(text, k, filter).await
    }
}

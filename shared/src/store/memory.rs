use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::PipelineError;
use crate::models::ChunkDocument;
use crate::store::{ChunkFilter, ScoredChunk, VectorStore};

/// In-memory gateway implementation for tests and local development.
///
/// Relevance is deterministic term overlap instead of embeddings: the score is
/// the fraction of query terms appearing in the chunk content. Ties break on
/// chunk id so result order is stable.
#[derive(Debug, Default)]
pub struct MemoryVectorStore {
    chunks: RwLock<BTreeMap<String, ChunkDocument>>,
}

impl MemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.chunks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.chunks.read().await.is_empty()
    }

    pub async fn get(&self, id: &str) -> Option<ChunkDocument> {
        self.chunks.read().await.get(id).cloned()
    }
}

fn overlap_score(query: &str, content: &str) -> f32 {
    let haystack = content.to_lowercase();
    let terms: Vec<String> = query
        .split_whitespace()
        .map(|t| t.to_lowercase())
        .collect();
    if terms.is_empty() {
        return 0.0;
    }

    let matched = terms.iter().filter(|t| haystack.contains(t.as_str())).count();
    matched as f32 / terms.len() as f32
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn upsert(&self, chunks: &[ChunkDocument]) -> Result<usize, PipelineError> {
        let mut store = self.chunks.write().await;
        for chunk in chunks {
            store.insert(chunk.id.clone(), chunk.clone());
        }
        Ok(chunks.len())
    }

    async fn query(
        &self,
        text: &str,
        k: usize,
        filter: ChunkFilter,
    ) -> Result<Vec<ScoredChunk>, PipelineError> {
        let store = self.chunks.read().await;

        let mut results: Vec<ScoredChunk> = store
            .values()
            .filter(|chunk| !(filter.exclude_internal && chunk.metadata.is_internal))
            .map(|chunk| ScoredChunk {
                id: chunk.id.clone(),
                content: chunk.content.clone(),
                metadata: chunk.metadata.clone(),
                score: overlap_score(text, &chunk.content),
            })
            .filter(|scored| scored.score > 0.0)
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        results.truncate(k);

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChunkMetadata;

    fn chunk(id: &str, content: &str, is_internal: bool) -> ChunkDocument {
        ChunkDocument {
            id: id.to_string(),
            metadata: ChunkMetadata {
                transcript_id: "T1".to_string(),
                title: "Call".to_string(),
                participants: "a@co.com".to_string(),
                date_string: "2024-07-16".to_string(),
                transcript_url: "https://example.com/t/T1".to_string(),
                is_internal,
            },
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn test_upsert_overwrites_existing_id() {
        let store = MemoryVectorStore::new();

        store
            .upsert(&[chunk("T1-chunk-0", "old content", false)])
            .await
            .unwrap();
        store
            .upsert(&[chunk("T1-chunk-0", "new content", false)])
            .await
            .unwrap();

        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("T1-chunk-0").await.unwrap().content, "new content");
    }

    #[tokio::test]
    async fn test_query_ranks_by_term_overlap() {
        let store = MemoryVectorStore::new();
        store
            .upsert(&[
                chunk("a-chunk-0", "pricing and onboarding discussion", false),
                chunk("b-chunk-0", "pricing only", false),
                chunk("c-chunk-0", "unrelated roadmap talk", false),
            ])
            .await
            .unwrap();

        let results = store
            .query("pricing onboarding", 10, ChunkFilter::default())
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "a-chunk-0");
        assert_eq!(results[1].id, "b-chunk-0");
        assert!(results[0].score > results[1].score);
    }

    #[tokio::test]
    async fn test_query_filter_excludes_internal_chunks() {
        let store = MemoryVectorStore::new();
        store
            .upsert(&[
                chunk("a-chunk-0", "pricing feedback", false),
                chunk("b-chunk-0", "pricing strategy, internal", true),
            ])
            .await
            .unwrap();

        let results = store
            .query(
                "pricing",
                10,
                ChunkFilter {
                    exclude_internal: true,
                },
            )
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "a-chunk-0");
        assert!(!results[0].metadata.is_internal);
    }

    #[tokio::test]
    async fn test_query_respects_k() {
        let store = MemoryVectorStore::new();
        store
            .upsert(&[
                chunk("a-chunk-0", "pricing", false),
                chunk("b-chunk-0", "pricing", false),
                chunk("c-chunk-0", "pricing", false),
            ])
            .await
            .unwrap();

        let results = store.query("pricing", 2, ChunkFilter::default()).await.unwrap();
        assert_eq!(results.len(), 2);
    }
}

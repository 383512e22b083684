use async_trait::async_trait;
use pgvector::Vector;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::embedding::EmbeddingClient;
use crate::error::PipelineError;
use crate::models::{ChunkDocument, ChunkMetadata};
use crate::store::{ChunkFilter, ScoredChunk, VectorStore};

const MAX_CONNECTIONS: u32 = 5;

/// Postgres + pgvector implementation of the gateway. Chunk text is embedded
/// through the configured backend at upsert and query time.
pub struct PgVectorStore {
    pool: PgPool,
    embeddings: EmbeddingClient,
    dimensions: u32,
}

fn store_err(context: &str, e: impl std::fmt::Display) -> PipelineError {
    PipelineError::StoreUnavailable(format!("{}: {}", context, e))
}

impl PgVectorStore {
    pub async fn connect(config: &StoreConfig) -> Result<Self, PipelineError> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(&config.database_url)
            .await
            .map_err(|e| store_err("failed to connect to Postgres", e))?;

        let store = Self {
            pool,
            embeddings: EmbeddingClient::new(config)?,
            dimensions: config.embedding_dimensions,
        };
        store.ensure_schema().await?;

        info!("Connected to vector store");
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<(), PipelineError> {
        sqlx::query("CREATE EXTENSION IF NOT EXISTS vector")
            .execute(&self.pool)
            .await
            .map_err(|e| store_err("failed to enable pgvector extension", e))?;

        let create_table = format!(
            r#"
            CREATE TABLE IF NOT EXISTS transcript_chunks (
                id TEXT PRIMARY KEY,
                transcript_id TEXT NOT NULL,
                title TEXT NOT NULL,
                participants TEXT NOT NULL,
                date_string TEXT NOT NULL,
                transcript_url TEXT NOT NULL,
                is_internal BOOLEAN NOT NULL,
                content TEXT NOT NULL,
                embedding vector({})
            )
            "#,
            self.dimensions
        );
        sqlx::query(&create_table)
            .execute(&self.pool)
            .await
            .map_err(|e| store_err("failed to create transcript_chunks table", e))?;

        Ok(())
    }
}

#[async_trait]
impl VectorStore for PgVectorStore {
    async fn upsert(&self, chunks: &[ChunkDocument]) -> Result<usize, PipelineError> {
        if chunks.is_empty() {
            return Ok(0);
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let vectors = self.embeddings.embed(&texts).await?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| store_err("failed to begin transaction", e))?;

        for (chunk, vector) in chunks.iter().zip(vectors) {
            sqlx::query(
                r#"
                INSERT INTO transcript_chunks
                    (id, transcript_id, title, participants, date_string,
                     transcript_url, is_internal, content, embedding)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                ON CONFLICT (id) DO UPDATE
                SET transcript_id = EXCLUDED.transcript_id,
                    title = EXCLUDED.title,
                    participants = EXCLUDED.participants,
                    date_string = EXCLUDED.date_string,
                    transcript_url = EXCLUDED.transcript_url,
                    is_internal = EXCLUDED.is_internal,
                    content = EXCLUDED.content,
                    embedding = EXCLUDED.embedding
                "#,
            )
            .bind(&chunk.id)
            .bind(&chunk.metadata.transcript_id)
            .bind(&chunk.metadata.title)
            .bind(&chunk.metadata.participants)
            .bind(&chunk.metadata.date_string)
            .bind(&chunk.metadata.transcript_url)
            .bind(chunk.metadata.is_internal)
            .bind(&chunk.content)
            .bind(Vector::from(vector))
            .execute(&mut *tx)
            .await
            .map_err(|e| store_err("failed to upsert chunk", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| store_err("failed to commit upsert", e))?;

        debug!("Upserted {} chunks", chunks.len());
        Ok(chunks.len())
    }

    async fn query(
        &self,
        text: &str,
        k: usize,
        filter: ChunkFilter,
    ) -> Result<Vec<ScoredChunk>, PipelineError> {
        let mut vectors = self.embeddings.embed(&[text.to_string()]).await?;
        let query_vector = vectors
            .pop()
            .ok_or_else(|| store_err("embedding backend", "returned no query vector"))?;

        let sql = if filter.exclude_internal {
            r#"
            SELECT id, transcript_id, title, participants, date_string,
                   transcript_url, is_internal, content,
                   (embedding <=> $1)::float8 AS distance
            FROM transcript_chunks
            WHERE is_internal = FALSE
            ORDER BY embedding <=> $1
            LIMIT $2
            "#
        } else {
            r#"
            SELECT id, transcript_id, title, participants, date_string,
                   transcript_url, is_internal, content,
                   (embedding <=> $1)::float8 AS distance
            FROM transcript_chunks
            ORDER BY embedding <=> $1
            LIMIT $2
            "#
        };

        let rows = sqlx::query(sql)
            .bind(Vector::from(query_vector))
            .bind(k as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_err("query failed", e))?;

        let results = rows
            .into_iter()
            .map(|row| {
                let distance: f64 = row.get("distance");
                ScoredChunk {
                    id: row.get("id"),
                    content: row.get("content"),
                    metadata: ChunkMetadata {
                        transcript_id: row.get("transcript_id"),
                        title: row.get("title"),
                        participants: row.get("participants"),
                        date_string: row.get("date_string"),
                        transcript_url: row.get("transcript_url"),
                        is_internal: row.get("is_internal"),
                    },
                    score: (1.0 - distance) as f32,
                }
            })
            .collect();

        Ok(results)
    }
}

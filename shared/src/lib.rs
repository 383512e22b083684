pub mod config;
pub mod content_chunker;
pub mod dedupe;
pub mod embedding;
pub mod error;
pub mod models;
pub mod store;
pub mod telemetry;

pub use config::StoreConfig;
pub use content_chunker::ContentChunker;
pub use dedupe::Deduplicator;
pub use embedding::EmbeddingClient;
pub use error::PipelineError;
pub use store::{ChunkFilter, MemoryVectorStore, PgVectorStore, ScoredChunk, VectorStore};

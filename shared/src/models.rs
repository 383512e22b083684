use serde::{Deserialize, Serialize};

/// A transcript flattened into a single speaker-labeled text body, plus the
/// metadata carried onto every chunk cut from it.
///
/// Line order in `text` matches sentence order in the source transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalDocument {
    pub transcript_id: String,
    pub title: String,
    /// Comma-joined participant addresses, in source order.
    pub participants: String,
    pub date_string: String,
    pub transcript_url: String,
    /// True iff every participant address belongs to the organization's domain.
    pub is_internal: bool,
    pub text: String,
}

impl CanonicalDocument {
    pub fn chunk_metadata(&self) -> ChunkMetadata {
        ChunkMetadata {
            transcript_id: self.transcript_id.clone(),
            title: self.title.clone(),
            participants: self.participants.clone(),
            date_string: self.date_string.clone(),
            transcript_url: self.transcript_url.clone(),
            is_internal: self.is_internal,
        }
    }
}

/// Metadata stored alongside each chunk. All values are primitive so they map
/// directly onto the store's metadata columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub transcript_id: String,
    pub title: String,
    pub participants: String,
    pub date_string: String,
    pub transcript_url: String,
    pub is_internal: bool,
}

/// One bounded-size slice of a canonical document, the unit of embedding and
/// storage. Concatenating a transcript's chunks in index order reconstructs
/// the canonical text exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkDocument {
    pub id: String,
    pub metadata: ChunkMetadata,
    pub content: String,
}

impl ChunkDocument {
    /// Deterministic chunk id: re-running the pipeline on unchanged input
    /// reproduces the same ids, so re-ingestion is idempotent.
    pub fn chunk_id(transcript_id: &str, index: usize) -> String {
        format!("{}-chunk-{}", transcript_id, index)
    }
}

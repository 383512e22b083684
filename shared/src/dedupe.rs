use std::collections::HashSet;

use crate::models::ChunkDocument;

/// First-write-wins duplicate guard for chunk ids.
///
/// One instance lives for exactly one ingestion run; the seen-id set spans
/// every batch of that run, so a transcript surfacing under two participant
/// filters is stored once. Store-level duplicate handling is the gateway's
/// concern, not this one's.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<String>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the first chunk for each id, in order; return the kept chunks and
    /// the number dropped.
    pub fn dedupe(&mut self, batch: Vec<ChunkDocument>) -> (Vec<ChunkDocument>, usize) {
        let mut kept = Vec::with_capacity(batch.len());
        let mut dropped = 0;

        for chunk in batch {
            if self.seen.insert(chunk.id.clone()) {
                kept.push(chunk);
            } else {
                dropped += 1;
            }
        }

        (kept, dropped)
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}

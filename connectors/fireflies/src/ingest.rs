use tracing::{error, info, warn};

use shared::dedupe::Deduplicator;
use shared::error::PipelineError;
use shared::store::VectorStore;
use shared::ContentChunker;

use crate::client::TranscriptSource;
use crate::normalize::Normalizer;

/// Outcome of one ingestion run.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub chunks_stored: usize,
    pub duplicates_skipped: usize,
    pub malformed_skipped: usize,
    /// (participant filter, transcripts fetched) per successful filter.
    pub transcripts_per_filter: Vec<(String, usize)>,
    /// (participant filter, error) per failed fetch.
    pub failed_filters: Vec<(String, String)>,
}

/// Drives the fetch, normalize, chunk, dedupe and upsert stages across the
/// configured participant filters.
///
/// Failure handling is asymmetric on purpose: a fetch failure is scoped to
/// its filter and the run continues, while an upsert failure means the store
/// is unavailable and aborts the run immediately.
pub struct IngestionCoordinator<S: TranscriptSource, V: VectorStore> {
    source: S,
    store: V,
    normalizer: Normalizer,
    max_chunk_len: usize,
    transcripts_per_filter: i64,
}

impl<S: TranscriptSource, V: VectorStore> IngestionCoordinator<S, V> {
    pub fn new(
        source: S,
        store: V,
        normalizer: Normalizer,
        max_chunk_len: usize,
        transcripts_per_filter: i64,
    ) -> Self {
        Self {
            source,
            store,
            normalizer,
            max_chunk_len,
            transcripts_per_filter,
        }
    }

    pub async fn run(&self, participant_filters: &[String]) -> Result<IngestReport, PipelineError> {
        // Fresh seen-id set per run; spans every filter so a transcript
        // surfacing under two filters is stored once.
        let mut deduplicator = Deduplicator::new();
        let mut report = IngestReport::default();

        for filter in participant_filters {
            info!("Fetching transcripts for {}", filter);

            let transcripts = match self
                .source
                .fetch(filter, self.transcripts_per_filter)
                .await
            {
                Ok(transcripts) => transcripts,
                Err(e) => {
                    warn!("Fetch failed for {}: {}", filter, e);
                    report.failed_filters.push((filter.clone(), e.to_string()));
                    continue;
                }
            };

            info!("Fetched {} transcripts for {}", transcripts.len(), filter);
            report
                .transcripts_per_filter
                .push((filter.clone(), transcripts.len()));

            let mut batch = Vec::new();
            for transcript in &transcripts {
                let document = match self.normalizer.normalize(transcript) {
                    Ok(document) => document,
                    Err(e) => {
                        warn!("Skipping transcript: {}", e);
                        report.malformed_skipped += 1;
                        continue;
                    }
                };

                batch.extend(ContentChunker::chunk_document(&document, self.max_chunk_len));
            }

            let (kept, dropped) = deduplicator.dedupe(batch);
            report.duplicates_skipped += dropped;

            if kept.is_empty() {
                continue;
            }

            match self.store.upsert(&kept).await {
                Ok(stored) => report.chunks_stored += stored,
                Err(e) => {
                    error!("Upsert failed, aborting run: {}", e);
                    return Err(e);
                }
            }
        }

        Ok(report)
    }
}

use thiserror::Error;

/// Error taxonomy for the transcript pipeline.
///
/// `SourceUnavailable` is recoverable per participant filter; `StoreUnavailable`
/// aborts the current run. `MalformedRecord` skips a single transcript.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("transcript source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("vector store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("malformed transcript record: {0}")]
    MalformedRecord(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

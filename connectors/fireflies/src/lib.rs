pub mod client;
pub mod config;
pub mod ingest;
pub mod models;
pub mod normalize;

pub use client::{FirefliesClient, TranscriptSource};
pub use config::IngestionConfig;
pub use ingest::{IngestReport, IngestionCoordinator};
pub use normalize::Normalizer;

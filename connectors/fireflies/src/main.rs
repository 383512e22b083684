use anyhow::{Context, Result};
use dotenvy::dotenv;
use tracing::{info, warn};

use recall_fireflies_connector::{
    FirefliesClient, IngestionConfig, IngestionCoordinator, Normalizer,
};
use shared::{telemetry, PgVectorStore};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    telemetry::init_telemetry("recall-fireflies-connector");

    info!("Starting Fireflies transcript ingestion");

    let config = IngestionConfig::from_env()?;

    let client = FirefliesClient::new(config.fireflies_api_key.clone())?;
    client
        .test_connection(&config.participant_filters[0])
        .await
        .context("Fireflies connection test failed")?;

    let store = PgVectorStore::connect(&config.store).await?;
    let normalizer = Normalizer::new(&config.org_email_domain, &config.internal_staff);

    let coordinator = IngestionCoordinator::new(
        client,
        store,
        normalizer,
        config.max_chunk_len,
        config.transcripts_per_filter,
    );

    let report = coordinator.run(&config.participant_filters).await?;

    info!(
        chunks_stored = report.chunks_stored,
        duplicates_skipped = report.duplicates_skipped,
        malformed_skipped = report.malformed_skipped,
        "Ingestion run complete"
    );
    for (filter, count) in &report.transcripts_per_filter {
        info!("  {}: {} transcripts", filter, count);
    }
    for (filter, error) in &report.failed_filters {
        warn!("  {}: fetch failed: {}", filter, error);
    }

    Ok(())
}

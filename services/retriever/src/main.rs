use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tracing::info;

use recall_retriever::{create_router, ApiState, RetrievalTool, RetrieverConfig};
use shared::{telemetry, PgVectorStore, VectorStore};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    telemetry::init_telemetry("recall-retriever");

    info!("Starting retriever service");

    let config = RetrieverConfig::from_env()?;
    let store = PgVectorStore::connect(&config.store).await?;

    let tool = RetrievalTool::new(
        Arc::new(store) as Arc<dyn VectorStore>,
        config.default_k,
        config.exclude_internal_default,
    );

    let app = create_router(ApiState {
        tool: Arc::new(tool),
    });

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

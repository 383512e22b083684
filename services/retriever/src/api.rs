use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use shared::error::PipelineError;
use shared::store::ScoredChunk;

use crate::retrieve::RetrievalTool;

#[derive(Clone)]
pub struct ApiState {
    pub tool: Arc<RetrievalTool>,
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    pub k: Option<usize>,
    pub exclude_internal: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub results: Vec<ScoredChunk>,
    pub total_count: usize,
    pub query_time_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/query", post(query))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "retriever"
    }))
}

async fn query(State(state): State<ApiState>, Json(request): Json<QueryRequest>) -> Response {
    let started = Instant::now();

    match state
        .tool
        .retrieve(&request.query, request.k, request.exclude_internal)
        .await
    {
        Ok(results) => {
            let response = QueryResponse {
                total_count: results.len(),
                results,
                query_time_ms: started.elapsed().as_millis() as u64,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e @ PipelineError::InvalidQuery(_)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Query failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

use crate::config::ServerConfig;
use crate::mcp::{handler, McpResponse};
use crate::Ga4Server;
use anyhow::{Context, Result};
use axum::{body::Bytes, extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    server: Arc<Ga4Server>,
}

async fn handle_rpc(State(state): State<AppState>, body: Bytes) -> Json<McpResponse> {
    // Raw bytes so malformed JSON still gets a JSON-RPC parse error
    Json(handler::handle_body(&state.server, &body).await)
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "GA4 MCP Server is running",
        "status": "ok",
        "version": handler::SERVER_VERSION
    }))
}

async fn health() -> Json<Value> {
    let now = chrono::Utc::now();
    let timestamp = now.timestamp_millis() as f64 / 1000.0;
    Json(json!({ "status": "healthy", "timestamp": timestamp }))
}

pub fn router(server: Arc<Ga4Server>) -> Router {
    let state = AppState { server };
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root).post(handle_rpc))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

pub async fn run_http_server(server: Ga4Server, config: &ServerConfig) -> Result<()> {
    let app = router(Arc::new(server));
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;
    tracing::info!("Starting HTTP MCP server on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

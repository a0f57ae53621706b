//! HTTP transport binding
//!
//! JSON-RPC over POST requests, sharing the same dispatcher as the stdio
//! transport. Each request carries one JSON-RPC message.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tracing::info;

use crate::error::Result;
use crate::mcp::server::McpServer;

/// HTTP transport for the MCP server
pub struct HttpTransport {
    port: u16,
}

impl HttpTransport {
    /// Create a new HTTP transport listening on the given port
    pub fn new(port: u16) -> Self {
        Self { port }
    }

    /// Build the router
    pub fn router(server: Arc<McpServer>) -> Router {
        Router::new()
            .route("/mcp", post(handle_rpc))
            .route("/health", get(health_check))
            .with_state(server)
    }

    /// Run the HTTP transport until the listener closes
    pub async fn run(self, server: Arc<McpServer>) -> Result<()> {
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("MCP server listening on {} (JSON-RPC over HTTP)", addr);
        info!("  -> JSON-RPC: POST /mcp");
        info!("  -> Health:   GET /health");

        axum::serve(listener, Self::router(server)).await?;

        Ok(())
    }
}

/// Handle one JSON-RPC message
///
/// The body is passed to the dispatcher as raw text so malformed JSON gets
/// the same parse-error response as on the stdio transport.
async fn handle_rpc(State(server): State<Arc<McpServer>>, body: String) -> impl IntoResponse {
    match server.handle_message(&body).await {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        // Notification, nothing to send back
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

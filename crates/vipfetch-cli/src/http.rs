//! HTTP transport: MCP endpoint, JSON fetch endpoint and health check

use crate::mcp::{McpServer, SERVICE_NAME};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use vipfetch::{FetchOutput, FetchRequest, FetchResult, Tool};

type AppState = Arc<McpServer>;

/// Build the router with all routes and layers
pub fn router(tool: Tool) -> Router {
    let state: AppState = Arc::new(McpServer::new(tool));

    Router::new()
        .route("/", get(health_handler))
        .route("/health", get(health_handler))
        .route("/mcp", post(mcp_handler))
        .route("/fetch", post(fetch_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until Ctrl-C
pub async fn serve(tool: Tool, addr: SocketAddr) -> anyhow::Result<()> {
    let app = router(tool);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "ok": true,
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "domains": state.tool().domains().domains(),
    }))
}

async fn mcp_handler(State(state): State<AppState>, body: String) -> Response {
    match state.handle_message(&body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

async fn fetch_handler(
    State(state): State<AppState>,
    payload: Result<Json<FetchRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let output = FetchOutput::Error {
                error: rejection.body_text(),
            };
            return (rejection.status(), Json(output)).into_response();
        }
    };

    let result = state.tool().execute(request).await;
    let status = match &result {
        FetchResult::Content { .. } => StatusCode::OK,
        FetchResult::Rejected { .. } => StatusCode::FORBIDDEN,
        FetchResult::UpstreamError(_) => StatusCode::BAD_GATEWAY,
    };
    (status, Json(result.into_output())).into_response()
}

//! HTTP API server for integration with other systems.
//!
//! Exposes the four tools as REST endpoints. Results carry the same plain
//! text contract as the MCP surface: the payload, or a marked error string.

use crate::cli::Output;
use crate::config::Settings;
use crate::toolkit::Toolkit;
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state.
struct AppState {
    toolkit: Toolkit,
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let toolkit = Toolkit::new(settings)?;
    let state = Arc::new(AppState { toolkit });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/website", post(website))
        .route("/video", post(video))
        .route("/linkedin", post(linkedin))
        .route("/structure", post(structure))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Speida API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Analyze Website", "POST /website");
    Output::kv("Ask Video Question", "POST /video");
    Output::kv("Analyze LinkedIn", "POST /linkedin");
    Output::kv("Structure Text", "POST /structure");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct WebsiteRequest {
    url: String,
    question: String,
    #[serde(default)]
    structured: bool,
}

#[derive(Deserialize)]
struct VideoRequest {
    video_url_or_query: String,
    question: String,
    #[serde(default)]
    structured: bool,
}

#[derive(Deserialize)]
struct LinkedinRequest {
    linkedin_link: String,
    #[serde(default)]
    structured: bool,
}

#[derive(Deserialize)]
struct StructureRequest {
    input_data: String,
}

#[derive(Serialize)]
struct ToolResponse {
    result: String,
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn website(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WebsiteRequest>,
) -> impl IntoResponse {
    let result = state.toolkit.analyze_website(&req.url, &req.question).await;
    let result = maybe_structure(&state.toolkit, result, req.structured).await;
    Json(ToolResponse { result })
}

async fn video(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VideoRequest>,
) -> impl IntoResponse {
    let result = state
        .toolkit
        .ask_video_question(&req.video_url_or_query, &req.question)
        .await;
    let result = maybe_structure(&state.toolkit, result, req.structured).await;
    Json(ToolResponse { result })
}

async fn linkedin(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LinkedinRequest>,
) -> impl IntoResponse {
    let result = state.toolkit.analyze_linkedin(&req.linkedin_link).await;
    let result = maybe_structure(&state.toolkit, result, req.structured).await;
    Json(ToolResponse { result })
}

async fn structure(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StructureRequest>,
) -> impl IntoResponse {
    let result = state.toolkit.structure_text(&req.input_data).await;
    Json(ToolResponse { result })
}

async fn maybe_structure(toolkit: &Toolkit, result: String, structured: bool) -> String {
    use crate::toolkit::ERROR_MARKER;

    if structured && !result.starts_with(ERROR_MARKER) {
        toolkit.structure_text(&result).await
    } else {
        result
    }
}

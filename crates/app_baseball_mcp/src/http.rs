//! HTTP routes: health, Prometheus metrics, read-only recommendation
//! endpoints, and the streamable MCP service under `/mcp`.

use std::sync::Arc;

use axum::debug_handler;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::tower::{
    StreamableHttpServerConfig, StreamableHttpService,
};
use serde::Deserialize;

use app_baseball_client::{AppBaseballError, SkillLevels};

use crate::{
    AppBaseballMcpHandler, DescribeLevelResult, FocusResult, McpError, PickMenuResult,
    RecommendationResult,
};

pub struct AppState {
    pub handler: AppBaseballMcpHandler,
    pub metrics: PrometheusHandle,
}

#[derive(Debug, Deserialize)]
pub struct FocusRequest {
    #[serde(default)]
    pub levels: SkillLevels,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

#[debug_handler]
async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

#[debug_handler]
async fn metrics_endpoint(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let body = state.metrics.render();
    ([("content-type", "text/plain; version=0.0.4")], body)
}

#[debug_handler]
async fn describe_level(
    State(state): State<Arc<AppState>>,
    Path((category, level)): Path<(String, String)>,
) -> ApiResult<DescribeLevelResult> {
    state
        .handler
        .describe_level_view(&category, &serde_json::Value::String(level))
        .map(Json)
        .map_err(map_err)
}

#[debug_handler]
async fn pick_menu(
    State(state): State<Arc<AppState>>,
    Path((category, level)): Path<(String, String)>,
) -> ApiResult<PickMenuResult> {
    state
        .handler
        .pick_menu_view(&category, &serde_json::Value::String(level))
        .map(Json)
        .map_err(map_err)
}

#[debug_handler]
async fn select_focus(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FocusRequest>,
) -> Json<FocusResult> {
    Json(state.handler.focus_view(&req.levels))
}

#[debug_handler]
async fn player_recommendation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<RecommendationResult> {
    state
        .handler
        .recommendation(&id)
        .await
        .map(Json)
        .map_err(map_err)
}

pub fn map_err(e: McpError) -> (StatusCode, String) {
    let status = match &e {
        McpError::UnknownCategory(_) | McpError::Validation(_) => StatusCode::BAD_REQUEST,
        McpError::NotFound(_) => StatusCode::NOT_FOUND,
        McpError::Backend(AppBaseballError::NotFound(_)) => StatusCode::NOT_FOUND,
        McpError::Backend(AppBaseballError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
        McpError::Backend(_) => StatusCode::BAD_GATEWAY,
        McpError::Rubric(_) | McpError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string())
}

pub fn router(state: Arc<AppState>) -> Router {
    let handler = state.handler.clone();
    let factory = move || -> Result<_, std::io::Error> { Ok(handler.clone()) };
    let mcp_service = StreamableHttpService::new(
        factory,
        Arc::new(LocalSessionManager::default()),
        StreamableHttpServerConfig::default(),
    );

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_endpoint))
        .route("/levels/{category}/{level}", get(describe_level))
        .route("/menus/{category}/{level}", get(pick_menu))
        .route("/focus", post(select_focus))
        .route("/players/{id}/recommendation", get(player_recommendation))
        .nest_service("/mcp", mcp_service)
        .with_state(state)
}

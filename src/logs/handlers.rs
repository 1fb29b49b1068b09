use axum::{extract::State, routing::post, Json, Router};
use tracing::{debug, instrument};

use super::dto::{saved_message, AnalyzeRequest};
use super::repo_types::{ActivityLog, LogItem};
use crate::{
    auth::extractors::AuthUser,
    error::{AppJson, AppResult},
    state::AppState,
};

pub fn log_routes() -> Router<AppState> {
    Router::new()
        .route("/logs", post(create_log))
        .route("/analyze", post(analyze))
}

#[instrument(skip(state, item))]
pub async fn create_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(item): AppJson<LogItem>,
) -> AppResult<Json<ActivityLog>> {
    Ok(Json(state.logs.create_single(item).await?))
}

/// POST /analyze { message?, logs: [...] } -> plain text confirmation
#[instrument(skip(state, body))]
pub async fn analyze(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(body): AppJson<AnalyzeRequest>,
) -> AppResult<String> {
    if let Some(message) = body.message.as_deref() {
        debug!(note = message, "analyze request message");
    }
    let written = state.logs.ingest_batch(body.logs).await?;
    Ok(saved_message(written))
}

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{ProgressKey, WatchProgress},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SaveProgressRequest {
    pub profile_id: Uuid,
    pub content_id: Uuid,
    pub episode_id: Option<Uuid>,
    pub progress_seconds: f64,
    pub duration_seconds: f64,
}

#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    pub profile_id: Uuid,
    pub content_id: Uuid,
    pub episode_id: Option<Uuid>,
}

/// Handler for the periodic progress tick from the player
pub async fn save(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SaveProgressRequest>,
) -> AppResult<StatusCode> {
    let key = ProgressKey::new(request.profile_id, request.content_id, request.episode_id);
    state
        .tracker
        .save_progress(key, request.progress_seconds, request.duration_seconds)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for the resume-position lookup
pub async fn fetch(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProgressQuery>,
) -> AppResult<Json<Option<WatchProgress>>> {
    let key = ProgressKey::new(params.profile_id, params.content_id, params.episode_id);
    let row = state.tracker.get_progress(key).await?;
    Ok(Json(row))
}

/// Handler for explicitly marking a tuple completed
pub async fn complete(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProgressQuery>,
) -> AppResult<StatusCode> {
    let key = ProgressKey::new(request.profile_id, request.content_id, request.episode_id);
    state.tracker.mark_completed(key).await?;
    Ok(StatusCode::NO_CONTENT)
}

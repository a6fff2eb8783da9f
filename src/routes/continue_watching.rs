use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{models::ResumeItem, routes::AppState};

#[derive(Debug, Deserialize)]
pub struct ContinueWatchingQuery {
    pub profile_id: Uuid,
    pub limit: Option<usize>,
}

/// Handler for the continue-watching rail
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ContinueWatchingQuery>,
) -> Json<Vec<ResumeItem>> {
    let items = state
        .continue_watching
        .list(params.profile_id, params.limit)
        .await;
    Json(items)
}

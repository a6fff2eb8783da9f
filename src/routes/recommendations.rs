use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{models::Content, routes::AppState};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub profile_id: Uuid,
    pub limit: Option<usize>,
}

/// Handler for the recommendations rail
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecommendationQuery>,
) -> Json<Vec<Content>> {
    let ranked = state
        .recommendations
        .for_profile(params.profile_id, params.limit)
        .await;
    Json(ranked)
}

use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::services::{ContinueWatchingService, ProgressTracker, RecommendationService};

pub mod continue_watching;
pub mod progress;
pub mod recommendations;

/// Shared handler state: the three engine services
pub struct AppState {
    pub tracker: ProgressTracker,
    pub continue_watching: ContinueWatchingService,
    pub recommendations: RecommendationService,
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes(state))
}

/// API routes under /api/v1
fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/progress", post(progress::save).get(progress::fetch))
        .route("/progress/complete", post(progress::complete))
        .route("/continue-watching", get(continue_watching::list))
        .route("/recommendations", get(recommendations::list))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

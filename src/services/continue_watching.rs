use std::sync::Arc;

use uuid::Uuid;

use crate::db::EngineStore;
use crate::models::ResumeItem;

/// Rows at or below this position are treated as accidental taps and kept
/// off the rail
const RESUME_FLOOR_SECONDS: f64 = 30.0;

/// Default rail length when the caller does not ask for one
const DEFAULT_LIMIT: usize = 10;

/// Answers "what should this profile resume?"
///
/// The rail is decorative, not critical path: any persistence failure
/// degrades to an empty list so home-screen rendering is never blocked.
#[derive(Clone)]
pub struct ContinueWatchingService {
    store: Arc<dyn EngineStore>,
}

impl ContinueWatchingService {
    pub fn new(store: Arc<dyn EngineStore>) -> Self {
        Self { store }
    }

    /// Unfinished items for a profile, most recently watched first, each
    /// enriched with its catalog summary, at most `limit` entries
    pub async fn list(&self, profile_id: Uuid, limit: Option<usize>) -> Vec<ResumeItem> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);

        match self
            .store
            .continue_watching(profile_id, RESUME_FLOOR_SECONDS, limit as i64)
            .await
        {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    profile_id = %profile_id,
                    "Failed to load continue watching, returning empty rail"
                );
                Vec::new()
            }
        }
    }
}

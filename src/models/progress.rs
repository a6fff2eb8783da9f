use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ContentSummary;

/// Identity of one progress row
///
/// `episode_id` participates in uniqueness including its `None` state: a
/// movie's progress (no episode) and an episode's progress for the same
/// content are distinct rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgressKey {
    pub profile_id: Uuid,
    pub content_id: Uuid,
    pub episode_id: Option<Uuid>,
}

impl ProgressKey {
    pub fn new(profile_id: Uuid, content_id: Uuid, episode_id: Option<Uuid>) -> Self {
        Self {
            profile_id,
            content_id,
            episode_id,
        }
    }
}

/// One row of the `watch_progress` table: the last known playback state
/// for a (profile, content, episode) tuple
///
/// Values are last-written, not maxima: a rewind regresses
/// `progress_seconds`, and `duration_seconds` tracks whatever the player
/// reported most recently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WatchProgress {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub content_id: Uuid,
    pub episode_id: Option<Uuid>,
    pub progress_seconds: f64,
    pub duration_seconds: f64,
    pub completed: bool,
    pub last_watched: DateTime<Utc>,
}

/// The values written on each progress tick, keyed for upsert
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpsert {
    pub key: ProgressKey,
    pub progress_seconds: f64,
    pub duration_seconds: f64,
    pub completed: bool,
    pub last_watched: DateTime<Utc>,
}

/// Append-only analytics record, one per progress write
///
/// The engine only produces these; they are never read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewEvent {
    pub profile_id: Uuid,
    pub content_id: Uuid,
    pub episode_id: Option<Uuid>,
    pub view_duration: f64,
    pub completed_view: bool,
}

/// One entry of the continue-watching rail: an unfinished progress row
/// enriched with its catalog summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeItem {
    pub progress: WatchProgress,
    pub content: ContentSummary,
}

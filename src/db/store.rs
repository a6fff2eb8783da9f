use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{
    Content, GenrePreference, ProgressKey, ProgressUpsert, ResumeItem, ViewEvent, WatchProgress,
};

/// The remote structured-data store the engine writes progress to and
/// reads rails from
///
/// All engine services hold this behind `Arc<dyn EngineStore>`, keeping
/// the tracker/selector/ranker logic independent of the backing database.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EngineStore: Send + Sync {
    /// Insert-or-update one progress row keyed by
    /// (profile_id, content_id, episode_id), NULL episode included in the key
    async fn upsert_progress(&self, row: &ProgressUpsert) -> AppResult<()>;

    /// Fetch the single progress row for a tuple, if any
    ///
    /// `episode_id = None` matches only rows with a NULL episode.
    async fn fetch_progress(&self, key: &ProgressKey) -> AppResult<Option<WatchProgress>>;

    /// Force a tuple to completed without touching its recorded position
    async fn mark_completed(&self, key: &ProgressKey, at: DateTime<Utc>) -> AppResult<()>;

    /// Append one analytics row; never read back by the engine
    async fn insert_view_event(&self, event: &ViewEvent) -> AppResult<()>;

    /// Unfinished rows for a profile with `progress_seconds > min_progress`,
    /// most recently watched first (row id as the deterministic tie-break),
    /// each joined with its catalog summary
    async fn continue_watching(
        &self,
        profile_id: Uuid,
        min_progress: f64,
        limit: i64,
    ) -> AppResult<Vec<ResumeItem>>;

    /// A profile's genre affinities, highest score first (genre name as the
    /// stable secondary order)
    async fn genre_preferences(&self, profile_id: Uuid) -> AppResult<Vec<GenrePreference>>;

    /// Newest catalog entries, most recently created first
    async fn recent_content(&self, limit: i64) -> AppResult<Vec<Content>>;

    /// Catalog entries tagged with any of the given genres, most recently
    /// created first
    async fn content_in_genres(&self, genres: &[String], limit: i64) -> AppResult<Vec<Content>>;
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{
    Content, ContentKind, ContentSummary, GenrePreference, ProgressKey, ProgressUpsert,
    ResumeItem, ViewEvent, WatchProgress,
};

use super::store::EngineStore;

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Postgres-backed [`EngineStore`]
///
/// The `watch_progress` unique index is declared `NULLS NOT DISTINCT`
/// (see migrations) so the NULL episode_id of movie rows participates in
/// the upsert key.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Flat row shape of the continue-watching join
#[derive(sqlx::FromRow)]
struct ResumeRow {
    id: Uuid,
    profile_id: Uuid,
    content_id: Uuid,
    episode_id: Option<Uuid>,
    progress_seconds: f64,
    duration_seconds: f64,
    completed: bool,
    last_watched: DateTime<Utc>,
    title: String,
    kind: ContentKind,
    genres: Vec<String>,
    poster_url: Option<String>,
}

impl From<ResumeRow> for ResumeItem {
    fn from(row: ResumeRow) -> Self {
        ResumeItem {
            progress: WatchProgress {
                id: row.id,
                profile_id: row.profile_id,
                content_id: row.content_id,
                episode_id: row.episode_id,
                progress_seconds: row.progress_seconds,
                duration_seconds: row.duration_seconds,
                completed: row.completed,
                last_watched: row.last_watched,
            },
            content: ContentSummary {
                id: row.content_id,
                title: row.title,
                kind: row.kind,
                genres: row.genres,
                poster_url: row.poster_url,
            },
        }
    }
}

#[async_trait]
impl EngineStore for PgStore {
    async fn upsert_progress(&self, row: &ProgressUpsert) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO watch_progress (
                profile_id, content_id, episode_id,
                progress_seconds, duration_seconds, completed, last_watched
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (profile_id, content_id, episode_id) DO UPDATE SET
                progress_seconds = EXCLUDED.progress_seconds,
                duration_seconds = EXCLUDED.duration_seconds,
                completed = EXCLUDED.completed,
                last_watched = EXCLUDED.last_watched
            "#,
        )
        .bind(row.key.profile_id)
        .bind(row.key.content_id)
        .bind(row.key.episode_id)
        .bind(row.progress_seconds)
        .bind(row.duration_seconds)
        .bind(row.completed)
        .bind(row.last_watched)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn fetch_progress(&self, key: &ProgressKey) -> AppResult<Option<WatchProgress>> {
        let row = sqlx::query_as::<_, WatchProgress>(
            r#"
            SELECT id, profile_id, content_id, episode_id,
                   progress_seconds, duration_seconds, completed, last_watched
            FROM watch_progress
            WHERE profile_id = $1
              AND content_id = $2
              AND episode_id IS NOT DISTINCT FROM $3
            "#,
        )
        .bind(key.profile_id)
        .bind(key.content_id)
        .bind(key.episode_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn mark_completed(&self, key: &ProgressKey, at: DateTime<Utc>) -> AppResult<()> {
        // Preserves the recorded position/duration when a row already exists
        sqlx::query(
            r#"
            INSERT INTO watch_progress (
                profile_id, content_id, episode_id,
                progress_seconds, duration_seconds, completed, last_watched
            )
            VALUES ($1, $2, $3, 0, 0, true, $4)
            ON CONFLICT (profile_id, content_id, episode_id) DO UPDATE SET
                completed = true,
                last_watched = EXCLUDED.last_watched
            "#,
        )
        .bind(key.profile_id)
        .bind(key.content_id)
        .bind(key.episode_id)
        .bind(at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_view_event(&self, event: &ViewEvent) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO content_views (
                profile_id, content_id, episode_id, view_duration, completed_view
            )
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(event.profile_id)
        .bind(event.content_id)
        .bind(event.episode_id)
        .bind(event.view_duration)
        .bind(event.completed_view)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn continue_watching(
        &self,
        profile_id: Uuid,
        min_progress: f64,
        limit: i64,
    ) -> AppResult<Vec<ResumeItem>> {
        let rows = sqlx::query_as::<_, ResumeRow>(
            r#"
            SELECT wp.id, wp.profile_id, wp.content_id, wp.episode_id,
                   wp.progress_seconds, wp.duration_seconds, wp.completed, wp.last_watched,
                   c.title, c.kind, c.genres, c.poster_url
            FROM watch_progress wp
            JOIN content c ON c.id = wp.content_id
            WHERE wp.profile_id = $1
              AND wp.completed = false
              AND wp.progress_seconds > $2
            ORDER BY wp.last_watched DESC, wp.id
            LIMIT $3
            "#,
        )
        .bind(profile_id)
        .bind(min_progress)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ResumeItem::from).collect())
    }

    async fn genre_preferences(&self, profile_id: Uuid) -> AppResult<Vec<GenrePreference>> {
        let prefs = sqlx::query_as::<_, GenrePreference>(
            r#"
            SELECT genre, preference_score
            FROM user_preferences
            WHERE profile_id = $1
            ORDER BY preference_score DESC, genre
            "#,
        )
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(prefs)
    }

    async fn recent_content(&self, limit: i64) -> AppResult<Vec<Content>> {
        let content = sqlx::query_as::<_, Content>(
            r#"
            SELECT id, title, kind, genres, poster_url, created_at
            FROM content
            ORDER BY created_at DESC, id
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(content)
    }

    async fn content_in_genres(&self, genres: &[String], limit: i64) -> AppResult<Vec<Content>> {
        let content = sqlx::query_as::<_, Content>(
            r#"
            SELECT id, title, kind, genres, poster_url, created_at
            FROM content
            WHERE genres && $1
            ORDER BY created_at DESC, id
            LIMIT $2
            "#,
        )
        .bind(genres)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(content)
    }
}

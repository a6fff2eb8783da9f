use std::sync::Arc;

use chrono::Utc;

use crate::db::EngineStore;
use crate::error::{AppError, AppResult};
use crate::models::{ProgressKey, ProgressUpsert, ViewEvent, WatchProgress};

use super::view_events::ViewEventSender;

/// A watch counts as finished once this share of the duration is reached
const COMPLETION_THRESHOLD: f64 = 0.9;

/// Records playback position per (profile, content, episode) tuple and
/// classifies completion
///
/// The player invokes [`ProgressTracker::save_progress`] on a periodic
/// cadence (10 seconds in the reference player) while media is playing.
/// Persistence failures are logged and swallowed: the next tick retries
/// naturally, and playback must never block on this path.
#[derive(Clone)]
pub struct ProgressTracker {
    store: Arc<dyn EngineStore>,
    events: ViewEventSender,
}

/// True when the player-reported position crosses the completion threshold
///
/// A zero, negative, or non-finite duration is an early-playback estimate
/// and never counts as completed; no division is performed.
fn is_completed(progress_seconds: f64, duration_seconds: f64) -> bool {
    duration_seconds.is_finite()
        && duration_seconds > 0.0
        && progress_seconds >= COMPLETION_THRESHOLD * duration_seconds
}

impl ProgressTracker {
    pub fn new(store: Arc<dyn EngineStore>, events: ViewEventSender) -> Self {
        Self { store, events }
    }

    /// Upserts the last known playback position for a tuple and queues the
    /// matching analytics event
    ///
    /// Nil identifiers and non-finite or negative positions are rejected
    /// with `InvalidInput` before any write. A store failure after
    /// validation is logged and reported as success: the operation is
    /// best-effort by contract.
    pub async fn save_progress(
        &self,
        key: ProgressKey,
        progress_seconds: f64,
        duration_seconds: f64,
    ) -> AppResult<()> {
        validate_key(&key)?;

        if !progress_seconds.is_finite() || progress_seconds < 0.0 {
            return Err(AppError::InvalidInput(format!(
                "progress_seconds must be a non-negative number, got {}",
                progress_seconds
            )));
        }

        // Player-reported duration can be 0 or NaN early in playback;
        // store a zero then so the row stays well-formed.
        let duration_seconds = if duration_seconds.is_finite() && duration_seconds >= 0.0 {
            duration_seconds
        } else {
            0.0
        };

        let completed = is_completed(progress_seconds, duration_seconds);
        let row = ProgressUpsert {
            key,
            progress_seconds,
            duration_seconds,
            completed,
            last_watched: Utc::now(),
        };

        if let Err(e) = self.store.upsert_progress(&row).await {
            tracing::warn!(
                error = %e,
                profile_id = %key.profile_id,
                content_id = %key.content_id,
                "Failed to save watch progress, next tick will retry"
            );
            return Ok(());
        }

        self.events.emit(ViewEvent {
            profile_id: key.profile_id,
            content_id: key.content_id,
            episode_id: key.episode_id,
            view_duration: progress_seconds,
            completed_view: completed,
        });

        Ok(())
    }

    /// Fetches the stored progress row for a tuple, for resume-position UI
    ///
    /// Degrades to `None` on store failure.
    pub async fn get_progress(&self, key: ProgressKey) -> AppResult<Option<WatchProgress>> {
        validate_key(&key)?;

        match self.store.fetch_progress(&key).await {
            Ok(row) => Ok(row),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    profile_id = %key.profile_id,
                    content_id = %key.content_id,
                    "Failed to fetch watch progress"
                );
                Ok(None)
            }
        }
    }

    /// Forces a tuple to completed, e.g. when the player reaches the end
    /// of the stream without a final progress tick
    pub async fn mark_completed(&self, key: ProgressKey) -> AppResult<()> {
        validate_key(&key)?;

        if let Err(e) = self.store.mark_completed(&key, Utc::now()).await {
            tracing::warn!(
                error = %e,
                profile_id = %key.profile_id,
                content_id = %key.content_id,
                "Failed to mark content completed"
            );
        }

        Ok(())
    }
}

/// Rejects nil identifiers, the deserialized stand-in for missing ones
fn validate_key(key: &ProgressKey) -> AppResult<()> {
    if key.profile_id.is_nil() {
        return Err(AppError::InvalidInput("profile_id is required".to_string()));
    }
    if key.content_id.is_nil() {
        return Err(AppError::InvalidInput("content_id is required".to_string()));
    }
    Ok(())
}

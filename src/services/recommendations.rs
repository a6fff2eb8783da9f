use std::sync::Arc;

use uuid::Uuid;

use crate::db::{Cache, CacheKey, EngineStore};
use crate::error::AppResult;
use crate::models::Content;

/// How many top genres feed the personalized query
///
/// Bounds query fan-out and keeps long-tail low-affinity genres from
/// diluting the rail; empirical, not derived.
const TOP_GENRE_COUNT: usize = 3;

/// Default rail length when the caller does not ask for one
const DEFAULT_LIMIT: usize = 20;

/// Seconds a ranked list stays in Redis
const RECOMMENDATION_TTL: u64 = 300;

/// Derives a personalized ranked content list from accumulated genre
/// affinity, with a cold-start fallback to global recency
///
/// Persistence failure yields an empty list, never an error: like the
/// continue-watching rail, recommendations are decorative.
#[derive(Clone)]
pub struct RecommendationService {
    store: Arc<dyn EngineStore>,
    cache: Option<Cache>,
}

impl RecommendationService {
    pub fn new(store: Arc<dyn EngineStore>) -> Self {
        Self { store, cache: None }
    }

    /// Serves ranked lists through the Redis cache; errors there degrade
    /// to a direct store query
    pub fn with_cache(mut self, cache: Cache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Ranked content for a profile, at most `limit` entries
    pub async fn for_profile(&self, profile_id: Uuid, limit: Option<usize>) -> Vec<Content> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        let cache_key = CacheKey::Recommendations(profile_id);

        if let Some(cache) = &self.cache {
            match cache.get_from_cache::<Vec<Content>>(&cache_key).await {
                Ok(Some(hit)) if hit.len() >= limit => {
                    tracing::debug!(profile_id = %profile_id, "Recommendation cache hit");
                    return hit.into_iter().take(limit).collect();
                }
                Ok(_) => {
                    tracing::debug!(profile_id = %profile_id, "Recommendation cache miss");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Recommendation cache unavailable");
                }
            }
        }

        match self.rank(profile_id, limit).await {
            Ok(ranked) => {
                if let Some(cache) = &self.cache {
                    cache.set_in_background(&cache_key, &ranked, RECOMMENDATION_TTL);
                }
                ranked
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    profile_id = %profile_id,
                    "Failed to rank recommendations, returning empty rail"
                );
                Vec::new()
            }
        }
    }

    /// The ranking policy proper
    ///
    /// Cold start (no affinity rows) falls back to global recency. The
    /// personalized branch stays empty when nothing is tagged with the top
    /// genres; it does not fall back to recency.
    async fn rank(&self, profile_id: Uuid, limit: usize) -> AppResult<Vec<Content>> {
        let preferences = self.store.genre_preferences(profile_id).await?;

        if preferences.is_empty() {
            tracing::debug!(profile_id = %profile_id, "Cold start, ranking by recency");
            return self.store.recent_content(limit as i64).await;
        }

        let top_genres: Vec<String> = preferences
            .into_iter()
            .take(TOP_GENRE_COUNT)
            .map(|p| p.genre)
            .collect();

        tracing::debug!(
            profile_id = %profile_id,
            genres = ?top_genres,
            "Ranking by top genres"
        );

        self.store.content_in_genres(&top_genres, limit as i64).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::MockEngineStore;
    use crate::error::AppError;
    use crate::models::GenrePreference;

    fn preference(genre: &str, score: f64) -> GenrePreference {
        GenrePreference {
            genre: genre.to_string(),
            preference_score: score,
        }
    }

    #[tokio::test]
    async fn test_cold_start_uses_recency() {
        let mut store = MockEngineStore::new();
        store
            .expect_genre_preferences()
            .returning(|_| Ok(Vec::new()));
        store
            .expect_recent_content()
            .withf(|limit| *limit == 20)
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let service = RecommendationService::new(Arc::new(store));
        service.for_profile(Uuid::new_v4(), None).await;
    }

    #[tokio::test]
    async fn test_personalized_branch_takes_top_three_genres() {
        let mut store = MockEngineStore::new();
        store.expect_genre_preferences().returning(|_| {
            Ok(vec![
                preference("drama", 10.0),
                preference("comedy", 7.0),
                preference("horror", 5.0),
                preference("action", 1.0),
            ])
        });
        store
            .expect_content_in_genres()
            .withf(|genres: &[String], _| genres == ["drama", "comedy", "horror"])
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        let service = RecommendationService::new(Arc::new(store));
        service.for_profile(Uuid::new_v4(), None).await;
    }

    #[tokio::test]
    async fn test_empty_personalized_result_stays_empty() {
        let mut store = MockEngineStore::new();
        store
            .expect_genre_preferences()
            .returning(|_| Ok(vec![preference("drama", 10.0)]));
        store
            .expect_content_in_genres()
            .returning(|_, _| Ok(Vec::new()));
        // No recency fallback: recent_content must not be called
        store.expect_recent_content().times(0);

        let service = RecommendationService::new(Arc::new(store));
        let ranked = service.for_profile(Uuid::new_v4(), None).await;
        assert!(ranked.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_yields_empty_rail() {
        let mut store = MockEngineStore::new();
        store
            .expect_genre_preferences()
            .returning(|_| Err(AppError::Internal("backend unavailable".to_string())));

        let service = RecommendationService::new(Arc::new(store));
        let ranked = service.for_profile(Uuid::new_v4(), None).await;
        assert!(ranked.is_empty());
    }
}

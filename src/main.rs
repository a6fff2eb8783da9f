use std::sync::Arc;

use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use reeltrack::config::Config;
use reeltrack::db::{self, Cache, EngineStore, PgStore};
use reeltrack::routes::{create_router, AppState};
use reeltrack::services::{
    spawn_view_event_writer, ContinueWatchingService, ProgressTracker, RecommendationService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // Persistence collaborator
    let pool = db::create_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    let store: Arc<dyn EngineStore> = Arc::new(PgStore::new(pool));

    // Redis-backed rail cache with its background writer
    let redis_client = db::create_redis_client(&config.redis_url)?;
    let (cache, cache_writer) = Cache::new(redis_client).await;

    // Fire-and-forget analytics channel
    let (view_events, view_event_writer) = spawn_view_event_writer(store.clone());

    let state = Arc::new(AppState {
        tracker: ProgressTracker::new(store.clone(), view_events),
        continue_watching: ContinueWatchingService::new(store.clone()),
        recommendations: RecommendationService::new(store).with_cache(cache),
    });

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Flush the background writers before exiting
    view_event_writer.shutdown().await;
    cache_writer.shutdown().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}

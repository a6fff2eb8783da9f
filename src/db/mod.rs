pub mod cache;
pub mod postgres;
pub mod store;

pub use cache::create_redis_client;
pub use cache::Cache;
pub use cache::CacheKey;
pub use cache::CacheWriterHandle;
pub use postgres::create_pool;
pub use postgres::PgStore;
pub use store::EngineStore;

//! Application state shared across all request handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use crate::config::Config;
use crate::storage::{self, SharedStore, StorageError};

/// Cached HTML response with metadata.
#[derive(Clone, Debug)]
pub struct CachedHtml {
    /// Rendered HTML string.
    pub html: String,
    /// When this entry was cached.
    pub cached_at: chrono::DateTime<chrono::Utc>,
}

/// Type alias for the rendered page cache.
pub type PageCache = Cache<String, CachedHtml>;

/// Rendered page cache capacity. Pages are a few KB each.
const PAGE_CACHE_CAPACITY: u64 = 10_000;

/// Saved profiles are never edited, so entries only expire to bound memory.
const PAGE_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Profile storage backend.
    pub store: SharedStore,

    /// Application configuration.
    pub config: Arc<Config>,

    /// In-memory cache of rendered profile pages keyed by identifier.
    pub cache: PageCache,
}

impl AppState {
    /// Create application state, building the configured storage backend.
    pub fn new(config: Config) -> Result<Self, StorageError> {
        let store = storage::from_config(&config)?;
        Ok(Self::with_store(config, store))
    }

    /// Create application state around an existing backend.
    pub fn with_store(config: Config, store: SharedStore) -> Self {
        let cache = Cache::builder()
            .max_capacity(PAGE_CACHE_CAPACITY)
            .time_to_live(PAGE_CACHE_TTL)
            .build();

        tracing::info!(
            backend = store.backend_name(),
            cache_capacity = PAGE_CACHE_CAPACITY,
            cache_ttl_secs = PAGE_CACHE_TTL.as_secs(),
            "application state initialized"
        );

        Self {
            store,
            config: Arc::new(config),
            cache,
        }
    }
}

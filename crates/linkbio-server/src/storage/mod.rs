//! Profile storage backends.
//!
//! Handlers only see [`ProfileStore`]. The concrete backend is picked once
//! at startup from [`Config::storage`] and shared through `AppState`.
//!
//! | Backend | Enumerates keys | Notes |
//! |---------|-----------------|-------|
//! | [`MemoryStore`] | yes | tests and local development |
//! | [`FileStore`] | yes | whole file rewritten on every save |
//! | [`KvRestStore`] | no | Upstash / Vercel KV REST API |

mod file;
mod kv;
mod memory;

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::{Config, StorageKind};

pub use self::file::FileStore;
pub use self::kv::KvRestStore;
pub use self::memory::MemoryStore;

/// Shared handle to the configured backend.
pub type SharedStore = Arc<dyn ProfileStore>;

/// Storage backend errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A required configuration variable is missing.
    #[error("{variable} is not set")]
    NotConfigured {
        /// Name of the missing environment variable.
        variable: &'static str,
    },

    /// File system error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport error talking to a remote backend.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with an error.
    #[error("backend error: {0}")]
    Backend(String),

    /// The store file exists but does not hold a JSON array.
    #[error("corrupt store file {path}: {reason}")]
    Corrupt {
        /// Path of the offending file.
        path: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Key-value persistence for saved profile payloads.
///
/// Payloads are opaque JSON; interpretation happens on read in
/// [`linkbio_core::normalize`].
#[async_trait]
pub trait ProfileStore: Send + Sync + 'static {
    /// Load the payload stored under `id`.
    async fn get(&self, id: &str) -> Result<Option<Value>, StorageError>;

    /// Store `value` under `id`, replacing any previous payload.
    async fn set(&self, id: &str, value: &Value) -> Result<(), StorageError>;

    /// Whether a payload exists under `id`.
    async fn exists(&self, id: &str) -> Result<bool, StorageError> {
        Ok(self.get(id).await?.is_some())
    }

    /// Every stored identifier, or `None` when the backend cannot
    /// enumerate its keys cheaply.
    async fn list_ids(&self) -> Result<Option<HashSet<String>>, StorageError> {
        Ok(None)
    }

    /// Short backend name for logs and the health endpoint.
    fn backend_name(&self) -> &'static str;
}

/// Build the backend selected by the configuration.
pub fn from_config(config: &Config) -> Result<SharedStore, StorageError> {
    let store: SharedStore = match config.storage {
        StorageKind::Memory => Arc::new(MemoryStore::new()),
        StorageKind::File => Arc::new(FileStore::new(&config.db_path)),
        StorageKind::Kv => Arc::new(KvRestStore::new(config.kv.clone())?),
    };

    tracing::info!(backend = store.backend_name(), "storage backend ready");

    Ok(store)
}

//! Application configuration loaded from environment variables.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use linkbio_core::Alphabet;

use crate::storage::StorageError;

/// Which storage backend profiles are persisted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// Process-local map, lost on restart.
    Memory,
    /// Single JSON array file on disk.
    File,
    /// Redis-compatible KV service over its REST API.
    Kv,
}

impl FromStr for StorageKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            "kv" | "redis" | "upstash" => Ok(Self::Kv),
            other => anyhow::bail!("unknown LINKBIO_STORAGE value '{other}' (expected memory, file or kv)"),
        }
    }
}

/// Connection settings for the KV REST backend.
///
/// Credentials stay optional here; their absence is reported when the
/// backend is first used, naming the missing variable.
#[derive(Clone)]
pub struct KvConfig {
    /// REST endpoint URL.
    pub url: Option<String>,
    /// Bearer token.
    pub token: Option<String>,
    /// Environment variable the URL was (or should have been) read from.
    pub url_var: &'static str,
    /// Environment variable the token was (or should have been) read from.
    pub token_var: &'static str,
    /// Prefix prepended to every identifier to form the key.
    pub key_prefix: String,
    /// Optional expiry applied on write.
    pub ttl: Option<Duration>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl KvConfig {
    /// Return the endpoint and token, or the first missing variable.
    pub fn credentials(&self) -> Result<(&str, &str), StorageError> {
        let url = self.url.as_deref().ok_or(StorageError::NotConfigured {
            variable: self.url_var,
        })?;
        let token = self.token.as_deref().ok_or(StorageError::NotConfigured {
            variable: self.token_var,
        })?;
        Ok((url, token))
    }

    /// Read KV settings, preferring the `KV_REST_API_*` pair over the
    /// `UPSTASH_REDIS_REST_*` pair.
    fn from_env() -> anyhow::Result<Self> {
        let kv_url = non_empty_var("KV_REST_API_URL");
        let kv_token = non_empty_var("KV_REST_API_TOKEN");
        let upstash_url = non_empty_var("UPSTASH_REDIS_REST_URL");
        let upstash_token = non_empty_var("UPSTASH_REDIS_REST_TOKEN");

        let use_upstash =
            kv_url.is_none() && kv_token.is_none() && (upstash_url.is_some() || upstash_token.is_some());

        let (url, token, url_var, token_var) = if use_upstash {
            (
                upstash_url,
                upstash_token,
                "UPSTASH_REDIS_REST_URL",
                "UPSTASH_REDIS_REST_TOKEN",
            )
        } else {
            (kv_url, kv_token, "KV_REST_API_URL", "KV_REST_API_TOKEN")
        };

        let key_prefix = std::env::var("KV_KEY_PREFIX").unwrap_or_else(|_| "user:".to_string());

        let ttl = match non_empty_var("KV_TTL_SECS") {
            Some(v) => Some(Duration::from_secs(v.parse().map_err(|e| {
                anyhow::anyhow!("KV_TTL_SECS must be a number of seconds: {e}")
            })?)),
            None => None,
        };

        let timeout_secs: u64 = match non_empty_var("KV_TIMEOUT_SECS") {
            Some(v) => v
                .parse()
                .map_err(|e| anyhow::anyhow!("KV_TIMEOUT_SECS must be a number of seconds: {e}"))?,
            None => 5,
        };

        Ok(Self {
            url: url.map(|u| u.trim_end_matches('/').to_string()),
            token,
            url_var,
            token_var,
            key_prefix,
            ttl,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl fmt::Debug for KvConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KvConfig")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("url_var", &self.url_var)
            .field("token_var", &self.token_var)
            .field("key_prefix", &self.key_prefix)
            .field("ttl", &self.ttl)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8082").
    pub bind_addr: String,

    /// Public base URL, used for canonical and Open Graph URLs.
    pub base_url: String,

    /// Site name shown in page titles and the footer.
    pub site_name: String,

    /// Selected storage backend.
    pub storage: StorageKind,

    /// JSON file used by the file backend.
    pub db_path: PathBuf,

    /// Alphabet new identifiers are drawn from.
    pub alphabet: Alphabet,

    /// Maximum accepted size of a save request body.
    pub max_body_bytes: usize,

    /// KV REST backend settings.
    pub kv: KvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `LINKBIO_BIND_ADDR`: Server bind address (default: "0.0.0.0:8082")
    /// - `LINKBIO_BASE_URL`: Public base URL (default: "http://localhost:8082")
    /// - `LINKBIO_SITE_NAME`: Site name (default: "linkbio")
    /// - `LINKBIO_STORAGE`: `memory`, `file` or `kv` (default: "file")
    /// - `LINKBIO_DB_PATH`: File backend path (default: "data/db.json")
    /// - `LINKBIO_ID_ALPHABET`: `mixed` or `lower` (default: "mixed")
    /// - `LINKBIO_MAX_BODY_BYTES`: Save body limit (default: 65536)
    /// - `KV_REST_API_URL` / `KV_REST_API_TOKEN`, or
    ///   `UPSTASH_REDIS_REST_URL` / `UPSTASH_REDIS_REST_TOKEN`: KV credentials
    /// - `KV_KEY_PREFIX` (default: "user:"), `KV_TTL_SECS`, `KV_TIMEOUT_SECS` (default: 5)
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("LINKBIO_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8082".to_string());

        let base_url = std::env::var("LINKBIO_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8082".to_string())
            .trim_end_matches('/')
            .to_string();

        let site_name =
            std::env::var("LINKBIO_SITE_NAME").unwrap_or_else(|_| "linkbio".to_string());

        let storage = match non_empty_var("LINKBIO_STORAGE") {
            Some(v) => v.parse()?,
            None => StorageKind::File,
        };

        let db_path = std::env::var("LINKBIO_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/db.json"));

        let alphabet = match non_empty_var("LINKBIO_ID_ALPHABET")
            .as_deref()
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            None | Some("mixed") => Alphabet::MIXED_CASE,
            Some("lower") => Alphabet::LOWERCASE,
            Some(other) => anyhow::bail!(
                "unknown LINKBIO_ID_ALPHABET value '{other}' (expected mixed or lower)"
            ),
        };

        let max_body_bytes = match non_empty_var("LINKBIO_MAX_BODY_BYTES") {
            Some(v) => v
                .parse()
                .map_err(|e| anyhow::anyhow!("LINKBIO_MAX_BODY_BYTES must be a byte count: {e}"))?,
            None => 64 * 1024,
        };

        let kv = KvConfig::from_env()?;

        if storage == StorageKind::Kv {
            if let Err(err) = kv.credentials() {
                tracing::warn!(error = %err, "KV storage selected but not configured");
            }
        }

        tracing::info!(
            bind_addr = %bind_addr,
            base_url = %base_url,
            site_name = %site_name,
            storage = ?storage,
            db_path = %db_path.display(),
            alphabet_size = alphabet.len(),
            "linkbio configuration loaded"
        );

        Ok(Self {
            bind_addr,
            base_url,
            site_name,
            storage,
            db_path,
            alphabet,
            max_body_bytes,
            kv,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

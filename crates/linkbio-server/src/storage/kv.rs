//! Redis-compatible KV storage over a REST API (Upstash, Vercel KV).
//!
//! Commands are POSTed to the endpoint root as a JSON array, e.g.
//! `["SET", "user:aB3xYz", "{...}"]`, authenticated with a bearer token.
//! Replies are `{"result": ...}` on success and `{"error": "..."}` on failure.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{ProfileStore, StorageError};
use crate::config::KvConfig;

/// Reply envelope of the REST API.
#[derive(Debug, Deserialize)]
struct KvReply {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<String>,
}

/// Profiles stored as JSON strings in a remote KV service.
pub struct KvRestStore {
    client: reqwest::Client,
    config: KvConfig,
}

impl KvRestStore {
    /// Build the HTTP client. Missing credentials are not an error here;
    /// they surface on first use.
    pub fn new(config: KvConfig) -> Result<Self, StorageError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    fn key(&self, id: &str) -> String {
        format!("{}{id}", self.config.key_prefix)
    }

    /// Send one command and return its `result`.
    async fn command(&self, args: &Value) -> Result<Value, StorageError> {
        let (url, token) = self.config.credentials()?;

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(args)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        let reply: KvReply = match serde_json::from_str(&body) {
            Ok(reply) => reply,
            Err(_) if !status.is_success() => {
                return Err(StorageError::Backend(format!("{status}: {}", body.trim())));
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(error) = reply.error {
            return Err(StorageError::Backend(error));
        }
        if !status.is_success() {
            return Err(StorageError::Backend(status.to_string()));
        }

        Ok(reply.result)
    }
}

/// Turn a `GET` result back into the stored JSON.
///
/// Values are written as JSON strings, but a string that does not parse
/// (written by another client) is returned as a plain JSON string.
fn decode_stored(result: Value) -> Option<Value> {
    match result {
        Value::Null => None,
        Value::String(s) => Some(serde_json::from_str(&s).unwrap_or(Value::String(s))),
        other => Some(other),
    }
}

#[async_trait]
impl ProfileStore for KvRestStore {
    async fn get(&self, id: &str) -> Result<Option<Value>, StorageError> {
        let result = self.command(&json!(["GET", self.key(id)])).await?;
        Ok(decode_stored(result))
    }

    async fn set(&self, id: &str, value: &Value) -> Result<(), StorageError> {
        let mut args = vec![
            json!("SET"),
            json!(self.key(id)),
            Value::String(serde_json::to_string(value)?),
        ];
        if let Some(ttl) = self.config.ttl {
            args.push(json!("EX"));
            args.push(json!(ttl.as_secs()));
        }

        let result = self.command(&Value::Array(args)).await?;
        if result != json!("OK") {
            tracing::warn!(id = %id, result = %result, "unexpected SET reply");
        }

        Ok(())
    }

    async fn exists(&self, id: &str) -> Result<bool, StorageError> {
        let result = self.command(&json!(["EXISTS", self.key(id)])).await?;
        Ok(result.as_u64().is_some_and(|n| n > 0))
    }

    fn backend_name(&self) -> &'static str {
        "kv"
    }
}

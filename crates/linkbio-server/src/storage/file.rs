//! JSON file storage backend.
//!
//! The file holds a single array of records:
//!
//! ```json
//! [
//!   { "uniqueId": "aB3xYz", "data": { ... } }
//! ]
//! ```
//!
//! Every save reads the whole file, updates it and writes it back through
//! a temporary file plus rename. Saves within one process are serialized;
//! several processes writing the same file can still lose updates.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;

use super::{ProfileStore, StorageError};

/// One entry of the store file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileRecord {
    unique_id: String,
    data: Value,
}

/// Profiles persisted as a JSON array in a single file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Use the file at `path`. It is created on first save.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record. A missing file is an empty store; entries that
    /// are not `{uniqueId, data}` objects are skipped.
    async fn load(&self) -> Result<Vec<FileRecord>, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let parsed: Value = serde_json::from_slice(&bytes).map_err(|e| self.corrupt(e))?;
        let Value::Array(entries) = parsed else {
            return Err(self.corrupt("expected a JSON array"));
        };

        let total = entries.len();
        let records: Vec<FileRecord> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();

        if records.len() != total {
            tracing::warn!(
                path = %self.path.display(),
                skipped = total - records.len(),
                "skipped malformed entries in store file"
            );
        }

        Ok(records)
    }

    /// Write every record, replacing the file atomically.
    async fn persist(&self, records: &[FileRecord]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_vec_pretty(records)?;
        let tmp_path = self.tmp_path();
        tokio::fs::write(&tmp_path, &json).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "db.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn corrupt(&self, reason: impl ToString) -> StorageError {
        StorageError::Corrupt {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl ProfileStore for FileStore {
    async fn get(&self, id: &str) -> Result<Option<Value>, StorageError> {
        let records = match self.load().await {
            Ok(records) => records,
            Err(err @ StorageError::Corrupt { .. }) => {
                // Reads stay available; saves refuse to overwrite the file.
                tracing::warn!(error = %err, "store file unreadable, treating as empty");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        Ok(records
            .into_iter()
            .find(|record| record.unique_id == id)
            .map(|record| record.data))
    }

    async fn set(&self, id: &str, value: &Value) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load().await?;
        match records.iter_mut().find(|record| record.unique_id == id) {
            Some(existing) => existing.data = value.clone(),
            None => records.push(FileRecord {
                unique_id: id.to_string(),
                data: value.clone(),
            }),
        }

        self.persist(&records).await?;

        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            "store file written"
        );

        Ok(())
    }

    async fn list_ids(&self) -> Result<Option<HashSet<String>>, StorageError> {
        let records = self.load().await?;
        Ok(Some(records.into_iter().map(|r| r.unique_id).collect()))
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

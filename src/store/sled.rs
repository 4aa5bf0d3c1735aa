//! Sled-backed chat record store
//!
//! The one on-disk schema this crate supports: a single sled tree where the
//! key is the UTF-8 chat id and the value is the record's compact JSON
//! bytes. Mutations flush before returning so a completed delete survives a
//! crash.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use directories::ProjectDirs;
use serde_json::Value;
use sled::Db;

use crate::error::{Result, SweepError};
use crate::store::{ChatStore, Enumeration};

/// Environment variable overriding the default store location
pub const STORE_PATH_ENV: &str = "CHATSWEEP_STORE";

/// [`ChatStore`] over an embedded sled database
pub struct SledStore {
    db: Db,
}

impl SledStore {
    /// Open or create a store at the given path
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::StoreUnavailable`] when the database cannot be
    /// opened (missing permissions, held lock, corrupt tree).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = sled::open(path.as_ref()).map_err(|e| {
            SweepError::StoreUnavailable(format!(
                "failed to open store at {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Ok(Self { db })
    }

    /// Open the store at its default location
    ///
    /// Honors the `CHATSWEEP_STORE` environment variable, falling back to
    /// `chats.sled` under the user data directory. The parent directory is
    /// created if needed.
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    /// Resolve the default store path without opening it
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(override_path) = std::env::var(STORE_PATH_ENV) {
            return Ok(PathBuf::from(override_path));
        }

        let proj_dirs = ProjectDirs::from("com", "chatsweep", "chatsweep").ok_or_else(|| {
            SweepError::StoreUnavailable("could not determine data directory".to_string())
        })?;

        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join("chats.sled"))
    }
}

#[async_trait]
impl ChatStore for SledStore {
    async fn enumerate(&self) -> Result<Enumeration> {
        let mut entries = Vec::new();
        let mut failure = None;

        for item in self.db.iter() {
            let (key, value) = match item {
                Ok(pair) => pair,
                Err(e) => {
                    failure = Some(SweepError::StoreUnavailable(format!(
                        "enumeration interrupted: {}",
                        e
                    )));
                    break;
                }
            };

            let id = String::from_utf8_lossy(&key).to_string();
            match serde_json::from_slice(&value) {
                Ok(record) => entries.push((id, record)),
                Err(e) => {
                    // Corrupt bytes still count as a record; surface them
                    // with a null body so the scan can report the id.
                    tracing::warn!(chat = %id, "record is not valid JSON: {}", e);
                    entries.push((id, Value::Null));
                }
            }
        }

        Ok(Enumeration { entries, failure })
    }

    async fn get(&self, id: &str) -> Result<Option<Value>> {
        match self
            .db
            .get(id.as_bytes())
            .map_err(|e| SweepError::StoreUnavailable(format!("get failed: {}", e)))?
        {
            Some(bytes) => {
                let record = serde_json::from_slice(&bytes).map_err(|e| {
                    SweepError::MalformedRecord(format!("record {} is not valid JSON: {}", id, e))
                })?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, id: &str, record: &Value) -> Result<()> {
        let bytes = serde_json::to_vec(record)?;

        self.db
            .insert(id.as_bytes(), bytes)
            .map_err(|e| SweepError::Write(format!("insert failed: {}", e)))?;
        self.db
            .flush_async()
            .await
            .map_err(|e| SweepError::Write(format!("flush failed: {}", e)))?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.db
            .remove(id.as_bytes())
            .map_err(|e| SweepError::Write(format!("remove failed: {}", e)))?;
        self.db
            .flush_async()
            .await
            .map_err(|e| SweepError::Write(format!("flush failed: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serial_test::serial;
    use tempfile::tempdir;

    fn create_test_store() -> (SledStore, tempfile::TempDir) {
        let dir = tempdir().expect("failed to create tempdir");
        let store = SledStore::open(dir.path().join("chats.sled")).expect("failed to open store");
        (store, dir)
    }

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let (store, _dir) = create_test_store();
        let record = json!({ "title": "Budget", "messages": [{ "content": "hi" }] });

        store.put("chat-1", &record).await.expect("put failed");
        let loaded = store.get("chat-1").await.expect("get failed");
        assert_eq!(loaded, Some(record));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let (store, _dir) = create_test_store();
        assert_eq!(store.get("missing").await.expect("get failed"), None);
    }

    #[tokio::test]
    async fn test_put_replaces_whole_record() {
        let (store, _dir) = create_test_store();
        store
            .put("chat-1", &json!({ "title": "old", "extra": true }))
            .await
            .expect("first put failed");
        store
            .put("chat-1", &json!({ "title": "new" }))
            .await
            .expect("second put failed");

        let loaded = store.get("chat-1").await.expect("get failed");
        assert_eq!(loaded, Some(json!({ "title": "new" })));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (store, _dir) = create_test_store();
        store.put("chat-1", &json!({})).await.expect("put failed");

        store.delete("chat-1").await.expect("first delete failed");
        store.delete("chat-1").await.expect("second delete failed");
        assert_eq!(store.get("chat-1").await.expect("get failed"), None);
    }

    #[tokio::test]
    async fn test_enumerate_lists_all_records() {
        let (store, _dir) = create_test_store();
        for i in 0..4 {
            store
                .put(&format!("chat-{}", i), &json!({ "title": format!("t{}", i) }))
                .await
                .expect("put failed");
        }

        let enumeration = store.enumerate().await.expect("enumerate failed");
        assert_eq!(enumeration.entries.len(), 4);
        assert!(enumeration.failure.is_none());
    }

    #[tokio::test]
    async fn test_open_fails_when_path_is_a_file() {
        let dir = tempdir().expect("failed to create tempdir");
        let path = dir.path().join("not-a-db");
        std::fs::write(&path, b"plain file").expect("write failed");

        let result = SledStore::open(&path);
        assert!(matches!(result, Err(SweepError::StoreUnavailable(_))));
    }

    #[test]
    #[serial]
    fn test_default_path_respects_env_override() {
        let dir = tempdir().expect("failed to create tempdir");
        let override_path = dir.path().join("alt.sled");
        std::env::set_var(STORE_PATH_ENV, &override_path);

        let resolved = SledStore::default_path().expect("default_path failed");
        assert_eq!(resolved, override_path);

        std::env::remove_var(STORE_PATH_ENV);
    }
}

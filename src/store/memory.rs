//! In-process chat store for unit and integration tests
//!
//! [`MemoryStore`] replaces the on-disk store in tests the way a fake
//! collaborator would: it implements the full [`ChatStore`] contract over a
//! `BTreeMap` (deterministic enumeration order) and exposes failure
//! injection so scan error paths can be exercised:
//!
//! - [`MemoryStore::set_unavailable`] makes every operation fail with
//!   [`SweepError::StoreUnavailable`].
//! - [`MemoryStore::fail_enumeration_after`] cuts enumeration off after N
//!   records, producing a partial [`Enumeration`].

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Result, SweepError};
use crate::store::{ChatStore, Enumeration};

/// In-memory [`ChatStore`] with failure injection
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<String, Value>>,
    unavailable: AtomicBool,
    fail_after: Mutex<Option<usize>>,
}

impl MemoryStore {
    /// An empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `(id, record)` pairs
    pub fn with_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let store = Self::new();
        store
            .lock_records()
            .extend(records);
        store
    }

    /// Make every subsequent operation fail as unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Cut the next enumerations off after `n` records
    pub fn fail_enumeration_after(&self, n: usize) {
        *self
            .fail_after
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(n);
    }

    /// Current copy of one record, for byte-level assertions in tests
    pub fn snapshot(&self, id: &str) -> Option<Value> {
        self.lock_records().get(id).cloned()
    }

    /// Number of records currently held
    pub fn len(&self) -> usize {
        self.lock_records().len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.lock_records().is_empty()
    }

    fn lock_records(&self) -> MutexGuard<'_, BTreeMap<String, Value>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(SweepError::StoreUnavailable(
                "memory store marked unavailable".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ChatStore for MemoryStore {
    async fn enumerate(&self) -> Result<Enumeration> {
        self.check_available()?;

        let limit = *self
            .fail_after
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let records = self.lock_records();

        let mut entries = Vec::new();
        for (id, record) in records.iter() {
            if let Some(limit) = limit {
                if entries.len() >= limit {
                    return Ok(Enumeration {
                        entries,
                        failure: Some(SweepError::StoreUnavailable(format!(
                            "enumeration interrupted after {} records",
                            limit
                        ))),
                    });
                }
            }
            entries.push((id.clone(), record.clone()));
        }

        Ok(Enumeration {
            entries,
            failure: None,
        })
    }

    async fn get(&self, id: &str) -> Result<Option<Value>> {
        self.check_available()?;
        Ok(self.lock_records().get(id).cloned())
    }

    async fn put(&self, id: &str, record: &Value) -> Result<()> {
        self.check_available()?;
        self.lock_records().insert(id.to_string(), record.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.check_available()?;
        self.lock_records().remove(id);
        Ok(())
    }
}

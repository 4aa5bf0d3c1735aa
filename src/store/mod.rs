//! Attachment-host bridge: access to the external chat record store
//!
//! The store is a flat key-value space owned by the chat application, not by
//! this crate: keys are opaque chat ids, values are whole chat records as
//! JSON. [`ChatStore`] is the seam the scanner works against; [`SledStore`]
//! is the on-disk implementation and [`MemoryStore`] the in-process one used
//! by tests.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Result, SweepError};

pub mod memory;
pub mod sled;

pub use self::sled::SledStore;
pub use memory::MemoryStore;

/// Outcome of a full store enumeration
///
/// Enumeration is not restartable mid-walk, so a failure partway through
/// does not discard what was already read: `entries` holds everything
/// collected before the cut, and `failure` records why the walk stopped
/// early, if it did.
#[derive(Debug)]
pub struct Enumeration {
    /// `(chat id, record)` pairs in store order
    pub entries: Vec<(String, Value)>,
    /// Set when enumeration stopped before reaching the end
    pub failure: Option<SweepError>,
}

/// Handle to a chat record store
///
/// Implementations must be safe to share across tasks. Ordering of
/// enumeration is implementation-defined but stable for an unchanged store.
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Enumerate all records
    ///
    /// Fails with [`SweepError::StoreUnavailable`] only when the store
    /// cannot be reached at all; a failure mid-walk is reported through
    /// [`Enumeration::failure`] instead.
    async fn enumerate(&self) -> Result<Enumeration>;

    /// Fetch one record by id, `None` when absent
    async fn get(&self, id: &str) -> Result<Option<Value>>;

    /// Replace one record in full
    ///
    /// Fails with [`SweepError::Write`] when the store rejects the write.
    async fn put(&self, id: &str, record: &Value) -> Result<()>;

    /// Delete one record; removing a missing id is a no-op success
    async fn delete(&self, id: &str) -> Result<()>;
}

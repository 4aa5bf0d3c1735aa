//! Chat inventory scanner
//!
//! The core of the crate: enumerate the store, derive a [`ChatSummary`] per
//! record, rank by serialized size, and delete whole chats or single
//! attachments. Scans never mutate the store; deletes always re-fetch and
//! validate against the current record rather than trusting a summary
//! captured earlier.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::Value;

use crate::config::EmptyMessagePolicy;
use crate::error::{Result, SweepError};
use crate::record;
use crate::store::ChatStore;

pub mod classify;
pub mod summary;

pub use classify::{AttachmentKind, Classifier, Confidence, PartClass};
pub use summary::{AttachmentEntry, ChatSummary, Locator, ScanReport};

/// Default bound on any single store call
const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

/// Chat inventory scanner over a [`ChatStore`]
pub struct Scanner {
    store: Arc<dyn ChatStore>,
    classifier: Classifier,
    timeout: Duration,
    empty_message: EmptyMessagePolicy,
}

impl Scanner {
    /// Scanner with default options (10s store timeout, empty messages kept)
    pub fn new(store: Arc<dyn ChatStore>) -> Self {
        Self {
            store,
            classifier: Classifier::new(),
            timeout: DEFAULT_STORE_TIMEOUT,
            empty_message: EmptyMessagePolicy::Keep,
        }
    }

    /// Bound every store call to the given duration
    ///
    /// The host store may never respond when the underlying storage is
    /// blocked or absent; expiry surfaces as
    /// [`SweepError::StoreUnavailable`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Policy for a message whose content becomes empty after an
    /// attachment delete
    pub fn with_empty_message_policy(mut self, policy: EmptyMessagePolicy) -> Self {
        self.empty_message = policy;
        self
    }

    /// Scan the whole store and rank chats by serialized size
    ///
    /// Read-only. Malformed records degrade to best-effort defaults
    /// (`message_count = 0`, no attachment flags) instead of aborting the
    /// scan. A failure partway through enumeration is reported via
    /// [`ScanReport::failure`] with the already-collected summaries intact.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::StoreUnavailable`] when the store cannot be
    /// reached at all or does not respond within the timeout.
    pub async fn scan(&self) -> Result<ScanReport> {
        tracing::info!("scanning chat store");
        let enumeration = self.bounded(self.store.enumerate()).await?;

        let mut chats: Vec<ChatSummary> = enumeration
            .entries
            .iter()
            .map(|(id, rec)| self.summarize(id, rec))
            .collect();

        // Stable sort: ties keep store enumeration order.
        chats.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));

        let failure = enumeration.failure.map(|e| e.to_string());
        if let Some(reason) = &failure {
            tracing::warn!("partial scan: {}", reason);
        }
        tracing::info!(chats = chats.len(), "scan complete");

        Ok(ScanReport {
            scanned_at: Utc::now(),
            chats,
            failure,
        })
    }

    /// Summarize a single chat from its current record
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::NotFound`] when the id is absent.
    pub async fn inspect(&self, id: &str) -> Result<ChatSummary> {
        let record = self
            .bounded(self.store.get(id))
            .await?
            .ok_or_else(|| SweepError::NotFound(id.to_string()))?;
        Ok(self.summarize(id, &record))
    }

    /// Remove a whole chat record
    ///
    /// Idempotent: deleting an id that is not present succeeds without
    /// effect. Any summary a caller still holds for this id is invalid
    /// afterwards.
    pub async fn delete_chat(&self, id: &str) -> Result<()> {
        self.bounded(self.store.delete(id)).await?;
        tracing::info!(chat = %id, "deleted chat");
        Ok(())
    }

    /// Remove exactly one attachment part from a chat
    ///
    /// The record is fetched fresh and the locator validated against it:
    /// the message must exist, its content must be a part array, the part
    /// index must be in range, and the addressed part must still classify
    /// as an attachment. Any mismatch is a [`SweepError::StaleLocator`] and
    /// nothing is written. On success the modified record is written back
    /// in a single put.
    ///
    /// # Errors
    ///
    /// [`SweepError::NotFound`] when the chat is absent,
    /// [`SweepError::StaleLocator`] when the locator no longer matches,
    /// [`SweepError::Write`] when the store rejects the write-back.
    pub async fn delete_attachment(&self, id: &str, locator: Locator) -> Result<()> {
        let mut record = self
            .bounded(self.store.get(id))
            .await?
            .ok_or_else(|| SweepError::NotFound(id.to_string()))?;

        let Locator {
            message_index,
            part_index,
        } = locator;
        let stale = || SweepError::stale(id, message_index, part_index);

        let messages = record
            .get_mut("messages")
            .and_then(Value::as_array_mut)
            .ok_or_else(stale)?;
        let message = messages.get_mut(message_index).ok_or_else(stale)?;
        let content = message
            .get_mut("content")
            .and_then(Value::as_array_mut)
            .ok_or_else(stale)?;

        match content.get(part_index) {
            Some(part) if self.classifier.classify(part).is_some() => {}
            _ => return Err(stale()),
        }

        content.remove(part_index);
        let message_now_empty = content.is_empty();

        if message_now_empty && self.empty_message == EmptyMessagePolicy::Remove {
            messages.remove(message_index);
            tracing::debug!(chat = %id, message = message_index, "removed now-empty message");
        }

        self.bounded(self.store.put(id, &record)).await?;
        tracing::info!(
            chat = %id,
            message = message_index,
            part = part_index,
            "deleted attachment"
        );
        Ok(())
    }

    /// Write a whole record into the store under the given id
    ///
    /// Replaces any existing record with that id.
    pub async fn import_record(&self, id: &str, record: &Value) -> Result<()> {
        self.bounded(self.store.put(id, record)).await
    }

    fn summarize(&self, id: &str, record: &Value) -> ChatSummary {
        let size_bytes = record::canonical_size(record);
        let title = record::resolve_title(record);

        if !record.is_object() {
            tracing::warn!(chat = %id, "record is not an object; using defaults");
            return ChatSummary {
                id: id.to_string(),
                title,
                size_bytes,
                message_count: 0,
                has_image: false,
                has_pdf: false,
                attachments: Vec::new(),
            };
        }

        let messages = record::messages(record);
        let mut attachments = Vec::new();
        let mut has_image = false;
        let mut has_pdf = false;

        for (message_index, message) in messages.iter().enumerate() {
            if let Some(parts) = record::content_parts(message) {
                for (part_index, part) in parts.iter().enumerate() {
                    if let Some(class) = self.classifier.classify(part) {
                        has_image |= class.kind() == AttachmentKind::Image;
                        has_pdf |= class.kind() == AttachmentKind::Pdf;
                        attachments.push(AttachmentEntry {
                            locator: Locator::new(message_index, part_index),
                            name: class.display_name(),
                            kind: class.kind(),
                            confidence: class.confidence(),
                        });
                    }
                }
            } else if let Some(text) = record::bare_text(message) {
                // No part array means nothing addressable to delete; the
                // heuristic still raises the flags.
                if let Some(class) = self.classifier.classify_text(text) {
                    has_image |= class.kind() == AttachmentKind::Image;
                    has_pdf |= class.kind() == AttachmentKind::Pdf;
                }
            }
        }

        tracing::debug!(
            chat = %id,
            size = size_bytes,
            messages = messages.len(),
            attachments = attachments.len(),
            "summarized chat"
        );

        ChatSummary {
            id: id.to_string(),
            title,
            size_bytes,
            message_count: messages.len(),
            has_image,
            has_pdf,
            attachments,
        }
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>> + Send,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(SweepError::StoreUnavailable(format!(
                "store did not respond within {}s",
                self.timeout.as_secs()
            ))),
        }
    }
}

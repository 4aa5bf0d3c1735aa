//! Derived, non-persisted views of chat records
//!
//! A [`ChatSummary`] is computed fresh on every scan and holds no ownership
//! over the underlying record, only the `id` used to re-fetch it before any
//! mutation. Summaries go stale the moment the store changes; they must not
//! drive a delete without re-validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scanner::classify::{AttachmentKind, Confidence};

/// Position of one attachment inside a record
///
/// `message_index` addresses the record's `messages` sequence,
/// `part_index` the message's content part sequence. Locators are only
/// valid against the record state they were derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    /// Index into the record's message sequence
    pub message_index: usize,
    /// Index into the message's content part sequence
    pub part_index: usize,
}

impl Locator {
    /// Locator for the given message and part indices
    pub fn new(message_index: usize, part_index: usize) -> Self {
        Self {
            message_index,
            part_index,
        }
    }
}

/// One attachment found in a chat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentEntry {
    /// Where the attachment lives in the record
    pub locator: Locator,
    /// Display name (declared filename or matched text)
    pub name: String,
    /// Recognized kind
    pub kind: AttachmentKind,
    /// Whether this came from metadata or from text matching
    pub confidence: Confidence,
}

/// Size and attachment profile of one chat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSummary {
    /// Opaque chat id, owned by the store
    pub id: String,
    /// Resolved display title, never empty
    pub title: String,
    /// Byte length of the record's serialized form at scan time
    pub size_bytes: u64,
    /// Number of messages in the record
    pub message_count: usize,
    /// Whether any image attachment (explicit or heuristic) was seen
    pub has_image: bool,
    /// Whether any PDF attachment (explicit or heuristic) was seen
    pub has_pdf: bool,
    /// Deletable attachments with their locators
    pub attachments: Vec<AttachmentEntry>,
}

/// Result of one scan over the whole store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// When the scan ran
    pub scanned_at: DateTime<Utc>,
    /// Summaries, descending by size, ties in enumeration order
    pub chats: Vec<ChatSummary>,
    /// Set when enumeration stopped early; `chats` then holds what was
    /// collected before the cut
    pub failure: Option<String>,
}

impl ScanReport {
    /// Combined serialized size of all scanned chats
    pub fn total_size_bytes(&self) -> u64 {
        self.chats.iter().map(|c| c.size_bytes).sum()
    }

    /// Whether enumeration stopped before reaching the end of the store
    pub fn is_partial(&self) -> bool {
        self.failure.is_some()
    }
}

//! Error types for chatsweep
//!
//! This module defines all error types used throughout the crate,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for chatsweep operations
///
/// Covers store access, record interpretation, and delete validation
/// failures. Callers are expected to match on the variant: a
/// [`SweepError::StaleLocator`] means the record changed since the summary
/// was produced and the caller should rescan, while a
/// [`SweepError::NotFound`] means the whole chat is gone.
#[derive(Error, Debug)]
pub enum SweepError {
    /// The store cannot be opened or stopped responding
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// A targeted chat id is absent from the store
    #[error("Chat not found: {0}")]
    NotFound(String),

    /// An attachment locator no longer matches the current record
    #[error("Stale locator for chat {id}: message {message_index}, part {part_index}")]
    StaleLocator {
        /// The chat the locator was captured against
        id: String,
        /// Index into the record's message sequence
        message_index: usize,
        /// Index into the message's content part sequence
        part_index: usize,
    },

    /// The store rejected a write
    #[error("Write error: {0}")]
    Write(String),

    /// A record could not be interpreted (non-fatal during scans)
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for chatsweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

impl SweepError {
    /// A `StaleLocator` error for the given chat and locator indices
    pub fn stale(id: &str, message_index: usize, part_index: usize) -> Self {
        SweepError::StaleLocator {
            id: id.to_string(),
            message_index,
            part_index,
        }
    }
}

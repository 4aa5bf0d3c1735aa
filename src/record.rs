//! Chat record interpretation
//!
//! Records are externally owned JSON values with no schema this crate
//! controls. Everything here is a best-effort, read-only view: title
//! resolution, message access, and canonical size. The shapes handled come
//! from observed store contents, not from a contract.

use serde_json::Value;

/// Title used when no candidate field yields a usable string
pub const UNTITLED: &str = "Untitled Chat";

/// Maximum characters taken from a `preview` field for a title
const PREVIEW_TITLE_CHARS: usize = 50;

/// Maximum characters taken from the first message's text for a title
const MESSAGE_TITLE_CHARS: usize = 30;

/// Resolve a display title for a record
///
/// Precedence is fixed: `title`, then `chatTitle`, then `name`, then the
/// first 50 characters of `preview`, then the first 30 characters of the
/// first message's text, then [`UNTITLED`]. Blank candidates are skipped.
pub fn resolve_title(record: &Value) -> String {
    for field in ["title", "chatTitle", "name"] {
        if let Some(s) = non_empty_str(record.get(field)) {
            return s.to_string();
        }
    }

    if let Some(preview) = non_empty_str(record.get("preview")) {
        return truncate_chars(preview, PREVIEW_TITLE_CHARS);
    }

    if let Some(text) = messages(record).first().and_then(message_text) {
        let title = truncate_chars(text, MESSAGE_TITLE_CHARS);
        if !title.is_empty() {
            return title;
        }
    }

    UNTITLED.to_string()
}

/// The record's message sequence, or empty when absent or malformed
pub fn messages(record: &Value) -> &[Value] {
    record
        .get("messages")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// A message's content part sequence
///
/// Only an actual `content` array qualifies; messages carrying a bare
/// string live in [`bare_text`] and yield no addressable parts.
pub fn content_parts(message: &Value) -> Option<&Vec<Value>> {
    message.get("content").and_then(Value::as_array)
}

/// Text of a message stored outside a content part array
///
/// Either a string `content` field or a `text` field.
pub fn bare_text(message: &Value) -> Option<&str> {
    message
        .get("content")
        .and_then(Value::as_str)
        .or_else(|| message.get("text").and_then(Value::as_str))
}

/// Best-effort text of a message, for title fallback
///
/// Tries [`bare_text`] first, then the `text` of the first content part.
pub fn message_text(message: &Value) -> Option<&str> {
    bare_text(message).or_else(|| {
        content_parts(message)?
            .first()?
            .get("text")
            .and_then(Value::as_str)
    })
}

/// Byte length of the record's compact JSON serialization
///
/// Recomputed on every call so the result reflects the record as it is
/// now, including embedded attachment payloads.
pub fn canonical_size(record: &Value) -> u64 {
    serde_json::to_vec(record)
        .map(|bytes| bytes.len() as u64)
        .unwrap_or(0)
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    let s = value?.as_str()?.trim();
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Trim and cut a string to at most `max` characters
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.trim().chars().take(max).collect()
}

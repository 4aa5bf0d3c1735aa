//! Attachment classification for message content parts
//!
//! Record shapes are inconsistent across store contents: some attachments
//! are typed parts carrying real metadata (MIME type, filename, payload),
//! others are only hinted at by a filename-like substring in plain text.
//! The two cases carry very different confidence, so classification returns
//! a tagged [`PartClass`] instead of a bare boolean: `Explicit` comes from
//! metadata, `Heuristic` from text matching and can both false-positive
//! (text merely mentioning a filename) and false-negative (formats the
//! pattern does not know).

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Attachment kind recognized by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    /// Image attachment (png, jpeg, or any `image/*` MIME)
    Image,
    /// PDF document
    Pdf,
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachmentKind::Image => write!(f, "image"),
            AttachmentKind::Pdf => write!(f, "pdf"),
        }
    }
}

/// How the classification was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Typed part with attachment metadata
    Explicit,
    /// Filename-like substring in plain text
    Heuristic,
}

/// Classification result for one content part
#[derive(Debug, Clone, PartialEq)]
pub enum PartClass {
    /// Typed part carrying attachment metadata
    Explicit {
        /// Recognized kind
        kind: AttachmentKind,
        /// Declared filename, when present
        name: Option<String>,
        /// Declared payload size, or an estimate from the base64 payload
        size_bytes: Option<u64>,
    },
    /// Plain text containing something that looks like an attachment filename
    Heuristic {
        /// Recognized kind
        kind: AttachmentKind,
        /// The matched filename-like substring
        matched: String,
    },
}

impl PartClass {
    /// The recognized attachment kind
    pub fn kind(&self) -> AttachmentKind {
        match self {
            PartClass::Explicit { kind, .. } | PartClass::Heuristic { kind, .. } => *kind,
        }
    }

    /// The confidence level of this classification
    pub fn confidence(&self) -> Confidence {
        match self {
            PartClass::Explicit { .. } => Confidence::Explicit,
            PartClass::Heuristic { .. } => Confidence::Heuristic,
        }
    }

    /// A display name for listings
    pub fn display_name(&self) -> String {
        match self {
            PartClass::Explicit { name, kind, .. } => name
                .clone()
                .unwrap_or_else(|| format!("(unnamed {})", kind)),
            PartClass::Heuristic { matched, .. } => matched.clone(),
        }
    }
}

/// MIME field names observed across record shapes
const MIME_FIELDS: [&str; 3] = ["mimeType", "mime", "contentType"];

/// Filename field names observed across record shapes
const NAME_FIELDS: [&str; 3] = ["fileName", "filename", "name"];

/// Size field names observed across record shapes
const SIZE_FIELDS: [&str; 2] = ["size", "sizeBytes"];

/// Base64 payload field names observed across record shapes
const PAYLOAD_FIELDS: [&str; 2] = ["data", "base64"];

/// Content part classifier
///
/// Holds the compiled filename pattern; build once and reuse across a scan.
#[derive(Debug)]
pub struct Classifier {
    filename: Regex,
}

impl Classifier {
    /// Build a classifier with the standard filename pattern
    pub fn new() -> Self {
        Self {
            // Matches an optional stem plus one of the known extensions, so
            // a bare ".pdf" in running text still counts.
            filename: Regex::new(r"(?i)[\w.\-]*\.(pdf|png|jpe?g)\b")
                .expect("filename pattern is valid"),
        }
    }

    /// Classify one content part
    ///
    /// Explicit metadata wins over text matching: a typed part with a
    /// recognized MIME type or filename extension is `Explicit`; otherwise
    /// the part's text (a `text` field, a string `content`, or a bare
    /// string part) is run through the heuristic.
    pub fn classify(&self, part: &Value) -> Option<PartClass> {
        if let Some(obj) = part.as_object() {
            let mime = first_str(obj, &MIME_FIELDS);
            let name = first_str(obj, &NAME_FIELDS);

            let kind = mime
                .and_then(kind_from_mime)
                .or_else(|| name.and_then(kind_from_filename));

            if let Some(kind) = kind {
                return Some(PartClass::Explicit {
                    kind,
                    name: name.map(str::to_string),
                    size_bytes: declared_or_estimated_size(obj),
                });
            }

            let text = first_str(obj, &["text"])
                .or_else(|| obj.get("content").and_then(Value::as_str));
            return text.and_then(|t| self.classify_text(t));
        }

        part.as_str().and_then(|t| self.classify_text(t))
    }

    /// Run only the text heuristic
    pub fn classify_text(&self, text: &str) -> Option<PartClass> {
        let matched = self.filename.find(text)?.as_str();
        let kind = kind_from_filename(matched)?;
        Some(PartClass::Heuristic {
            kind,
            matched: matched.to_string(),
        })
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

fn first_str<'a>(obj: &'a serde_json::Map<String, Value>, fields: &[&str]) -> Option<&'a str> {
    fields
        .iter()
        .find_map(|f| obj.get(*f).and_then(Value::as_str))
        .filter(|s| !s.trim().is_empty())
}

fn kind_from_mime(mime: &str) -> Option<AttachmentKind> {
    let mime = mime.trim().to_ascii_lowercase();
    if mime.starts_with("image/") {
        Some(AttachmentKind::Image)
    } else if mime == "application/pdf" {
        Some(AttachmentKind::Pdf)
    } else {
        None
    }
}

fn kind_from_filename(name: &str) -> Option<AttachmentKind> {
    let name = name.trim().to_ascii_lowercase();
    if name.ends_with(".pdf") {
        Some(AttachmentKind::Pdf)
    } else if [".png", ".jpg", ".jpeg"].iter().any(|ext| name.ends_with(ext)) {
        Some(AttachmentKind::Image)
    } else {
        None
    }
}

/// Declared size field, falling back to an estimate from the base64 payload
fn declared_or_estimated_size(obj: &serde_json::Map<String, Value>) -> Option<u64> {
    if let Some(size) = SIZE_FIELDS.iter().find_map(|f| obj.get(*f).and_then(Value::as_u64)) {
        return Some(size);
    }

    PAYLOAD_FIELDS
        .iter()
        .find_map(|f| obj.get(*f).and_then(Value::as_str))
        .map(|payload| base64::decoded_len_estimate(payload.len()) as u64)
}

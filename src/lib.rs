//! chatsweep - Chat store inventory and cleanup library
//!
//! This library provides the core functionality for chatsweep: a scanner
//! that lists stored chats by serialized size, flags embedded attachments,
//! and reclaims space by deleting whole chats or single attachments.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `store`: The [`store::ChatStore`] trait plus the sled-backed and in-memory implementations
//! - `record`: Best-effort interpretation of externally owned chat records
//! - `scanner`: Scan, summarize, and delete operations over a store
//! - `format`: Human-readable byte size formatting
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use chatsweep::{Scanner, SledStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = Arc::new(SledStore::open_default()?);
//!     let scanner = Scanner::new(store);
//!
//!     let report = scanner.scan().await?;
//!     for chat in &report.chats {
//!         println!("{}\t{}", chat.size_bytes, chat.title);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod record;
pub mod scanner;
pub mod store;

// Re-export commonly used types
pub use config::{Config, EmptyMessagePolicy};
pub use error::{Result, SweepError};
pub use format::format_size;
pub use scanner::{AttachmentKind, ChatSummary, Locator, ScanReport, Scanner};
pub use store::{ChatStore, MemoryStore, SledStore};

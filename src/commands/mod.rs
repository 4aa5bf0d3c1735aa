/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes four top-level command modules:

- `scan`   — List all chats ranked by serialized size
- `show`   — Summarize one chat and its attachments
- `delete` — Delete a whole chat or a single attachment
- `import` — Load chat records from a JSON file

These handlers are intentionally small and use the library components:
the store, the scanner, and the formatting helpers.
*/

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::error::Result;
use crate::scanner::Scanner;
use crate::store::SledStore;

// Scan command handler
pub mod scan;

// Show command handler
pub mod show;

// Delete command handlers
pub mod delete;

// Import command handler
pub mod import;

/// Build a scanner over the configured store
///
/// Opens the store at the configured path, or the default data directory
/// when no path is set, and applies the configured timeout and delete
/// policy.
pub fn build_scanner(config: &Config) -> Result<Scanner> {
    let store = match &config.store.path {
        Some(path) => SledStore::open(path)?,
        None => SledStore::open_default()?,
    };

    Ok(Scanner::new(Arc::new(store))
        .with_timeout(Duration::from_secs(config.store.timeout_seconds))
        .with_empty_message_policy(config.delete.empty_message))
}

/// Ask the user to confirm a destructive action
///
/// Returns true only on an explicit `y` or `yes` answer; anything else,
/// including an empty line or a closed stdin, declines.
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;

    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

//! Delete commands: whole chats and single attachments
//!
//! Both commands prompt for confirmation unless `--yes` is passed.
//! Deleting a chat that is already gone reports success; a stale
//! attachment locator is refused with a pointer back to `show`.

use colored::Colorize;

use crate::config::Config;
use crate::error::{Result, SweepError};
use crate::format::format_size;
use crate::scanner::Locator;

/// Delete a whole chat record
pub async fn run_delete_chat(config: Config, id: &str, yes: bool) -> Result<()> {
    let scanner = super::build_scanner(&config)?;

    let summary = match scanner.inspect(id).await {
        Ok(summary) => Some(summary),
        Err(SweepError::NotFound(_)) => None,
        Err(e) => return Err(e),
    };

    let Some(summary) = summary else {
        println!("Chat '{}' not found; nothing to delete.", id);
        return Ok(());
    };

    if !yes {
        let prompt = format!(
            "Delete chat '{}' ({}, {})?",
            summary.title,
            id,
            format_size(summary.size_bytes)
        );
        if !super::confirm(&prompt)? {
            println!("Aborted.");
            return Ok(());
        }
    }

    scanner.delete_chat(id).await?;
    println!(
        "{}",
        format!(
            "Deleted chat '{}' ({} reclaimed)",
            summary.title,
            format_size(summary.size_bytes)
        )
        .green()
    );
    Ok(())
}

/// Delete a single attachment from a chat
pub async fn run_delete_attachment(
    config: Config,
    id: &str,
    message: usize,
    part: usize,
    yes: bool,
) -> Result<()> {
    let scanner = super::build_scanner(&config)?;
    let locator = Locator::new(message, part);

    let summary = scanner.inspect(id).await?;
    let entry = summary.attachments.iter().find(|a| a.locator == locator);

    if !yes {
        let prompt = match entry {
            Some(entry) => format!(
                "Delete {} '{}' from chat '{}'?",
                entry.kind, entry.name, summary.title
            ),
            None => format!(
                "No attachment at message {} part {} of chat '{}'; try anyway?",
                message, part, summary.title
            ),
        };
        if !super::confirm(&prompt)? {
            println!("Aborted.");
            return Ok(());
        }
    }

    match scanner.delete_attachment(id, locator).await {
        Ok(()) => {
            let after = scanner.inspect(id).await?;
            println!(
                "{}",
                format!(
                    "Deleted attachment ({} reclaimed)",
                    format_size(summary.size_bytes.saturating_sub(after.size_bytes))
                )
                .green()
            );
            Ok(())
        }
        Err(SweepError::StaleLocator { .. }) => {
            eprintln!(
                "{}",
                format!(
                    "The chat changed since it was listed; message {} part {} no longer points at an attachment. Re-run `chatsweep show {}`.",
                    message, part, id
                )
                .yellow()
            );
            Err(SweepError::stale(id, message, part))
        }
        Err(e) => Err(e),
    }
}

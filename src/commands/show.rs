//! Show command: one chat's summary and attachments
//!
//! Prints the chat's resolved title, size, and message count, followed by
//! an attachment table whose message/part indices feed straight into
//! `delete-attachment`.

use colored::Colorize;
use prettytable::{row, Table};

use crate::config::Config;
use crate::error::Result;
use crate::format::format_size;
use crate::scanner::{ChatSummary, Confidence};

/// Summarize one chat and print its attachment listing
pub async fn run_show(config: Config, id: &str, json: bool) -> Result<()> {
    let scanner = super::build_scanner(&config)?;
    let summary = scanner.inspect(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &ChatSummary) {
    println!("{} ({})", summary.title.bold(), summary.id.cyan());
    println!("Size:     {}", format_size(summary.size_bytes));
    println!("Messages: {}", summary.message_count);

    if summary.attachments.is_empty() {
        println!("No attachments found.");
        return;
    }

    let mut table = Table::new();
    table.add_row(row!["Message", "Part", "Name", "Kind", "Source"]);

    for entry in &summary.attachments {
        table.add_row(row![
            entry.locator.message_index,
            entry.locator.part_index,
            entry.name,
            entry.kind,
            source_label(entry.confidence)
        ]);
    }

    println!();
    table.printstd();
    println!(
        "\nDelete one with: chatsweep delete-attachment {} -m <message> -p <part>",
        summary.id
    );
}

fn source_label(confidence: Confidence) -> &'static str {
    match confidence {
        Confidence::Explicit => "metadata",
        Confidence::Heuristic => "text match",
    }
}

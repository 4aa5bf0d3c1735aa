//! Scan command: list all chats ranked by size
//!
//! Renders the scan report as a table (largest chat first) or as JSON
//! when `--json` is passed. A partial scan still prints what was
//! collected, with a warning on stderr.

use colored::Colorize;
use prettytable::{row, Table};

use crate::config::Config;
use crate::error::Result;
use crate::format::format_size;
use crate::scanner::{AttachmentKind, ChatSummary, ScanReport};

/// Maximum characters shown in the title column
const TITLE_COLUMN_CHARS: usize = 40;

/// Scan the store and print the ranked chat listing
pub async fn run_scan(config: Config, json: bool) -> Result<()> {
    let scanner = super::build_scanner(&config)?;
    let report = scanner.scan().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &ScanReport) {
    if report.chats.is_empty() {
        println!("No chats in store.");
    } else {
        let mut table = Table::new();
        table.add_row(row!["ID", "Title", "Size", "Messages", "Attachments"]);

        for chat in &report.chats {
            table.add_row(row![
                chat.id.cyan(),
                crate::record::truncate_chars(&chat.title, TITLE_COLUMN_CHARS),
                format_size(chat.size_bytes),
                chat.message_count,
                attachment_markers(chat)
            ]);
        }

        table.printstd();
        println!(
            "\n{} chats, {} total",
            report.chats.len(),
            format_size(report.total_size_bytes())
        );
    }

    if let Some(reason) = &report.failure {
        eprintln!(
            "{}",
            format!("Warning: scan is incomplete ({})", reason).yellow()
        );
    }
}

/// Short markers for the listing: kind names, or `-` when clean
fn attachment_markers(chat: &ChatSummary) -> String {
    let mut markers = Vec::new();
    if chat.has_image {
        markers.push(AttachmentKind::Image.to_string());
    }
    if chat.has_pdf {
        markers.push(AttachmentKind::Pdf.to_string());
    }

    if markers.is_empty() {
        "-".to_string()
    } else {
        markers.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn summary(has_image: bool, has_pdf: bool) -> ChatSummary {
        ChatSummary {
            id: "chat-1".to_string(),
            title: "t".to_string(),
            size_bytes: 10,
            message_count: 1,
            has_image,
            has_pdf,
            attachments: Vec::new(),
        }
    }

    #[test]
    fn test_attachment_markers() {
        assert_eq!(attachment_markers(&summary(false, false)), "-");
        assert_eq!(attachment_markers(&summary(true, false)), "image");
        assert_eq!(attachment_markers(&summary(false, true)), "pdf");
        assert_eq!(attachment_markers(&summary(true, true)), "image, pdf");
    }

    #[test]
    fn test_print_report_smoke() {
        let report = ScanReport {
            scanned_at: Utc::now(),
            chats: vec![summary(true, false)],
            failure: Some("enumeration interrupted".to_string()),
        };
        print_report(&report);
    }

    #[test]
    fn test_print_empty_report_smoke() {
        let report = ScanReport {
            scanned_at: Utc::now(),
            chats: Vec::new(),
            failure: None,
        };
        print_report(&report);
    }
}

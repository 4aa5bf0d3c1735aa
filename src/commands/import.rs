//! Import command: load chat records from a JSON file
//!
//! The file must hold a single JSON object mapping chat ids to record
//! values. Existing records with the same id are replaced whole.

use std::path::Path;

use colored::Colorize;
use serde_json::Value;

use crate::config::Config;
use crate::error::{Result, SweepError};

/// Import records from a JSON file into the store
pub async fn run_import(config: Config, file: &Path) -> Result<()> {
    let scanner = super::build_scanner(&config)?;

    let contents = std::fs::read_to_string(file)?;
    let parsed: Value = serde_json::from_str(&contents)?;

    let Some(records) = parsed.as_object() else {
        return Err(SweepError::MalformedRecord(format!(
            "{} must contain a JSON object mapping chat ids to records",
            file.display()
        )));
    };

    for (id, record) in records {
        scanner.import_record(id, record).await?;
        tracing::debug!(chat = %id, "imported record");
    }

    println!(
        "{}",
        format!("Imported {} chats from {}", records.len(), file.display()).green()
    );
    Ok(())
}

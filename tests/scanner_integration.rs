//! End-to-end scanner tests over both store implementations
//!
//! Exercises the full scan / inspect / delete cycle against the sled-backed
//! store on a temp directory, plus the failure paths the in-memory store
//! can inject.

use std::sync::Arc;

use serde_json::json;
use tempfile::tempdir;

use chatsweep::scanner::Locator;
use chatsweep::{MemoryStore, Scanner, SledStore, SweepError};

fn chat_with_image(text_padding: usize) -> serde_json::Value {
    json!({
        "chatTitle": "Design review",
        "messages": [
            { "role": "user", "content": "x".repeat(text_padding) },
            { "role": "user", "content": [
                { "type": "text", "text": "attached below" },
                { "type": "image", "mimeType": "image/png", "fileName": "mock.png",
                  "data": "aGVsbG8gd29ybGQ=" }
            ] }
        ]
    })
}

#[tokio::test]
async fn test_sled_full_cycle_scan_inspect_delete() {
    let dir = tempdir().unwrap();
    let store = Arc::new(SledStore::open(dir.path().join("chats.sled")).unwrap());
    let scanner = Scanner::new(store);

    scanner
        .import_record("big", &chat_with_image(2000))
        .await
        .unwrap();
    scanner
        .import_record("small", &json!({ "title": "Quick question", "messages": [] }))
        .await
        .unwrap();

    // Scan ranks by size and flags the embedded image.
    let report = scanner.scan().await.unwrap();
    assert_eq!(report.chats.len(), 2);
    assert_eq!(report.chats[0].id, "big");
    assert!(report.chats[0].has_image);
    assert!(report.chats[0].size_bytes > report.chats[1].size_bytes);
    assert!(!report.is_partial());

    // Deleting the attachment shrinks the record but keeps the chat.
    let before = scanner.inspect("big").await.unwrap();
    let locator = before.attachments[0].locator;
    scanner.delete_attachment("big", locator).await.unwrap();

    let after = scanner.inspect("big").await.unwrap();
    assert!(after.size_bytes < before.size_bytes);
    assert!(after.attachments.is_empty());
    assert_eq!(after.message_count, 2);

    // Deleting the whole chat removes it from subsequent scans.
    scanner.delete_chat("big").await.unwrap();
    let report = scanner.scan().await.unwrap();
    assert_eq!(report.chats.len(), 1);
    assert_eq!(report.chats[0].id, "small");
}

#[tokio::test]
async fn test_sled_changes_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chats.sled");

    {
        let store = Arc::new(SledStore::open(&path).unwrap());
        let scanner = Scanner::new(store);
        scanner
            .import_record("keep", &json!({ "title": "Keeper" }))
            .await
            .unwrap();
        scanner
            .import_record("drop", &json!({ "title": "Dropped" }))
            .await
            .unwrap();
        scanner.delete_chat("drop").await.unwrap();
    }

    let store = Arc::new(SledStore::open(&path).unwrap());
    let scanner = Scanner::new(store);
    let report = scanner.scan().await.unwrap();
    assert_eq!(report.chats.len(), 1);
    assert_eq!(report.chats[0].title, "Keeper");
}

#[tokio::test]
async fn test_stale_locator_after_concurrent_edit() {
    let dir = tempdir().unwrap();
    let store = Arc::new(SledStore::open(dir.path().join("chats.sled")).unwrap());
    let scanner = Scanner::new(store.clone());

    scanner
        .import_record("chat", &chat_with_image(10))
        .await
        .unwrap();
    let locator = scanner.inspect("chat").await.unwrap().attachments[0].locator;

    // Another writer replaces the record between scan and delete.
    scanner
        .import_record("chat", &json!({ "title": "Rewritten", "messages": [] }))
        .await
        .unwrap();

    let result = scanner.delete_attachment("chat", locator).await;
    assert!(matches!(result, Err(SweepError::StaleLocator { .. })));

    // The rewritten record is untouched.
    let summary = scanner.inspect("chat").await.unwrap();
    assert_eq!(summary.title, "Rewritten");
}

#[tokio::test]
async fn test_partial_enumeration_reports_collected_chats() {
    let store = Arc::new(MemoryStore::with_records([
        ("a".to_string(), json!({ "title": "one" })),
        ("b".to_string(), json!({ "title": "two" })),
        ("c".to_string(), json!({ "title": "three" })),
    ]));
    store.fail_enumeration_after(2);
    let scanner = Scanner::new(store);

    let report = scanner.scan().await.unwrap();
    assert!(report.is_partial());
    assert_eq!(report.chats.len(), 2);
}

#[tokio::test]
async fn test_unavailable_store_surfaces_as_error() {
    let store = Arc::new(MemoryStore::new());
    store.set_unavailable(true);
    let scanner = Scanner::new(store);

    assert!(matches!(
        scanner.scan().await,
        Err(SweepError::StoreUnavailable(_))
    ));
    assert!(matches!(
        scanner.inspect("x").await,
        Err(SweepError::StoreUnavailable(_))
    ));
}

#[tokio::test]
async fn test_delete_attachment_missing_chat() {
    let scanner = Scanner::new(Arc::new(MemoryStore::new()));
    let result = scanner.delete_attachment("ghost", Locator::new(0, 0)).await;
    assert!(matches!(result, Err(SweepError::NotFound(_))));
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Remote sync tests against a local copy of the RSVP API.

use party_rsvp::db::RsvpDb;
use party_rsvp::models::RsvpRecord;
use party_rsvp::services::{RemoteSync, SyncOutcome};

mod common;

/// Serve the real router on an ephemeral port.
async fn spawn_server(db: RsvpDb) -> (String, RsvpDb) {
    let (app, _) = common::create_test_app_with_db(db.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), db)
}

#[tokio::test]
async fn test_submit_delivers_record() {
    let (url, db) = spawn_server(RsvpDb::in_memory()).await;
    let sync = RemoteSync::new(format!("{url}/"));
    let record = RsvpRecord::new("Mixtli Omar Fonseca Vega", 2, 1);

    let outcome = sync.submit(&record).await.unwrap();
    assert_eq!(outcome, SyncOutcome::Delivered);

    let rows = db.list_rsvps().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, record.id);
    assert_eq!(rows[0].name_ticket, "Mixtli Fonseca");
    assert_eq!(rows[0].name_full, "Mixtli Omar Fonseca Vega");
    assert_eq!(rows[0].places, 3);
}

#[tokio::test]
async fn test_server_error_is_failed_outcome() {
    let (url, _) = spawn_server(RsvpDb::new_mock()).await;
    let sync = RemoteSync::new(url);

    let outcome = sync.submit(&RsvpRecord::new("Evan", 1, 0)).await.unwrap();
    let SyncOutcome::Failed(reason) = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert!(reason.starts_with("500"));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_failed_outcome() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let sync = RemoteSync::new(format!("http://{addr}"));
    let outcome = sync.submit(&RsvpRecord::new("Evan", 1, 0)).await.unwrap();
    assert!(matches!(outcome, SyncOutcome::Failed(_)));
}

#[tokio::test]
async fn test_disabled_sync_skips() {
    let sync = RemoteSync::from_config(None);
    assert!(!sync.is_enabled());
    let outcome = sync.submit(&RsvpRecord::new("Evan", 1, 0)).await.unwrap();
    assert_eq!(outcome, SyncOutcome::Skipped);
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! RSVP create/list endpoint tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use party_rsvp::models::RsvpRow;
use party_rsvp::services::token::issue_token;
use tower::ServiceExt;

mod common;

fn admin_get(token: &str) -> Request<Body> {
    Request::builder()
        .uri("/api/rsvp")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_create_then_list_newest_first() {
    let (app, state) = common::create_test_app();

    for (id, created_at, name) in [
        ("r1", "2026-03-01T10:00:00.000Z", "Evan Fonseca"),
        ("r2", "2026-03-03T09:30:00.000Z", "Familia Pérez"),
        ("r3", "2026-03-02T18:15:00.000Z", "Ana"),
    ] {
        let body = serde_json::json!({
            "id": id,
            "createdAt": created_at,
            "name": name,
            "nameFull": name,
            "adults": 2,
            "kids": 1,
            "places": 3,
        });
        let response = app
            .clone()
            .oneshot(common::json_post("/api/rsvp", &body.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            common::body_json(response).await,
            serde_json::json!({"ok": true})
        );
    }

    let token = issue_token("admin", &state.config.token_secret).unwrap();
    let response = app.oneshot(admin_get(&token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let rows: Vec<RsvpRow> = serde_json::from_slice(&common::body_bytes(response).await).unwrap();
    let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["r2", "r3", "r1"]);
    assert_eq!(rows[0].name_ticket, "Familia Pérez");
}

#[tokio::test]
async fn test_create_fills_server_defaults() {
    let (app, state) = common::create_test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/rsvp")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::USER_AGENT, "party-test/1.0")
                .body(Body::from(r#"{"name":"Evan","places":1}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let rows = state.db.list_rsvps().await.unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert!(!row.id.is_empty());
    assert!(row.created_at.ends_with('Z'));
    assert_eq!(row.name_full, "Evan");
    assert_eq!(row.user_agent, "party-test/1.0");
}

#[tokio::test]
async fn test_create_requires_name_and_places() {
    let (app, state) = common::create_test_app();

    for body in [
        r#"{"places":2}"#,
        r#"{"name":"","places":2}"#,
        r#"{"name":"Evan"}"#,
        r#"{"name":"Evan","places":0}"#,
        "not json",
    ] {
        let response = app
            .clone()
            .oneshot(common::json_post("/api/rsvp", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
    }

    assert!(state.db.list_rsvps().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_datastore_failure_on_create() {
    let (app, _) = common::create_offline_test_app();

    let response = app
        .oneshot(common::json_post(
            "/api/rsvp",
            r#"{"name":"Evan","places":1}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "Database not connected (offline mode)");
}

#[tokio::test]
async fn test_datastore_failure_on_list() {
    let (app, state) = common::create_offline_test_app();
    let token = issue_token("admin", &state.config.token_secret).unwrap();

    let response = app.oneshot(admin_get(&token)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = common::body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("offline"));
}

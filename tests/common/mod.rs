// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request};
use party_rsvp::config::Config;
use party_rsvp::db::RsvpDb;
use party_rsvp::routes::create_router;
use party_rsvp::ticket::TicketRenderer;
use party_rsvp::AppState;
use std::sync::Arc;

/// Create a test app over the given datastore.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app_with_db(db: RsvpDb) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config: Config::test_default(),
        db,
        renderer: TicketRenderer::bundled(),
    });

    (create_router(state.clone()), state)
}

/// Create a test app with an in-memory datastore.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_db(RsvpDb::in_memory())
}

/// Create a test app whose datastore fails every call.
#[allow(dead_code)]
pub fn create_offline_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_db(RsvpDb::new_mock())
}

/// Build a JSON POST request.
#[allow(dead_code)]
pub fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Read a whole response body.
#[allow(dead_code)]
pub async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! RSVP collection endpoints.
//!
//! Writes are public (every guest submits), reads need the admin token.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::AdminUser;
use crate::models::{RsvpRow, RsvpSubmission};
use crate::AppState;

/// `POST /api/rsvp`, open to everyone.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/rsvp", post(create_rsvp))
}

/// `GET /api/rsvp`, behind the auth middleware applied in routes/mod.rs.
pub fn admin_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/rsvp", get(list_rsvps))
}

#[derive(Debug, Serialize)]
pub struct CreateRsvpResponse {
    pub ok: bool,
}

/// List every RSVP, newest first.
async fn list_rsvps(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<AdminUser>,
) -> Result<Json<Vec<RsvpRow>>> {
    let rows = state.db.list_rsvps().await?;
    tracing::info!(admin = %admin.name, count = rows.len(), "Listed RSVPs");
    Ok(Json(rows))
}

/// Store one RSVP.
async fn create_rsvp(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CreateRsvpResponse>> {
    let submission: RsvpSubmission = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Malformed RSVP body: {}", e)))?;

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|h| h.to_str().ok());
    let row = submission
        .into_row(user_agent)
        .ok_or_else(|| AppError::BadRequest("Invalid data".to_string()))?;

    state.db.insert_rsvp(&row).await?;

    tracing::info!(
        id = %row.id,
        name = %row.name_ticket,
        places = row.places,
        "RSVP stored"
    );

    Ok(Json(CreateRsvpResponse { ok: true }))
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ticket download endpoint.

use axum::{
    body::Bytes,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::services::validation::{prepare_ticket, TicketInput};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/ticket", post(render_ticket))
}

/// Ticket request. Counts go through the same coercion as the form.
#[derive(Debug, Deserialize)]
pub struct TicketRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub adults: f64,
    #[serde(default)]
    pub kids: f64,
}

/// Render a PNG ticket for the given name and counts.
async fn render_ticket(State(state): State<Arc<AppState>>, body: Bytes) -> Result<Response> {
    let request: TicketRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Malformed ticket body: {}", e)))?;

    let TicketInput { name, adults, kids } =
        prepare_ticket(&request.name, request.adults, request.kids)
            .map_err(|errors| AppError::BadRequest(errors.join(" ")))?;

    let renderer = state.renderer.clone();
    let (png, file_name) = tokio::task::spawn_blocking(move || {
        let ticket = renderer.render(&name, adults, kids)?;
        Ok::<_, AppError>((ticket.to_png()?, ticket.file_name))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Ticket task failed: {}", e)))??;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        png,
    )
        .into_response())
}

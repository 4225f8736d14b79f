// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin login.

use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use subtle::ConstantTimeEq;

use crate::error::{AppError, Result};
use crate::services::token::issue_token;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/login", post(login))
}

/// Login body. Missing fields simply fail the credential check.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub pass: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

fn credential_matches(given: Option<&str>, expected: &str) -> bool {
    match given {
        Some(given) => given.as_bytes().ct_eq(expected.as_bytes()).into(),
        None => false,
    }
}

/// Exchange admin credentials for a bearer token.
///
/// The body is parsed by hand so a malformed body is a 400 rather than
/// axum's default rejection.
async fn login(State(state): State<Arc<AppState>>, body: Bytes) -> Result<Json<LoginResponse>> {
    let request: LoginRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Malformed login body: {}", e)))?;

    let config = &state.config;
    // Evaluate both so timing does not reveal which one failed.
    let user_ok = credential_matches(request.user.as_deref(), &config.admin_user);
    let pass_ok = credential_matches(request.pass.as_deref(), &config.admin_pass);
    if !(user_ok & pass_ok) {
        tracing::warn!(user = ?request.user, "Rejected admin login");
        return Err(AppError::Unauthorized);
    }

    let token = issue_token(&config.admin_user, &config.token_secret)?;
    tracing::info!(user = %config.admin_user, "Admin token issued");

    Ok(Json(LoginResponse { token }))
}

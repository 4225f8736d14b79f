// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer token middleware for the admin read path.

use crate::error::AppError;
use crate::services::token::{decode_claims, verify_token};
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Admin identity taken from a verified token.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub name: String,
    pub issued_at: i64,
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(value: &str) -> Option<&str> {
    value.strip_prefix("Bearer ").map(str::trim).filter(|t| !t.is_empty())
}

/// Middleware that requires a valid admin token.
///
/// Missing or non-Bearer header is 401; a token whose signature does not
/// verify is 403.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .ok_or(AppError::Unauthorized)?
        .to_string();

    if !verify_token(&token, &state.config.token_secret) {
        return Err(AppError::InvalidToken);
    }

    let claims = decode_claims(&token).ok_or(AppError::InvalidToken)?;
    request.extensions_mut().insert(AdminUser {
        name: claims.sub,
        issued_at: claims.iat,
    });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("bearer abc"), None);
    }
}

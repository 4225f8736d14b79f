// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer tokens for the admin read path.
//!
//! Format: `base64(json) + "." + hex(hmac_sha256(json, secret))` where the
//! JSON payload is `{"sub": <user>, "iat": <unix millis>}`. Tokens carry an
//! issue time but never expire.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;

// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

/// Token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (admin user name)
    pub sub: String,
    /// Issued at (Unix timestamp, milliseconds)
    pub iat: i64,
}

/// Hex HMAC-SHA256 of `message`.
fn sign(message: &[u8], secret: &[u8]) -> anyhow::Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| anyhow::anyhow!("HMAC init failed: {}", e))?;
    mac.update(message);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Create a signed token for `sub`, issued now.
pub fn issue_token(sub: &str, secret: &[u8]) -> anyhow::Result<String> {
    issue_token_at(sub, crate::time_utils::now_millis(), secret)
}

/// Create a signed token with an explicit issue time.
pub fn issue_token_at(sub: &str, iat: i64, secret: &[u8]) -> anyhow::Result<String> {
    let payload = serde_json::to_string(&TokenClaims {
        sub: sub.to_string(),
        iat,
    })?;
    let signature = sign(payload.as_bytes(), secret)?;
    Ok(format!("{}.{}", STANDARD.encode(payload.as_bytes()), signature))
}

/// Verify the signature of a token. No expiry check is made.
pub fn verify_token(token: &str, secret: &[u8]) -> bool {
    let Some((b64_payload, signature)) = token.split_once('.') else {
        return false;
    };
    if b64_payload.is_empty() || signature.is_empty() {
        return false;
    }

    let Ok(payload) = STANDARD.decode(b64_payload) else {
        return false;
    };
    let Ok(expected) = sign(&payload, secret) else {
        return false;
    };

    let matches: bool = expected.as_bytes().ct_eq(signature.as_bytes()).into();
    if !matches {
        tracing::warn!("Bearer token signature mismatch");
    }
    matches
}

/// Decode the claims of a token without verifying it.
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let (b64_payload, _) = token.split_once('.')?;
    let payload = STANDARD.decode(b64_payload).ok()?;
    serde_json::from_slice(&payload).ok()
}

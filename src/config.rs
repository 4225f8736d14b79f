// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Admin credentials and the token secret are required for the server.
//! Everything else has a development default.

use std::env;
use std::path::PathBuf;

/// Fixed key under which the local record list is stored.
pub const RECORDS_STORAGE_KEY: &str = "bridget_rsvp_records_v1";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID; `None` selects the in-memory datastore
    pub gcp_project_id: Option<String>,
    /// Server port
    pub port: u16,
    /// Directory holding the local record store
    pub data_dir: PathBuf,
    /// Base URL of the remote RSVP API used by the CLI for syncing
    pub remote_url: Option<String>,
    /// Font used for ticket text
    pub ticket_font_path: Option<PathBuf>,

    // --- Secrets ---
    /// Admin user allowed to read RSVPs
    pub admin_user: String,
    /// Admin password
    pub admin_pass: String,
    /// HMAC key for bearer tokens (raw bytes)
    pub token_secret: Vec<u8>,
}

impl Config {
    /// Config for tests only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: None,
            port: 8080,
            data_dir: PathBuf::from("data"),
            remote_url: None,
            ticket_font_path: None,
            admin_user: "admin".to_string(),
            admin_pass: "test_pass".to_string(),
            token_secret: b"test_token_secret_32_bytes_min!!".to_vec(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let mut config = Self::local_from_env();
        config.admin_user = env::var("ADMIN_USER")
            .map(|v| v.trim().to_string())
            .map_err(|_| ConfigError::Missing("ADMIN_USER"))?;
        config.admin_pass =
            env::var("ADMIN_PASS").map_err(|_| ConfigError::Missing("ADMIN_PASS"))?;
        config.token_secret = env::var("TOKEN_SECRET")
            .map_err(|_| ConfigError::Missing("TOKEN_SECRET"))?
            .into_bytes();
        Ok(config)
    }

    /// Load only the settings the local CLI flow needs; secrets stay empty.
    pub fn local_from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: non_empty_var("GCP_PROJECT_ID"),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            data_dir: non_empty_var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
            remote_url: non_empty_var("RSVP_REMOTE_URL")
                .map(|url| url.trim_end_matches('/').to_string()),
            ticket_font_path: non_empty_var("TICKET_FONT_PATH").map(PathBuf::from),
            admin_user: String::new(),
            admin_pass: String::new(),
            token_secret: Vec::new(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

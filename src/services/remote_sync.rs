// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Best-effort mirror of confirmed RSVPs to the remote API.
//!
//! Submissions are spawned and never awaited by the confirmation flow.
//! Failures are logged and otherwise ignored; the local store stays
//! authoritative.

use crate::models::RsvpRecord;
use tokio::task::JoinHandle;

/// How a single submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Delivered,
    Skipped,
    Failed(String),
}

/// Remote RSVP API client.
#[derive(Clone)]
pub struct RemoteSync {
    http: reqwest::Client,
    base_url: Option<String>,
}

impl RemoteSync {
    /// Create a client posting to `<base_url>/api/rsvp`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: Some(base_url.into().trim_end_matches('/').to_string()),
        }
    }

    /// A client that skips every submission (no remote configured).
    pub fn disabled() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: None,
        }
    }

    /// Build from optional configuration.
    pub fn from_config(base_url: Option<&str>) -> Self {
        match base_url {
            Some(url) => Self::new(url),
            None => Self::disabled(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.base_url.is_some()
    }

    /// Fire off one create request. Must be called inside a tokio runtime.
    ///
    /// The returned handle may be dropped; the request keeps running.
    pub fn submit(&self, record: &RsvpRecord) -> JoinHandle<SyncOutcome> {
        let client = self.clone();
        let record = record.clone();
        tokio::spawn(async move { client.send(&record).await })
    }

    async fn send(&self, record: &RsvpRecord) -> SyncOutcome {
        let Some(base_url) = &self.base_url else {
            tracing::debug!(id = %record.id, "Remote sync disabled, skipping");
            return SyncOutcome::Skipped;
        };
        let url = format!("{}/api/rsvp", base_url);

        let response = match self.http.post(&url).json(record).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(id = %record.id, error = %e, "Error saving RSVP to backend");
                return SyncOutcome::Failed(e.to_string());
            }
        };

        if response.status().is_success() {
            tracing::debug!(id = %record.id, "RSVP mirrored to backend");
            SyncOutcome::Delivered
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                id = %record.id,
                status = %status,
                body = %body,
                "Backend rejected RSVP"
            );
            SyncOutcome::Failed(format!("{}: {}", status, body))
        }
    }
}

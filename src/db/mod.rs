// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Remote RSVP datastore.
//!
//! Firestore when a project is configured, an in-process map otherwise.
//! Tests can also build an offline store that fails every call.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

use crate::error::AppError;
use crate::models::RsvpRow;

/// Collection names as constants.
pub mod collections {
    pub const RSVPS: &str = "rsvps";
}

#[derive(Clone)]
enum Backend {
    Firestore(FirestoreStore),
    Memory(MemoryStore),
    Offline,
}

/// Handle to whichever datastore is in use.
#[derive(Clone)]
pub struct RsvpDb {
    backend: Backend,
}

impl RsvpDb {
    /// Connect to Firestore for `project_id`, or fall back to memory.
    pub async fn connect(project_id: Option<&str>) -> Result<Self, AppError> {
        match project_id {
            Some(project_id) => Ok(Self {
                backend: Backend::Firestore(FirestoreStore::new(project_id).await?),
            }),
            None => {
                tracing::warn!("GCP_PROJECT_ID not set, keeping RSVPs in memory");
                Ok(Self::in_memory())
            }
        }
    }

    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(MemoryStore::default()),
        }
    }

    /// A store with no backend (offline mode).
    ///
    /// All operations return an error if called.
    pub fn new_mock() -> Self {
        Self {
            backend: Backend::Offline,
        }
    }

    /// All rows, newest `createdAt` first.
    pub async fn list_rsvps(&self) -> Result<Vec<RsvpRow>, AppError> {
        match &self.backend {
            Backend::Firestore(store) => store.list_rsvps().await,
            Backend::Memory(store) => Ok(store.list_rsvps()),
            Backend::Offline => Err(offline()),
        }
    }

    /// Store one row under its id.
    pub async fn insert_rsvp(&self, row: &RsvpRow) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(store) => store.insert_rsvp(row).await,
            Backend::Memory(store) => {
                store.insert_rsvp(row);
                Ok(())
            }
            Backend::Offline => Err(offline()),
        }
    }
}

fn offline() -> AppError {
    AppError::Database("Database not connected (offline mode)".to_string())
}

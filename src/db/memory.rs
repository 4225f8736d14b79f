// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process datastore for local runs and tests.

use crate::models::RsvpRow;
use dashmap::DashMap;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct MemoryStore {
    rows: Arc<DashMap<String, RsvpRow>>,
}

impl MemoryStore {
    pub fn list_rsvps(&self) -> Vec<RsvpRow> {
        let mut rows: Vec<RsvpRow> = self.rows.iter().map(|e| e.value().clone()).collect();
        // RFC 3339 UTC timestamps sort lexically.
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows
    }

    /// Insert or replace the row with the same id.
    pub fn insert_rsvp(&self, row: &RsvpRow) {
        self.rows.insert(row.id.clone(), row.clone());
    }
}

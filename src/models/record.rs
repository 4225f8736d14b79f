// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! RSVP record model shared by local storage, sync and tickets.

use crate::services::naming::to_ticket_name;
use crate::time_utils::now_rfc3339;
use serde::{Deserialize, Serialize};

/// One confirmed RSVP. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpRecord {
    /// Client-generated unique id (UUID v4)
    pub id: String,
    /// Confirmation time (RFC 3339, UTC)
    #[serde(rename = "createdAt")]
    pub created_at: String,
    /// Short display name printed on the ticket
    pub name: String,
    /// Name as entered by the guest
    #[serde(rename = "nameFull", alias = "fullName", default)]
    pub full_name: String,
    #[serde(default)]
    pub adults: u32,
    #[serde(default)]
    pub kids: u32,
    /// Always `adults + kids`
    #[serde(default)]
    pub places: u32,
}

impl RsvpRecord {
    /// Build a new record stamped with a fresh id and the current time.
    pub fn new(full_name: &str, adults: u32, kids: u32) -> Self {
        let full_name = full_name.trim().to_string();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: now_rfc3339(),
            name: to_ticket_name(&full_name),
            full_name,
            adults,
            kids,
            places: adults + kids,
        }
    }

    /// One line of the newest-first confirmation list.
    pub fn summary_line(&self) -> String {
        format!(
            "{} — {} adult(s), {} kid(s) · {} place(s)",
            self.name,
            self.adults,
            self.kids,
            self.adults + self.kids
        )
    }
}

/// Guest totals across a set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub adults: u32,
    pub kids: u32,
    pub guests: u32,
}

/// Sum adults and kids over all records.
pub fn compute_totals<'a, I>(records: I) -> Totals
where
    I: IntoIterator<Item = &'a RsvpRecord>,
{
    let (adults, kids) = records
        .into_iter()
        .fold((0u32, 0u32), |(a, k), r| {
            (a.saturating_add(r.adults), k.saturating_add(r.kids))
        });

    Totals {
        adults,
        kids,
        guests: adults.saturating_add(kids),
    }
}

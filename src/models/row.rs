// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Remote datastore row and the submission payload it is built from.

use crate::time_utils::now_rfc3339;
use serde::{Deserialize, Serialize};

/// RSVP row stored in the remote datastore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpRow {
    /// Record id (also used as document ID)
    pub id: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "nameFull")]
    pub name_full: String,
    #[serde(rename = "nameTicket")]
    pub name_ticket: String,
    pub adults: u32,
    pub kids: u32,
    pub places: u32,
    /// User agent of the submitting client
    #[serde(rename = "userAgent")]
    pub user_agent: String,
}

/// Body accepted by `POST /api/rsvp`.
///
/// Every field is optional at the wire level; `name` and `places` are
/// checked by the handler.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RsvpSubmission {
    pub id: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "nameFull", alias = "fullName")]
    pub name_full: Option<String>,
    pub adults: Option<u32>,
    pub kids: Option<u32>,
    pub places: Option<u32>,
}

impl RsvpSubmission {
    /// Convert into a row, filling server-side defaults.
    ///
    /// Returns `None` when the required `name` / `places` are missing,
    /// empty or zero.
    pub fn into_row(self, user_agent: Option<&str>) -> Option<RsvpRow> {
        let name = self.name.filter(|n| !n.trim().is_empty())?;
        let places = self.places.filter(|p| *p > 0)?;

        Some(RsvpRow {
            id: self
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            created_at: self.created_at.unwrap_or_else(now_rfc3339),
            name_full: self.name_full.unwrap_or_else(|| name.clone()),
            name_ticket: name,
            adults: self.adults.unwrap_or(0),
            kids: self.kids.unwrap_or(0),
            places,
            user_agent: user_agent.unwrap_or("Unknown").to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_row_requires_name_and_places() {
        let missing_name = RsvpSubmission {
            places: Some(2),
            ..Default::default()
        };
        assert!(missing_name.into_row(None).is_none());

        let zero_places = RsvpSubmission {
            name: Some("Evan Fonseca".to_string()),
            places: Some(0),
            ..Default::default()
        };
        assert!(zero_places.into_row(None).is_none());
    }

    #[test]
    fn test_into_row_fills_defaults() {
        let submission = RsvpSubmission {
            name: Some("Evan Fonseca".to_string()),
            places: Some(3),
            adults: Some(2),
            kids: Some(1),
            ..Default::default()
        };
        let row = submission.into_row(None).unwrap();
        assert_eq!(row.name_ticket, "Evan Fonseca");
        assert_eq!(row.name_full, "Evan Fonseca");
        assert_eq!(row.user_agent, "Unknown");
        assert!(!row.id.is_empty());
        assert!(!row.created_at.is_empty());
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! RSVP confirmation flow.
//!
//! One submission moves `Idle -> Validating`, then either back to `Idle` with
//! the errors in [`SubmitOutcome::Rejected`], or on to `Confirmed`. A
//! rejected submission leaves nothing behind. A confirmed one is appended to
//! the local store, mirrored to the remote API without waiting, and gets a
//! ticket. The last confirmed record lives in the [`Session`] so the ticket
//! can be downloaded again.

use crate::models::{compute_totals, RsvpRecord, Totals};
use crate::services::local_store::{KvStore, RecordStore, StoreError};
use crate::services::remote_sync::{RemoteSync, SyncOutcome};
use crate::services::validation::{clamp_count, validate_form, FormInput, MAX_ADULTS, MAX_KIDS};
use crate::ticket::{RenderError, Ticket, TicketRenderer};
use tokio::task::JoinHandle;

/// Where the current submission stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RsvpState {
    #[default]
    Idle,
    Validating,
    Confirmed,
}

/// Per-session state replacing page-level globals.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub state: RsvpState,
    pub last_confirmed: Option<RsvpRecord>,
}

/// Form values as typed, before coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct RawForm {
    pub name: String,
    pub adults: f64,
    pub kids: f64,
}

/// Totals plus the newest-first list of confirmations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub totals: Totals,
    pub lines: Vec<String>,
}

/// Everything produced by a confirmed submission.
#[derive(Debug)]
pub struct Confirmation {
    pub record: RsvpRecord,
    pub summary: Summary,
    /// Missing only if painting failed; the RSVP is stored either way.
    pub ticket: Option<Ticket>,
    /// In-flight remote mirror request. Dropping it does not cancel it.
    pub sync: Option<JoinHandle<SyncOutcome>>,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Rejected { errors: Vec<String> },
    Confirmed(Box<Confirmation>),
}

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("No RSVP has been confirmed in this session")]
    NoConfirmedRecord,

    #[error(transparent)]
    Render(#[from] RenderError),
}

pub struct RsvpController<S: KvStore> {
    store: RecordStore<S>,
    remote: RemoteSync,
    renderer: TicketRenderer,
    session: Session,
}

impl<S: KvStore> RsvpController<S> {
    pub fn new(store: RecordStore<S>, remote: RemoteSync, renderer: TicketRenderer) -> Self {
        Self {
            store,
            remote,
            renderer,
            session: Session::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> RsvpState {
        self.session.state
    }

    /// Run one submission through the state machine.
    ///
    /// Remote sync is spawned on the current tokio runtime when enabled.
    pub fn submit(&mut self, form: RawForm) -> Result<SubmitOutcome, ControllerError> {
        self.session.state = RsvpState::Validating;

        let adults = clamp_count(form.adults, MAX_ADULTS);
        let kids = clamp_count(form.kids, MAX_KIDS);
        let input = FormInput {
            name: form.name.trim().to_string(),
            adults: f64::from(adults),
            kids: f64::from(kids),
        };
        let validation = validate_form(&input);
        if !validation.ok {
            tracing::info!(errors = ?validation.errors, "RSVP rejected");
            self.session.state = RsvpState::Idle;
            return Ok(SubmitOutcome::Rejected {
                errors: validation.errors,
            });
        }

        let record = RsvpRecord::new(&input.name, adults, kids);

        let records = match self.store.append(record.clone()) {
            Ok(records) => records,
            Err(e) => {
                self.session.state = RsvpState::Idle;
                return Err(e.into());
            }
        };

        // Not awaited here; the outcome is only logged.
        let sync = self
            .remote
            .is_enabled()
            .then(|| self.remote.submit(&record));

        tracing::info!(
            id = %record.id,
            name = %record.name,
            adults = record.adults,
            kids = record.kids,
            "RSVP confirmed"
        );

        let ticket = match self.renderer.render(&record.name, record.adults, record.kids) {
            Ok(ticket) => Some(ticket),
            Err(e) => {
                tracing::error!(id = %record.id, error = %e, "Ticket rendering failed");
                None
            }
        };

        self.session.state = RsvpState::Confirmed;
        self.session.last_confirmed = Some(record.clone());

        Ok(SubmitOutcome::Confirmed(Box::new(Confirmation {
            record,
            summary: summarize(&records),
            ticket,
            sync,
        })))
    }

    /// Totals and list lines for everything stored locally.
    pub fn summary(&self) -> Summary {
        summarize(&self.store.load().into_records())
    }

    /// Remove every local record. The session is left as is.
    pub fn clear_all(&mut self) -> Result<(), ControllerError> {
        self.store.clear()?;
        tracing::info!("All local RSVPs cleared");
        Ok(())
    }

    /// Render the ticket for the last confirmed record again.
    pub fn download_ticket(&self) -> Result<Ticket, ControllerError> {
        let record = self
            .session
            .last_confirmed
            .as_ref()
            .ok_or(ControllerError::NoConfirmedRecord)?;
        Ok(self
            .renderer
            .render(&record.name, record.adults, record.kids)?)
    }
}

fn summarize(records: &[RsvpRecord]) -> Summary {
    Summary {
        totals: compute_totals(records),
        lines: records.iter().rev().map(RsvpRecord::summary_line).collect(),
    }
}

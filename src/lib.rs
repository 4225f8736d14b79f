// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Party RSVP: collect invitation confirmations and hand out tickets
//!
//! This crate provides the RSVP backend API, the local confirmation flow,
//! and the renderer for shareable PNG tickets.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod ticket;
pub mod time_utils;

use config::Config;
use db::RsvpDb;
use ticket::TicketRenderer;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: RsvpDb,
    pub renderer: TicketRenderer,
}

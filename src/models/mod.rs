// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod record;
pub mod row;

pub use record::{compute_totals, RsvpRecord, Totals};
pub use row::{RsvpRow, RsvpSubmission};

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod controller;
pub mod local_store;
pub mod naming;
pub mod remote_sync;
pub mod token;
pub mod validation;

pub use controller::{
    Confirmation, ControllerError, RawForm, RsvpController, RsvpState, Session, SubmitOutcome,
    Summary,
};
pub use local_store::{FileKvStore, KvStore, LoadOutcome, MemoryKvStore, RecordStore};
pub use remote_sync::{RemoteSync, SyncOutcome};

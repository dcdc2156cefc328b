// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Asynchronous conversion engine.
//!
//! * [`Worker`] - one cancellable, progress-reporting pass over (part of) a tree
//! * [`Orchestrator`] - kit selection, run scheduling and publishing for one node
//! * [`ConverterHandle`] - the converter reference shared by a run's workers
//! * [`Conversion`] - direction of a run, [`ToNative`] or [`ToPortable`]

pub mod direction;
pub mod events;
pub mod handle;
pub mod orchestrator;
pub mod worker;

pub use direction::{Conversion, ToNative, ToPortable};
pub use events::{
    KitListing, MessageLevel, RestoreOutcome, RunEvent, RunReport, RunTicket, RuntimeMessage,
    SwitchOutcome,
};
pub use handle::ConverterHandle;
pub use orchestrator::{NativeOrchestrator, Orchestrator, PortableOrchestrator};
pub use worker::{ItemFailure, Worker, WorkerOutcome, WorkerProgress};

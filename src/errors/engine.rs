// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Engine-level faults.
///
/// Unlike [`ConversionError`](super::ConversionError) these abort the operation
/// that raised them and are surfaced to the host.
#[derive(Error, Debug)]
pub enum EngineError {
    /// No kit is installed, so no converter can be bound. Runs never start.
    #[error("No conversion kit is available on this machine")]
    NoBackendAvailable,

    /// A kit was requested by name and is not installed.
    #[error("Could not find the '{name}' kit on this machine")]
    BackendNotFound { name: String },

    #[error(transparent)]
    KitLoad(#[from] KitError),
}

/// A kit failed to produce a converter for a host context.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KitError {
    #[error("Kit '{kit}' has no converter for application '{application}'")]
    UnsupportedApplication { kit: String, application: String },

    #[error("Kit '{kit}' failed to load its converter: {reason}")]
    LoadFailed { kit: String, reason: String },
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] to emit it with typed fields at its documented level.
//!
//! # Organization
//!
//! * `engine` - Run lifecycle, publishing and usage tracking
//! * `worker` - Worker lifecycle and per-item failures
//! * `kit` - Kit registration, selection and fallback

use tracing::Span;

pub mod engine;
pub mod kit;
pub mod worker;

/// Emit a message as a structured tracing event.
pub trait StructuredLog {
    /// Log at the message's documented level with its fields attached.
    fn log(&self);

    /// A span carrying the message's fields, for scoping follow-up events.
    ///
    /// Only messages that open a unit of work override this.
    fn span(&self, _name: &str) -> Span {
        Span::none()
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for conversion run lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Run start, completion and supersession
//! * Runs skipped for missing input
//! * Results discarded because a newer run exists
//! * Usage tracking failures

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Conversion run started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_grafter::observability::messages::engine::RunStarted;
///
/// let msg = RunStarted {
///     run_id: 7,
///     kit_name: "Objects",
///     direction: "native",
///     item_count: 12,
///     worker_count: 4,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct RunStarted<'a> {
    pub run_id: u64,
    pub kit_name: &'a str,
    pub direction: &'a str,
    pub item_count: usize,
    pub worker_count: usize,
}

impl Display for RunStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting run {} with kit {} ({}): {} items across {} workers",
            self.run_id, self.kit_name, self.direction, self.item_count, self.worker_count
        )
    }
}

impl StructuredLog for RunStarted<'_> {
    fn log(&self) {
        tracing::info!(
            run_id = self.run_id,
            kit_name = self.kit_name,
            direction = self.direction,
            item_count = self.item_count,
            worker_count = self.worker_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "run",
            span_name = name,
            run_id = self.run_id,
            kit_name = self.kit_name,
            direction = self.direction,
        )
    }
}

/// Run finished and its output was published.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_grafter::observability::messages::engine::RunCompleted;
/// use std::time::Duration;
///
/// let msg = RunCompleted {
///     run_id: 7,
///     item_count: 12,
///     failure_count: 1,
///     duration: Duration::from_millis(40),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct RunCompleted {
    pub run_id: u64,
    pub item_count: usize,
    pub failure_count: usize,
    pub duration: Duration,
}

impl Display for RunCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Run {} completed in {:?}: {} items, {} failed",
            self.run_id, self.duration, self.item_count, self.failure_count
        )
    }
}

impl StructuredLog for RunCompleted {
    fn log(&self) {
        tracing::info!(
            run_id = self.run_id,
            item_count = self.item_count,
            failure_count = self.failure_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }
}

/// Run was cancelled because a newer run started.
///
/// # Log Level
/// `debug!` - Expected under rapid input changes
pub struct RunSuperseded {
    pub run_id: u64,
    pub current_run_id: u64,
}

impl Display for RunSuperseded {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Run {} superseded by run {}",
            self.run_id, self.current_run_id
        )
    }
}

impl StructuredLog for RunSuperseded {
    fn log(&self) {
        tracing::debug!(
            run_id = self.run_id,
            current_run_id = self.current_run_id,
            "{}", self
        );
    }
}

/// Run request ignored because there is no input.
///
/// # Log Level
/// `debug!` - Normal for nodes with nothing connected
pub struct RunSkipped {
    pub run_id: u64,
}

impl Display for RunSkipped {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Run {} skipped: input is missing", self.run_id)
    }
}

impl StructuredLog for RunSkipped {
    fn log(&self) {
        tracing::debug!(run_id = self.run_id, "{}", self);
    }
}

/// Finished results were dropped instead of published.
///
/// # Log Level
/// `debug!` - The run lost the race against a newer one
pub struct PublishRejected {
    pub run_id: u64,
    pub current_run_id: u64,
}

impl Display for PublishRejected {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Discarding results of run {}: run {} is current",
            self.run_id, self.current_run_id
        )
    }
}

impl StructuredLog for PublishRejected {
    fn log(&self) {
        tracing::debug!(
            run_id = self.run_id,
            current_run_id = self.current_run_id,
            "{}", self
        );
    }
}

/// Usage tracking call failed. Never affects the run.
///
/// # Log Level
/// `debug!` - Best-effort telemetry
pub struct TrackerFailed<'a> {
    pub category: &'a str,
    pub action: &'a str,
    pub reason: &'a str,
}

impl Display for TrackerFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Usage tracking {}/{} failed: {}",
            self.category, self.action, self.reason
        )
    }
}

impl StructuredLog for TrackerFailed<'_> {
    fn log(&self) {
        tracing::debug!(
            category = self.category,
            action = self.action,
            reason = self.reason,
            "{}", self
        );
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for conversion worker events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Worker picked up its share of the input.
///
/// # Log Level
/// `debug!` - Per-worker detail
///
/// # Example
/// ```
/// use the_grafter::observability::messages::worker::WorkerStarted;
///
/// let msg = WorkerStarted {
///     run_id: 2,
///     worker_index: 0,
///     branch_count: 3,
///     item_count: 9,
/// };
///
/// assert_eq!(msg.to_string(), "Worker 0 of run 2 started: 3 branches, 9 items");
/// ```
pub struct WorkerStarted {
    pub run_id: u64,
    pub worker_index: usize,
    pub branch_count: usize,
    pub item_count: usize,
}

impl Display for WorkerStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Worker {} of run {} started: {} branches, {} items",
            self.worker_index, self.run_id, self.branch_count, self.item_count
        )
    }
}

impl StructuredLog for WorkerStarted {
    fn log(&self) {
        tracing::debug!(
            run_id = self.run_id,
            worker_index = self.worker_index,
            branch_count = self.branch_count,
            item_count = self.item_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "worker",
            span_name = name,
            run_id = self.run_id,
            worker_index = self.worker_index,
        )
    }
}

/// Worker finished its share.
///
/// # Log Level
/// `debug!` - Per-worker detail
pub struct WorkerCompleted {
    pub run_id: u64,
    pub worker_index: usize,
    pub converted: usize,
    pub failed: usize,
}

impl Display for WorkerCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Worker {} of run {} completed: {} converted, {} failed",
            self.worker_index, self.run_id, self.converted, self.failed
        )
    }
}

impl StructuredLog for WorkerCompleted {
    fn log(&self) {
        tracing::debug!(
            run_id = self.run_id,
            worker_index = self.worker_index,
            converted = self.converted,
            failed = self.failed,
            "{}", self
        );
    }
}

/// Worker observed cancellation and dropped its partial output.
///
/// # Log Level
/// `debug!` - Expected when a run is superseded
pub struct WorkerCancelled {
    pub run_id: u64,
    pub worker_index: usize,
    pub processed: usize,
}

impl Display for WorkerCancelled {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Worker {} of run {} cancelled after {} items",
            self.worker_index, self.run_id, self.processed
        )
    }
}

impl StructuredLog for WorkerCancelled {
    fn log(&self) {
        tracing::debug!(
            run_id = self.run_id,
            worker_index = self.worker_index,
            processed = self.processed,
            "{}", self
        );
    }
}

/// A worker task ended without returning an outcome, so its run is discarded.
///
/// # Log Level
/// `error!` - The run's output is lost
pub struct WorkerAborted<'a> {
    pub run_id: u64,
    pub reason: &'a str,
}

impl Display for WorkerAborted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "A worker of run {} stopped unexpectedly and the run was discarded: {}",
            self.run_id, self.reason
        )
    }
}

impl StructuredLog for WorkerAborted<'_> {
    fn log(&self) {
        tracing::error!(run_id = self.run_id, reason = self.reason, "{}", self);
    }
}

/// A single item could not be converted; a diagnostic takes its slot.
///
/// # Log Level
/// `warn!` - Output is incomplete
///
/// # Example
/// ```
/// use the_grafter::observability::messages::worker::ItemConversionFailed;
///
/// let msg = ItemConversionFailed {
///     run_id: 1,
///     path: "{0;2}",
///     index: 4,
///     reason: "missing property 'radius'",
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct ItemConversionFailed<'a> {
    pub run_id: u64,
    pub path: &'a str,
    pub index: usize,
    pub reason: &'a str,
}

impl Display for ItemConversionFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Item {}[{}] failed to convert in run {}: {}",
            self.path, self.index, self.run_id, self.reason
        )
    }
}

impl StructuredLog for ItemConversionFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            run_id = self.run_id,
            path = self.path,
            index = self.index,
            reason = self.reason,
            "{}", self
        );
    }
}

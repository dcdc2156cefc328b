// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::engine::worker::ItemFailure;
use crate::model::Converted;
use crate::tree::Tree;

/// Notification sent from a run to the host.
#[derive(Debug, Clone)]
pub enum RunEvent<O> {
    /// Overall completion of the run, non-decreasing, in `[0, 1]`.
    Progress { run_id: u64, fraction: f64 },
    /// Every worker finished and the report was published.
    Done {
        run_id: u64,
        report: Arc<RunReport<O>>,
    },
    /// A newer run started before this one could publish.
    Superseded { run_id: u64 },
}

impl<O> RunEvent<O> {
    pub fn run_id(&self) -> u64 {
        match self {
            RunEvent::Progress { run_id, .. }
            | RunEvent::Done { run_id, .. }
            | RunEvent::Superseded { run_id } => *run_id,
        }
    }
}

/// Published result of a completed run.
#[derive(Debug, Serialize)]
pub struct RunReport<O> {
    pub run_id: u64,
    pub kit_name: String,
    pub output: Tree<Converted<O>>,
    pub failures: Vec<ItemFailure>,
    pub duration: Duration,
}

impl<O> RunReport<O> {
    /// Number of output slots holding a converted value.
    pub fn converted_count(&self) -> usize {
        self.output.count() - self.failures.len()
    }
}

/// What `run` did with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunTicket {
    Started(u64),
    /// Input was missing; nothing was scheduled.
    Skipped,
}

impl RunTicket {
    pub fn run_id(&self) -> Option<u64> {
        match self {
            RunTicket::Started(run_id) => Some(*run_id),
            RunTicket::Skipped => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageLevel {
    Warning,
    Error,
}

/// A problem the host should show on the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeMessage {
    pub level: MessageLevel,
    pub text: String,
}

impl RuntimeMessage {
    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            text: text.into(),
        }
    }
}

impl fmt::Display for RuntimeMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            MessageLevel::Warning => write!(f, "warning: {}", self.text),
            MessageLevel::Error => write!(f, "error: {}", self.text),
        }
    }
}

/// Result of restoring a persisted kit selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// The persisted kit (or the default, when none was persisted) is active.
    Restored { kit: String },
    /// The persisted kit was unavailable; `active` took its place.
    FellBack { requested: String, active: String },
}

/// Result of a kit switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The requested kit was already active.
    Unchanged,
    Switched {
        previous: Option<String>,
        rerun: RunTicket,
    },
}

/// One entry of the kit menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KitListing {
    pub name: String,
    pub description: String,
    pub active: bool,
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Usage tracker sinks.
//!
//! * [`TracingTracker`] - records usage as `debug` tracing events
//! * [`NoopTracker`] - discards everything; the orchestrator default

use async_trait::async_trait;

use crate::errors::TrackerError;
use crate::traits::UsageTracker;

/// Tracker that drops every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracker;

#[async_trait]
impl UsageTracker for NoopTracker {
    async fn record(&self, _category: &str, _action: &str) -> Result<(), TrackerError> {
        Ok(())
    }
}

/// Tracker that logs each record under the `usage` target.
#[derive(Debug, Clone, Default)]
pub struct TracingTracker {
    source: String,
}

impl TracingTracker {
    /// `source` identifies the emitting node or tool in each record.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

#[async_trait]
impl UsageTracker for TracingTracker {
    async fn record(&self, category: &str, action: &str) -> Result<(), TrackerError> {
        tracing::debug!(
            target: "usage",
            source = %self.source,
            category,
            action,
            "Usage recorded: {}/{}",
            category,
            action
        );
        Ok(())
    }
}

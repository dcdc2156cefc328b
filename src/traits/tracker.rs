// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::errors::TrackerError;

/// Usage telemetry sink.
///
/// The engine never awaits a tracker on its own control path: every call is
/// dispatched on a background task and errors are dropped after logging.
#[async_trait]
pub trait UsageTracker: Send + Sync {
    async fn record(&self, category: &str, action: &str) -> Result<(), TrackerError>;
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Failure reported by a usage tracker sink. The engine logs and drops these.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Usage tracking failed for {category}/{action}: {reason}")]
pub struct TrackerError {
    pub category: String,
    pub action: String,
    pub reason: String,
}

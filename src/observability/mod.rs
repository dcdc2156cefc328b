// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for diagnostic and
//! operational logging throughout The Grafter. Message types follow a
//! struct-based pattern with a `Display` implementation to:
//!
//! * Eliminate magic strings scattered throughout the codebase
//! * Keep field names consistent between log lines
//! * Provide consistent, structured logging output
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::engine` - Run lifecycle, publishing and usage tracking
//! * `messages::worker` - Worker lifecycle and per-item failures
//! * `messages::kit` - Kit registration, selection and fallback
//!
//! # Usage
//!
//! ```rust
//! use the_grafter::observability::messages::{engine::RunSkipped, StructuredLog};
//!
//! RunSkipped { run_id: 3 }.log();
//! ```

pub mod messages;

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Seams between the engine and its external collaborators.

pub mod converter;
pub mod kit;
pub mod tracker;

pub use converter::ItemConverter;
pub use kit::{HostContext, Kit};
pub use tracker::UsageTracker;

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod conversion;
mod engine;
mod tracking;

pub use config::ConfigError;
pub use conversion::ConversionError;
pub use engine::{EngineError, KitError};
pub use tracking::TrackerError;

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-item conversion failures.
//!
//! A `ConversionError` never aborts a run. The worker replaces the failing item
//! with a diagnostic placeholder and moves on to the next one.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// The converter has no mapping for this kind of item.
    #[error("No conversion available for '{kind}'")]
    Unsupported { kind: String },

    /// A property the mapping needs is absent under both spellings.
    #[error("Required property '{key}' is missing")]
    MissingProperty { key: String },

    #[error("Property '{key}' has an invalid value: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Conversion failed: {0}")]
    Failed(String),
}

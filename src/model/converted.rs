// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder left in an output branch where an item failed to convert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Kind or type name of the input item that failed.
    pub source: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<diagnostic {}: {}>", self.source, self.message)
    }
}

/// One slot of a conversion output branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Converted<T> {
    Value(T),
    Diagnostic(Diagnostic),
}

impl<T> Converted<T> {
    pub fn is_value(&self) -> bool {
        matches!(self, Converted::Value(_))
    }

    pub fn is_diagnostic(&self) -> bool {
        matches!(self, Converted::Diagnostic(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Converted::Value(v) => Some(v),
            Converted::Diagnostic(_) => None,
        }
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Converted::Value(_) => None,
            Converted::Diagnostic(d) => Some(d),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Converted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Converted::Value(v) => write!(f, "{}", v),
            Converted::Diagnostic(d) => write!(f, "{}", d),
        }
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::ItemConverter;
use crate::errors::KitError;

/// The host execution context a converter is bound to.
///
/// This is passed explicitly through kit binding rather than read from any
/// ambient "active document".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostContext {
    /// Host application identifier, e.g. `rhino`.
    pub application: String,
    /// Active document in the host, when there is one.
    #[serde(default)]
    pub document: Option<String>,
}

impl HostContext {
    pub fn new(application: impl Into<String>) -> Self {
        Self {
            application: application.into(),
            document: None,
        }
    }

    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.document = Some(document.into());
        self
    }
}

impl Default for HostContext {
    fn default() -> Self {
        Self::new(crate::config::consts::DEFAULT_APPLICATION)
    }
}

/// A pluggable conversion backend.
///
/// A kit is discovered once per process and registered by name in the
/// [`KitRegistry`](crate::backends::KitRegistry). Selecting it binds a fresh
/// [`ItemConverter`] to the current host context.
pub trait Kit: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Whether this kit can produce a converter for `application`.
    fn supports(&self, application: &str) -> bool;

    fn load_converter(&self, context: &HostContext) -> Result<Arc<dyn ItemConverter>, KitError>;
}

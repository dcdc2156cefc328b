// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::{Arc, RwLock};

use crate::traits::ItemConverter;

/// Shared, swappable reference to the active converter.
///
/// Every worker of a run holds a clone of the same handle and reads it once
/// per item. A backend switch or context rebind swaps the converter in place,
/// so in-flight workers pick up the new converter at their next item. Reads
/// and the swap are not otherwise coordinated: an item already being
/// converted finishes with the converter it started with.
#[derive(Clone)]
pub struct ConverterHandle {
    inner: Arc<RwLock<Arc<dyn ItemConverter>>>,
}

impl ConverterHandle {
    pub fn new(converter: Arc<dyn ItemConverter>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(converter)),
        }
    }

    /// Snapshot of the converter bound right now.
    pub fn current(&self) -> Arc<dyn ItemConverter> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Swaps in `converter`, returning the one it replaced.
    pub fn replace(&self, converter: Arc<dyn ItemConverter>) -> Arc<dyn ItemConverter> {
        let mut slot = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        std::mem::replace(&mut *slot, converter)
    }

    pub fn name(&self) -> String {
        self.current().name().to_string()
    }
}

impl std::fmt::Debug for ConverterHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConverterHandle")
            .field("converter", &self.name())
            .finish()
    }
}

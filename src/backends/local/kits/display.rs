// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::errors::{ConversionError, KitError};
use crate::model::{Item, NativeItem};
use crate::traits::{HostContext, ItemConverter, Kit};

pub const DISPLAY_KIT_NAME: &str = "Display";
const TEXT_TYPE: &str = "Text";
const TEXT_FIELD: &str = "value";

/// Kit that renders items as text, useful for previewing a tree.
pub struct DisplayKit;

impl DisplayKit {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DisplayKit {
    fn default() -> Self {
        Self::new()
    }
}

impl Kit for DisplayKit {
    fn name(&self) -> &str {
        DISPLAY_KIT_NAME
    }

    fn description(&self) -> &str {
        "Converts items into their textual form"
    }

    fn supports(&self, _application: &str) -> bool {
        true
    }

    fn load_converter(&self, _context: &HostContext) -> Result<Arc<dyn ItemConverter>, KitError> {
        Ok(Arc::new(DisplayConverter))
    }
}

/// Converter produced by [`DisplayKit`].
pub struct DisplayConverter;

impl ItemConverter for DisplayConverter {
    fn name(&self) -> &str {
        DISPLAY_KIT_NAME
    }

    fn to_native(&self, item: &Item) -> Result<NativeItem, ConversionError> {
        Ok(NativeItem::new(TEXT_TYPE).with_field(TEXT_FIELD, item.to_string()))
    }

    fn to_portable(&self, native: &NativeItem) -> Result<Item, ConversionError> {
        Ok(Item::new(TEXT_TYPE).with(TEXT_FIELD, native.to_string()))
    }
}

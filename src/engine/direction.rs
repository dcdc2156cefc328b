// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::ConversionError;
use crate::model::{Item, NativeItem};
use crate::traits::ItemConverter;

/// Direction of a conversion run.
///
/// Workers and orchestrators are generic over a `Conversion` so that one
/// engine serves both node flavours: portable items in and native items out,
/// or the reverse.
pub trait Conversion: Send + Sync + 'static {
    type Input: Send + Sync + 'static;
    type Output: Send + Sync + 'static;

    /// Usage tracker action recorded once per started run.
    const ACTION: &'static str;

    fn convert(
        converter: &dyn ItemConverter,
        input: &Self::Input,
    ) -> Result<Self::Output, ConversionError>;

    /// Short description of an input item, used as the source of a diagnostic.
    fn describe(input: &Self::Input) -> String;
}

/// Portable [`Item`]s to host-native items.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToNative;

impl Conversion for ToNative {
    type Input = Item;
    type Output = NativeItem;

    const ACTION: &'static str = "native";

    fn convert(converter: &dyn ItemConverter, input: &Item) -> Result<NativeItem, ConversionError> {
        converter.to_native(input)
    }

    fn describe(input: &Item) -> String {
        if input.kind.is_empty() {
            "<untyped>".to_string()
        } else {
            input.kind.clone()
        }
    }
}

/// Host-native items back to portable [`Item`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToPortable;

impl Conversion for ToPortable {
    type Input = NativeItem;
    type Output = Item;

    const ACTION: &'static str = "portable";

    fn convert(converter: &dyn ItemConverter, input: &NativeItem) -> Result<Item, ConversionError> {
        converter.to_portable(input)
    }

    fn describe(input: &NativeItem) -> String {
        input.type_name.clone()
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::ConversionError;
use crate::model::{Item, NativeItem};

/// Converts single items between the portable and the host-native model.
///
/// Converters are produced by a [`Kit`](super::Kit) bound to a
/// [`HostContext`](super::HostContext). Several workers of the same run call
/// the same converter concurrently, so implementations must not mutate shared
/// state; reading from the bound host context is fine.
pub trait ItemConverter: Send + Sync {
    /// Name of the kit that produced this converter.
    fn name(&self) -> &str;

    fn to_native(&self, item: &Item) -> Result<NativeItem, ConversionError>;

    fn to_portable(&self, native: &NativeItem) -> Result<Item, ConversionError>;
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Item model on both sides of a conversion.
//!
//! * [`Item`] - the portable, dynamically keyed object
//! * [`NativeItem`] - the host-native representation produced by a kit
//! * [`Converted`] - an output slot holding either a value or a [`Diagnostic`]

mod converted;
mod item;
mod native;
mod value;

pub use converted::{Converted, Diagnostic};
pub use item::{detached_alias, Item};
pub use native::NativeItem;
pub use value::Value;

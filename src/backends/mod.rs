// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Conversion kit backends for The Grafter.
//!
//! A kit is a pluggable conversion module. It is discovered once, registered by
//! name in the [`KitRegistry`], and asked for an
//! [`ItemConverter`](crate::traits::ItemConverter) bound to the host context
//! whenever a node selects it.
//!
//! # Available Backends
//!
//! ## Local Backend
//! Kits compiled into the crate:
//! - **Objects** (default): carries kind and logical properties across
//! - **Display**: renders every item as text
//!
//! ## Stub Backend (Test-Only)
//! Configurable kits and converters used by engine tests (only available in
//! test builds): label suffixing, per-item failures, artificial delays and
//! application filters.
//!
//! # Architecture
//!
//! ```text
//! Registry (name -> Kit) → Kit::load_converter(HostContext) → ItemConverter → Worker
//! ```

pub mod local;
pub mod registry;
#[cfg(test)]
pub mod stub;

pub use registry::KitRegistry;

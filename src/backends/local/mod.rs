// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod factory;
pub mod kits;

pub use factory::LocalKitFactory;
pub use kits::*;

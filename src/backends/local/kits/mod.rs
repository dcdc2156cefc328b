// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod display;
pub mod objects;

pub use display::*;
pub use objects::*;

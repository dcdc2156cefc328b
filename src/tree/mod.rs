// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Tree data structure shared by conversion input and output.
//!
//! A [`Tree`] maps [`Path`]s to ordered branches of items. Conversions preserve
//! the topology of a tree exactly: the same paths, in the same order, with the
//! same number of items per branch.

mod path;
mod structure;

pub use path::{ParsePathError, Path};
pub use structure::Tree;

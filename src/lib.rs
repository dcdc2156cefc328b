// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // conversion kits + registry
pub mod config;     // config loading + node state
pub mod engine;     // workers + orchestrator
pub mod errors;     // error handling
pub mod model;      // portable and native items
pub mod observability;
pub mod tracking;   // usage tracker sinks
pub mod traits;     // unified abstractions
pub mod tree;       // path-keyed data trees

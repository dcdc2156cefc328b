// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
mod node_state;
mod runtime;
mod validation;

#[cfg(test)]
mod integration_tests;
pub mod consts;

pub use loader::{
    load_and_validate_config, load_config, parse_toml, parse_yaml, ConversionDirection,
    EngineOptions, GrafterConfig, KitOptions,
};
pub use node_state::NodeState;
pub use runtime::{EngineBuilder, EngineParts};
pub use validation::{validate_config, ValidationError};

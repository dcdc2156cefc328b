// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{DEFAULT_WORKER_COUNT, MAX_WORKER_COUNT};
use crate::config::NodeState;
use crate::errors::ConfigError;
use crate::traits::HostContext;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure for a conversion node.
///
/// It is typically loaded from a YAML file; TOML is accepted as well and
/// selected by file extension.
///
/// # Fields
/// * `direction` - Which way items are converted
/// * `host` - Host application and document the converter binds to
/// * `engine` - Worker scheduling options (optional)
/// * `kits` - Kit registry options (optional)
/// * `node` - Persisted node state, i.e. the selected kit (optional)
///
/// # Example
/// ```yaml
/// direction: to_native
/// host:
///   application: rhino
///   document: site.3dm
/// engine:
///   worker_count: 4
/// kits:
///   default: Objects
/// node:
///   KitName: Display
/// ```
#[derive(Debug, Deserialize)]
pub struct GrafterConfig {
    #[serde(default)]
    pub direction: ConversionDirection,
    #[serde(default)]
    pub host: HostContext,
    #[serde(default)]
    pub engine: EngineOptions,
    #[serde(default)]
    pub kits: KitOptions,
    #[serde(default)]
    pub node: NodeState,
}

/// Direction of a conversion node.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversionDirection {
    /// Portable items in, host-native items out.
    #[default]
    ToNative,
    /// Host-native items in, portable items out.
    ToPortable,
}

/// Worker scheduling options.
///
/// # Fields
/// * `worker_count` - How many concurrent workers a run may be split across.
///   Defaults to the available parallelism and is clamped to
///   `[1, MAX_WORKER_COUNT]`.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct EngineOptions {
    pub worker_count: Option<usize>,
}

impl EngineOptions {
    pub fn with_worker_count(worker_count: usize) -> Self {
        Self {
            worker_count: Some(worker_count),
        }
    }

    /// Configured worker count, or the system's parallelism, clamped to bounds.
    pub fn get_worker_count(&self) -> usize {
        let requested = self.worker_count.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(DEFAULT_WORKER_COUNT)
        });
        requested.clamp(1, MAX_WORKER_COUNT)
    }
}

/// Kit registry options.
///
/// # Fields
/// * `default` - Name of the kit to treat as default instead of the first
///   registered one
#[derive(Debug, Deserialize, Default, Clone)]
pub struct KitOptions {
    pub default: Option<String>,
}

/// Load a config from a YAML or TOML file, chosen by extension.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GrafterConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("yaml") | Some("yml") => parse_yaml(&content),
        Some("toml") => parse_toml(&content),
        _ => Err(ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

pub fn parse_yaml(content: &str) -> Result<GrafterConfig, ConfigError> {
    Ok(serde_yaml::from_str(content)?)
}

pub fn parse_toml(content: &str) -> Result<GrafterConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load a config and reject it if validation finds problems.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<GrafterConfig, ConfigError> {
    let cfg = load_config(path)?;

    if let Err(validation_errors) = crate::config::validate_config(&cfg) {
        let error_messages: Vec<String> = validation_errors.iter().map(|e| e.to_string()).collect();
        return Err(ConfigError::Invalid(format!(
            "Configuration validation failed:\n{}",
            error_messages.join("\n")
        )));
    }

    Ok(cfg)
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::backends::KitRegistry;
use crate::config::{ConversionDirection, EngineOptions, GrafterConfig, NodeState};
use crate::engine::{NativeOrchestrator, Orchestrator, PortableOrchestrator, RunEvent};
use crate::errors::EngineError;
use crate::model::{Item, NativeItem};
use crate::traits::HostContext;

/// Everything needed to create orchestrators for a configured node.
#[derive(Debug, Clone)]
pub struct EngineParts {
    pub registry: Arc<KitRegistry>,
    pub context: HostContext,
    pub options: EngineOptions,
    pub direction: ConversionDirection,
    pub node: NodeState,
}

impl EngineParts {
    pub fn native_orchestrator(
        &self,
        runtime: Handle,
    ) -> (NativeOrchestrator, UnboundedReceiver<RunEvent<NativeItem>>) {
        Orchestrator::new(self.registry.clone(), self.context.clone(), &self.options, runtime)
    }

    pub fn portable_orchestrator(
        &self,
        runtime: Handle,
    ) -> (PortableOrchestrator, UnboundedReceiver<RunEvent<Item>>) {
        Orchestrator::new(self.registry.clone(), self.context.clone(), &self.options, runtime)
    }
}

/// Engine builder - assembles the kit registry and node settings from configuration.
///
/// # Examples
///
/// ```
/// use the_grafter::config::{parse_yaml, EngineBuilder};
///
/// let config = parse_yaml("host:\n  application: rhino\nkits:\n  default: Display").unwrap();
/// let parts = EngineBuilder::from_config(&config).unwrap();
///
/// assert_eq!(parts.registry.default_kit().unwrap().name(), "Display");
/// assert_eq!(parts.context.application, "rhino");
/// ```
pub struct EngineBuilder;

impl EngineBuilder {
    /// Build engine parts over the built-in kits.
    pub fn from_config(cfg: &GrafterConfig) -> Result<EngineParts, EngineError> {
        Self::with_registry(cfg, KitRegistry::builtin())
    }

    /// Build engine parts over a caller-populated registry.
    ///
    /// A configured `kits.default` must name a registered kit.
    pub fn with_registry(
        cfg: &GrafterConfig,
        mut registry: KitRegistry,
    ) -> Result<EngineParts, EngineError> {
        if let Some(default) = cfg.kits.default.as_deref().map(str::trim) {
            if !default.is_empty() {
                registry.set_default(default)?;
            }
        }

        Ok(EngineParts {
            registry: Arc::new(registry),
            context: cfg.host.clone(),
            options: cfg.engine.clone(),
            direction: cfg.direction,
            node: cfg.node.clone(),
        })
    }
}

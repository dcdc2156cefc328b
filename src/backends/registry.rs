// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;

use crate::backends::local::LocalKitFactory;
use crate::errors::EngineError;
use crate::observability::messages::{kit::KitRegistered, StructuredLog};
use crate::traits::Kit;

/// Ordered registry of installed kits, keyed by name.
///
/// The registry is populated once at startup and then shared read-only by
/// every orchestrator in the process. Lookup is by exact name; there is no
/// ambient discovery after construction.
///
/// The default kit is the configured one when set, otherwise the first kit
/// registered.
///
/// ```
/// use the_grafter::backends::KitRegistry;
///
/// let registry = KitRegistry::builtin();
/// assert_eq!(registry.default_kit().unwrap().name(), "Objects");
/// assert!(registry.by_name("Display").is_ok());
/// assert!(registry.by_name("Revit").is_err());
/// ```
#[derive(Clone, Default)]
pub struct KitRegistry {
    kits: Vec<Arc<dyn Kit>>,
    index: HashMap<String, usize>,
    default: Option<String>,
}

impl KitRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every kit compiled into this crate.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for name in LocalKitFactory::list_available_implementations() {
            match LocalKitFactory::create_kit(name) {
                Ok(kit) => registry.register(kit),
                Err(e) => tracing::warn!(kit = name, "{}", e),
            }
        }
        registry
    }

    /// Register a kit. A kit with the same name replaces the earlier one in
    /// place, keeping its position.
    pub fn register(&mut self, kit: Arc<dyn Kit>) {
        let name = kit.name().to_string();
        KitRegistered {
            kit_name: &name,
            description: kit.description(),
        }
        .log();

        match self.index.get(&name) {
            Some(&position) => self.kits[position] = kit,
            None => {
                self.index.insert(name, self.kits.len());
                self.kits.push(kit);
            }
        }
    }

    /// Make `name` the default kit. Fails if it is not registered.
    pub fn set_default(&mut self, name: &str) -> Result<(), EngineError> {
        self.by_name(name)?;
        self.default = Some(name.to_string());
        Ok(())
    }

    /// All kits in registration order.
    pub fn list(&self) -> &[Arc<dyn Kit>] {
        &self.kits
    }

    /// Kits able to produce a converter for `application`, in registration order.
    pub fn kits_for_app(&self, application: &str) -> Vec<Arc<dyn Kit>> {
        self.kits
            .iter()
            .filter(|kit| kit.supports(application))
            .cloned()
            .collect()
    }

    pub fn default_kit(&self) -> Result<Arc<dyn Kit>, EngineError> {
        if let Some(name) = &self.default {
            return self.by_name(name);
        }
        self.kits
            .first()
            .cloned()
            .ok_or(EngineError::NoBackendAvailable)
    }

    /// Default kit for a host application.
    ///
    /// Uses the registry default when it supports `application`, otherwise the
    /// first kit that does.
    pub fn default_kit_for(&self, application: &str) -> Result<Arc<dyn Kit>, EngineError> {
        match self.default_kit() {
            Ok(kit) if kit.supports(application) => Ok(kit),
            _ => self
                .kits_for_app(application)
                .into_iter()
                .next()
                .ok_or(EngineError::NoBackendAvailable),
        }
    }

    pub fn by_name(&self, name: &str) -> Result<Arc<dyn Kit>, EngineError> {
        self.index
            .get(name)
            .map(|&position| self.kits[position].clone())
            .ok_or_else(|| EngineError::BackendNotFound {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.kits.iter().map(|kit| kit.name())
    }

    pub fn len(&self) -> usize {
        self.kits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kits.is_empty()
    }
}

impl std::fmt::Debug for KitRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KitRegistry")
            .field("kit_count", &self.kits.len())
            .field("kit_names", &self.names().collect::<Vec<_>>())
            .field("default", &self.default)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::StubKit;

    #[test]
    fn test_empty_registry_has_no_default() {
        let registry = KitRegistry::new();
        assert!(registry.is_empty());
        assert!(matches!(registry.default_kit(), Err(EngineError::NoBackendAvailable)));
        assert!(matches!(
            registry.default_kit_for("rhino"),
            Err(EngineError::NoBackendAvailable)
        ));
    }

    #[test]
    fn test_list_preserves_registration_order() {
        let mut registry = KitRegistry::new();
        registry.register(Arc::new(StubKit::new("Zeta")));
        registry.register(Arc::new(StubKit::new("Alpha")));
        registry.register(Arc::new(StubKit::new("Mid")));

        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(registry.default_kit().unwrap().name(), "Zeta");
    }

    #[test]
    fn test_reregistering_replaces_in_place() {
        let mut registry = KitRegistry::new();
        registry.register(Arc::new(StubKit::new("A")));
        registry.register(Arc::new(StubKit::new("B")));
        registry.register(Arc::new(StubKit::new("A").with_description("second")));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.list()[0].description(), "second");
    }

    #[test]
    fn test_by_name_reports_missing_kit() {
        let registry = KitRegistry::builtin();
        match registry.by_name("unknown-backend") {
            Err(EngineError::BackendNotFound { name }) => assert_eq!(name, "unknown-backend"),
            other => panic!(
                "expected BackendNotFound, got {:?}",
                other.map(|k| k.name().to_string())
            ),
        }
    }

    #[test]
    fn test_set_default_requires_registered_kit() {
        let mut registry = KitRegistry::builtin();
        assert!(registry.set_default("Nope").is_err());
        registry.set_default("Display").unwrap();
        assert_eq!(registry.default_kit().unwrap().name(), "Display");
    }

    #[test]
    fn test_kits_for_app_filters_by_support() {
        let mut registry = KitRegistry::new();
        registry.register(Arc::new(StubKit::new("RevitOnly").for_apps(&["revit"])));
        registry.register(Arc::new(StubKit::new("RhinoOnly").for_apps(&["rhino"])));
        registry.register(Arc::new(StubKit::new("Anywhere")));

        let rhino: Vec<String> = registry
            .kits_for_app("rhino")
            .iter()
            .map(|k| k.name().to_string())
            .collect();
        assert_eq!(rhino, vec!["RhinoOnly", "Anywhere"]);

        // Registry default is RevitOnly, which cannot serve rhino.
        assert_eq!(registry.default_kit().unwrap().name(), "RevitOnly");
        assert_eq!(registry.default_kit_for("rhino").unwrap().name(), "RhinoOnly");
        assert_eq!(registry.default_kit_for("revit").unwrap().name(), "RevitOnly");
    }
}

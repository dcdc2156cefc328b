// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use super::kits::*;
use crate::traits::Kit;

/// Factory for the kits compiled into this crate.
pub struct LocalKitFactory;

impl LocalKitFactory {
    /// Create a kit instance by name.
    ///
    /// - "Objects" -> ObjectsKit
    /// - "Display" -> DisplayKit
    pub fn create_kit(name: &str) -> Result<Arc<dyn Kit>, String> {
        match name {
            OBJECTS_KIT_NAME => Ok(Arc::new(ObjectsKit::new())),
            DISPLAY_KIT_NAME => Ok(Arc::new(DisplayKit::new())),

            // Add more kits here as they're implemented
            _ => Err(format!("Unknown local kit implementation: '{}'", name)),
        }
    }

    /// List all built-in kit names, default first.
    pub fn list_available_implementations() -> Vec<&'static str> {
        vec![OBJECTS_KIT_NAME, DISPLAY_KIT_NAME]
    }

    /// Check if a kit is built in
    pub fn is_implementation_available(name: &str) -> bool {
        Self::list_available_implementations().contains(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_every_listed_kit() {
        for name in LocalKitFactory::list_available_implementations() {
            let kit = LocalKitFactory::create_kit(name)
                .unwrap_or_else(|e| panic!("Failed to create kit {}: {}", name, e));
            assert_eq!(kit.name(), name);
            assert!(!kit.description().is_empty());
        }
    }

    #[test]
    fn test_create_kit_unknown_name() {
        let result = LocalKitFactory::create_kit("Revit2021");
        assert!(result.is_err());
        let error_msg = result.err().unwrap();
        assert!(error_msg.contains("Unknown local kit implementation"));
    }

    #[test]
    fn test_is_implementation_available() {
        assert!(LocalKitFactory::is_implementation_available("Objects"));
        assert!(LocalKitFactory::is_implementation_available("Display"));
        assert!(!LocalKitFactory::is_implementation_available("objects"));
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

#[cfg(test)]
mod integration_tests {
    use tokio::runtime::Handle;

    use crate::config::{
        load_and_validate_config, load_config, ConversionDirection, EngineBuilder,
    };
    use crate::engine::{MessageLevel, RestoreOutcome};
    use crate::errors::ConfigError;
    use crate::model::Item;
    use crate::tree::{Path, Tree};

    /// Test that the Rhino YAML configuration loads with every section
    #[test]
    fn test_rhino_native_yaml_loading() {
        let config = load_and_validate_config("configs/rhino-native.yaml").unwrap();

        assert_eq!(config.direction, ConversionDirection::ToNative);
        assert_eq!(config.host.application, "rhino");
        assert_eq!(config.host.document.as_deref(), Some("site.3dm"));
        assert_eq!(config.engine.get_worker_count(), 4);
        assert_eq!(config.kits.default.as_deref(), Some("Objects"));
        assert_eq!(config.node.kit_name(), Some("Display"));
    }

    /// Test that TOML is selected by extension
    #[test]
    fn test_revit_portable_toml_loading() {
        let config = load_and_validate_config("configs/revit-portable.toml").unwrap();

        assert_eq!(config.direction, ConversionDirection::ToPortable);
        assert_eq!(config.host.application, "revit");
        assert!(config.host.document.is_none());
        assert_eq!(config.engine.get_worker_count(), 2);
        assert!(config.node.kit_name().is_none());
    }

    /// Test that validation reports every blank field at once
    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(load_config("configs/invalid.yaml").is_ok());

        match load_and_validate_config("configs/invalid.yaml") {
            Err(ConfigError::Invalid(message)) => {
                assert!(message.contains("host.application"));
                assert!(message.contains("host.document"));
                assert!(message.contains("kits.default"));
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_reports_path() {
        match load_config("configs/does-not-exist.yaml") {
            Err(ConfigError::Io { path, .. }) => {
                assert!(path.ends_with("does-not-exist.yaml"));
            }
            other => panic!("expected io error, got {:?}", other),
        }
    }

    /// Test that a configured node restores its persisted kit
    #[tokio::test]
    async fn test_config_restores_persisted_kit() {
        let config = load_and_validate_config("configs/rhino-native.yaml").unwrap();
        let parts = EngineBuilder::from_config(&config).unwrap();
        let (mut orchestrator, _events) = parts.native_orchestrator(Handle::current());
        assert_eq!(orchestrator.active_kit(), Some("Objects"));

        let outcome = orchestrator.restore_state(&parts.node).unwrap();

        assert_eq!(outcome, RestoreOutcome::Restored { kit: "Display".to_string() });
        assert_eq!(orchestrator.save_state(), parts.node);
        assert!(orchestrator.take_messages().is_empty());
    }

    /// Test that a node saved with an unavailable kit degrades to a warning
    #[tokio::test]
    async fn test_config_with_missing_kit_falls_back() {
        let config = load_and_validate_config("configs/missing-kit.yaml").unwrap();
        let parts = EngineBuilder::from_config(&config).unwrap();
        let (mut orchestrator, _events) = parts.native_orchestrator(Handle::current());

        let outcome = orchestrator.restore_state(&parts.node).unwrap();

        assert_eq!(
            outcome,
            RestoreOutcome::FellBack {
                requested: "Revit".to_string(),
                active: "Objects".to_string(),
            }
        );
        let messages = orchestrator.take_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].level, MessageLevel::Warning);

        // The node still converts; it was only the selection that degraded.
        let mut input = Tree::new();
        input.append(Path::from([0]), Item::new("Point").with("x", 1.0).with("y", 2.0));
        assert!(orchestrator.run(input).unwrap().run_id().is_some());
    }
}

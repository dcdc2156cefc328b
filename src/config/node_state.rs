// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// State persisted with a placed conversion node.
///
/// The only field is the name of the selected kit, stored under `KitName`
/// next to the node's other saved configuration. An absent or blank name means
/// "use the default kit".
///
/// ```
/// use the_grafter::config::NodeState;
///
/// let state = NodeState::with_kit("Display");
/// let yaml = state.to_yaml().unwrap();
/// assert!(yaml.contains("KitName: Display"));
/// assert_eq!(NodeState::from_yaml(&yaml).unwrap(), state);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeState {
    #[serde(rename = "KitName", default, skip_serializing_if = "Option::is_none")]
    kit_name: Option<String>,
}

impl NodeState {
    pub fn with_kit(kit_name: impl Into<String>) -> Self {
        Self {
            kit_name: Some(kit_name.into()),
        }
    }

    /// The persisted kit name, ignoring blank values.
    pub fn kit_name(&self) -> Option<&str> {
        self.kit_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::consts::NODE_STATE_KEY;

    #[test]
    fn test_blank_name_means_default() {
        let cases = vec![
            ("", None),
            ("   ", None),
            ("Objects", Some("Objects")),
            (" Display ", Some("Display")),
        ];

        for (raw, expected) in cases {
            assert_eq!(NodeState::with_kit(raw).kit_name(), expected, "raw '{}'", raw);
        }
        assert_eq!(NodeState::default().kit_name(), None);
    }

    #[test]
    fn test_absent_field_deserializes_to_default() {
        let state = NodeState::from_yaml("{}").unwrap();
        assert_eq!(state, NodeState::default());
    }

    #[test]
    fn test_default_state_serializes_without_kit_name() {
        let yaml = NodeState::default().to_yaml().unwrap();
        assert!(!yaml.contains(NODE_STATE_KEY));
    }

    #[test]
    fn test_toml_uses_persisted_key() {
        let toml = NodeState::with_kit("Objects").to_toml().unwrap();
        assert_eq!(toml.trim(), r#"KitName = "Objects""#);
    }
}

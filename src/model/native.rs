// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::Value;

/// A host-native item as handed to (or received from) the host application.
///
/// The engine treats native items as opaque: `type_name` names the host type
/// and `fields` carries whatever the converter chose to put there.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NativeItem {
    pub type_name: String,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

impl NativeItem {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

impl fmt::Display for NativeItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name)?;
        if !self.fields.is_empty() {
            write!(f, " {{")?;
            for (i, (key, value)) in self.fields.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, " {}: {}", key, value)?;
            }
            write!(f, " }}")?;
        }
        Ok(())
    }
}

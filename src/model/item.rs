// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::Value;
use crate::config::consts::DETACHED_PREFIX;

/// A portable item: a kind plus a dynamically keyed property bag.
///
/// A logical key may be stored either under its plain name (`"length"`) or
/// under the detached alias (`"@length"`). Both spellings address the same
/// logical slot; [`Item::lookup`] tries the plain key first.
///
/// The bag serializes under its own `properties` field, so any key
/// (including `"kind"`) is a property and never shadows the item's kind.
///
/// ```
/// use the_grafter::model::{Item, Value};
///
/// let item = Item::new("Line").with("@length", 4.5).with("layer", Value::Null);
///
/// assert_eq!(item.lookup("length"), Some(&Value::Float(4.5)));
/// assert_eq!(item.lookup("layer"), Some(&Value::Null));
/// assert_eq!(item.lookup("colour"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Item {
    #[serde(default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    properties: BTreeMap<String, Value>,
}

impl Item {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Builder-style [`Item::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Stores `value` under `key` exactly as spelled.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Resolves a logical key.
    ///
    /// Returns `None` when neither `key` nor its detached alias is present.
    /// A key that is present with a null value resolves to `Some(&Value::Null)`.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        self.properties
            .get(key)
            .or_else(|| self.properties.get(&detached_alias(key)))
    }

    /// Resolves a logical key and expands list values element-wise.
    ///
    /// A scalar value yields a single element; a list yields its elements.
    pub fn lookup_each(&self, key: &str) -> Option<Vec<&Value>> {
        self.lookup(key).map(|value| match value {
            Value::List(items) => items.iter().collect(),
            other => vec![other],
        })
    }

    /// Raw properties as stored, including detached spellings.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Properties keyed by logical name.
    ///
    /// Detached aliases are folded onto their plain key. When both spellings
    /// exist the plain one wins, matching [`Item::lookup`].
    pub fn logical_properties(&self) -> BTreeMap<String, Value> {
        let mut logical = BTreeMap::new();
        for (key, value) in &self.properties {
            match key.strip_prefix(DETACHED_PREFIX) {
                Some(plain) if !self.properties.contains_key(plain) => {
                    logical.insert(plain.to_string(), value.clone());
                }
                Some(_) => {}
                None => {
                    logical.insert(key.clone(), value.clone());
                }
            }
        }
        logical
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl FromIterator<(String, Value)> for Item {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            kind: String::new(),
            properties: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.kind)?;
        for (i, (key, value)) in self.properties.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        write!(f, ")")
    }
}

/// The detached spelling of a logical key.
pub fn detached_alias(key: &str) -> String {
    format!("{}{}", DETACHED_PREFIX, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_prefers_plain_key_then_alias() {
        struct TestCase {
            name: &'static str,
            item: Item,
            key: &'static str,
            expected: Option<Value>,
        }

        let test_cases = vec![
            TestCase {
                name: "plain key only",
                item: Item::new("Line").with("length", 3i64),
                key: "length",
                expected: Some(Value::Int(3)),
            },
            TestCase {
                name: "detached alias only",
                item: Item::new("Line").with("@length", 7i64),
                key: "length",
                expected: Some(Value::Int(7)),
            },
            TestCase {
                name: "both spellings, plain wins",
                item: Item::new("Line").with("length", 1i64).with("@length", 2i64),
                key: "length",
                expected: Some(Value::Int(1)),
            },
            TestCase {
                name: "present but null",
                item: Item::new("Line").with("length", Value::Null),
                key: "length",
                expected: Some(Value::Null),
            },
            TestCase {
                name: "absent under both spellings",
                item: Item::new("Line").with("width", 1i64),
                key: "length",
                expected: None,
            },
        ];

        for test_case in test_cases {
            assert_eq!(
                test_case.item.lookup(test_case.key).cloned(),
                test_case.expected,
                "case '{}'",
                test_case.name
            );
        }
    }

    #[test]
    fn test_null_is_distinguishable_from_missing() {
        let item = Item::new("Wall").with("@height", Value::Null);
        let found = item.lookup("height");
        assert!(found.is_some());
        assert!(found.map(Value::is_null).unwrap_or(false));
        assert!(item.lookup("width").is_none());
    }

    #[test]
    fn test_lookup_each_expands_lists() {
        let item = Item::new("Polyline")
            .with("@points", vec![1i64, 2, 3])
            .with("closed", true);

        let points = item.lookup_each("points").unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[2], &Value::Int(3));

        let closed = item.lookup_each("closed").unwrap();
        assert_eq!(closed, vec![&Value::Bool(true)]);

        assert!(item.lookup_each("missing").is_none());
    }

    #[test]
    fn test_logical_properties_fold_aliases() {
        let item = Item::new("Mesh")
            .with("@vertices", vec![0i64, 1])
            .with("name", "m")
            .with("units", "mm")
            .with("@units", "m");

        let logical = item.logical_properties();
        assert_eq!(logical.len(), 3);
        assert_eq!(logical.get("vertices"), Some(&Value::from(vec![0i64, 1])));
        assert_eq!(logical.get("units"), Some(&Value::from("mm")));
        assert!(!logical.contains_key("@vertices"));
    }

    #[test]
    fn test_json_round_trip_keeps_kind_and_nested_items() {
        let json = r#"{
            "kind": "Brep",
            "properties": {
                "@displayValue": {"kind": "Mesh", "properties": {"faces": [0, 1, 2]}},
                "area": 12.5,
                "tag": null
            }
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();

        assert_eq!(item.kind, "Brep");
        assert_eq!(item.lookup("area"), Some(&Value::Float(12.5)));
        assert_eq!(item.lookup("tag"), Some(&Value::Null));
        let display = item.lookup("displayValue").and_then(Value::as_item).unwrap();
        assert_eq!(display.kind, "Mesh");
        assert_eq!(display.lookup_each("faces").map(|f| f.len()), Some(3));
    }

    #[test]
    fn test_kind_property_does_not_shadow_item_kind() {
        let item = Item::new("Line").with("kind", "beam");

        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"kind":"Line","properties":{"kind":"beam"}}"#);

        let parsed: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, item);
        assert_eq!(parsed.kind, "Line");
        assert_eq!(parsed.lookup("kind"), Some(&Value::from("beam")));
    }

    #[test]
    fn test_kind_lookup_prefers_plain_key_over_alias() {
        let json = r#"{"kind":"Line","properties":{"kind":"girder","@kind":"beam"}}"#;
        let item: Item = serde_json::from_str(json).unwrap();

        assert_eq!(item.kind, "Line");
        assert_eq!(item.lookup("kind"), Some(&Value::from("girder")));

        let alias_only = Item::new("Line").with("@kind", "beam");
        assert_eq!(alias_only.lookup("kind"), Some(&Value::from("beam")));
    }

    #[test]
    fn test_stray_top_level_keys_are_rejected() {
        let parsed = serde_json::from_str::<Item>(r#"{"kind":"Line","length":2.0}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_display_lists_properties() {
        let item = Item::new("Point").with("x", 1i64).with("y", 2i64);
        assert_eq!(item.to_string(), "Point(x=1, y=2)");
    }
}

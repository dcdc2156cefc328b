// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::errors::{ConversionError, KitError};
use crate::model::{Item, NativeItem, Value};
use crate::traits::{HostContext, ItemConverter, Kit};

pub const OBJECTS_KIT_NAME: &str = "Objects";

/// Default kit: carries an item's kind and logical properties across as-is.
///
/// Detached spellings are folded onto their plain keys on the way to the
/// native side, so a host never sees the `@` prefix. Geometry kinds the host
/// builds from numbers must carry those numbers under either spelling.
pub struct ObjectsKit;

impl ObjectsKit {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ObjectsKit {
    fn default() -> Self {
        Self::new()
    }
}

impl Kit for ObjectsKit {
    fn name(&self) -> &str {
        OBJECTS_KIT_NAME
    }

    fn description(&self) -> &str {
        "Default kit mapping portable objects to native records"
    }

    fn supports(&self, _application: &str) -> bool {
        true
    }

    fn load_converter(&self, context: &HostContext) -> Result<Arc<dyn ItemConverter>, KitError> {
        Ok(Arc::new(ObjectsConverter {
            context: context.clone(),
        }))
    }
}

/// Converter produced by [`ObjectsKit`].
pub struct ObjectsConverter {
    context: HostContext,
}

impl ObjectsConverter {
    pub fn context(&self) -> &HostContext {
        &self.context
    }
}

impl ItemConverter for ObjectsConverter {
    fn name(&self) -> &str {
        OBJECTS_KIT_NAME
    }

    fn to_native(&self, item: &Item) -> Result<NativeItem, ConversionError> {
        if item.kind.trim().is_empty() {
            return Err(ConversionError::Unsupported {
                kind: "<untyped>".to_string(),
            });
        }

        let fields = item.logical_properties();
        check_required(&item.kind, &fields)?;
        Ok(NativeItem {
            type_name: item.kind.clone(),
            fields,
        })
    }

    fn to_portable(&self, native: &NativeItem) -> Result<Item, ConversionError> {
        if native.type_name.trim().is_empty() {
            return Err(ConversionError::Unsupported {
                kind: "<untyped>".to_string(),
            });
        }
        check_required(&native.type_name, &native.fields)?;

        let mut item = Item::new(native.type_name.clone());
        for (key, value) in &native.fields {
            item.set(key.clone(), value.clone());
        }
        Ok(item)
    }
}

/// Numeric logical keys a kind cannot be built without.
fn required_numbers(kind: &str) -> &'static [&'static str] {
    match kind {
        "Point" => &["x", "y"],
        "Line" => &["length"],
        "Circle" => &["radius"],
        _ => &[],
    }
}

fn check_required(kind: &str, fields: &BTreeMap<String, Value>) -> Result<(), ConversionError> {
    for key in required_numbers(kind) {
        match fields.get(*key) {
            None => {
                return Err(ConversionError::MissingProperty {
                    key: key.to_string(),
                })
            }
            Some(value) if value.as_f64().is_none() => {
                return Err(ConversionError::InvalidValue {
                    key: key.to_string(),
                    reason: format!("expected a number, found {}", value),
                })
            }
            Some(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn converter() -> Arc<dyn ItemConverter> {
        ObjectsKit::new()
            .load_converter(&HostContext::new("rhino"))
            .unwrap()
    }

    #[test]
    fn test_to_native_folds_detached_keys() {
        let item = Item::new("Line")
            .with("@length", 2.5)
            .with("layer", "walls");

        let native = converter().to_native(&item).unwrap();
        assert_eq!(native.type_name, "Line");
        assert_eq!(native.field("length"), Some(&Value::Float(2.5)));
        assert_eq!(native.field("layer"), Some(&Value::from("walls")));
        assert!(native.field("@length").is_none());
    }

    #[test]
    fn test_untyped_items_are_unsupported() {
        let err = converter().to_native(&Item::new("  ")).unwrap_err();
        assert!(matches!(err, ConversionError::Unsupported { .. }));

        let err = converter().to_portable(&NativeItem::default()).unwrap_err();
        assert!(matches!(err, ConversionError::Unsupported { .. }));
    }

    #[test]
    fn test_to_portable_restores_kind_and_fields() {
        let native = NativeItem::new("Point").with_field("x", 1i64).with_field("y", 2i64);
        let item = converter().to_portable(&native).unwrap();

        assert_eq!(item.kind, "Point");
        assert_eq!(item.lookup("x"), Some(&Value::Int(1)));
        assert_eq!(item.len(), 2);
    }

    #[test]
    fn test_geometry_kinds_require_numeric_properties() {
        struct TestCase {
            name: &'static str,
            item: Item,
            expected: Result<(), ConversionError>,
        }

        let test_cases = vec![
            TestCase {
                name: "detached spelling satisfies requirement",
                item: Item::new("Line").with("@length", 2.5),
                expected: Ok(()),
            },
            TestCase {
                name: "missing under both spellings",
                item: Item::new("Circle").with("layer", "walls"),
                expected: Err(ConversionError::MissingProperty {
                    key: "radius".to_string(),
                }),
            },
            TestCase {
                name: "present but not numeric",
                item: Item::new("Point").with("x", 1i64).with("y", "two"),
                expected: Err(ConversionError::InvalidValue {
                    key: "y".to_string(),
                    reason: "expected a number, found two".to_string(),
                }),
            },
            TestCase {
                name: "present but null",
                item: Item::new("Circle").with("radius", Value::Null),
                expected: Err(ConversionError::InvalidValue {
                    key: "radius".to_string(),
                    reason: "expected a number, found null".to_string(),
                }),
            },
            TestCase {
                name: "other kinds have no requirements",
                item: Item::new("Wall"),
                expected: Ok(()),
            },
        ];

        for test_case in test_cases {
            let result = converter().to_native(&test_case.item).map(|_| ());
            assert_eq!(result, test_case.expected, "case '{}'", test_case.name);
        }
    }

    #[test]
    fn test_to_portable_checks_required_fields() {
        let err = converter()
            .to_portable(&NativeItem::new("Line").with_field("layer", "walls"))
            .unwrap_err();
        assert_eq!(
            err,
            ConversionError::MissingProperty {
                key: "length".to_string()
            }
        );
    }

    #[test]
    fn test_converter_is_bound_to_context() {
        let context = HostContext::new("rhino").with_document("site.3dm");
        let converter = ObjectsConverter { context: context.clone() };
        assert_eq!(converter.context(), &context);
    }
}

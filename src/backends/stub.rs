// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Test doubles for kits and converters.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::errors::{ConversionError, KitError};
use crate::model::{Converted, Item, NativeItem, Value};
use crate::traits::{HostContext, ItemConverter, Kit};

/// Item carrying a `name` property, the label stub converters work with.
pub fn named(name: &str) -> Item {
    Item::new("Named").with("name", name)
}

/// The text a stub converter put into a converted slot, if it is a value.
pub fn stub_text(slot: &Converted<NativeItem>) -> Option<String> {
    slot.value()
        .and_then(|native| native.field("value"))
        .map(|value| value.to_string())
}

/// Converter that appends a suffix to each item's label.
pub struct StubConverter {
    kit_name: String,
    suffix: String,
    fail_on: HashSet<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StubConverter {
    pub fn new(kit_name: &str, suffix: &str) -> Self {
        Self {
            kit_name: kit_name.to_string(),
            suffix: suffix.to_string(),
            fail_on: HashSet::new(),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail conversion for items whose label is `label`.
    pub fn failing_on(mut self, label: &str) -> Self {
        self.fail_on.insert(label.to_string());
        self
    }

    /// Block the calling thread for `delay` on every conversion.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn label(item: &Item) -> String {
        item.lookup("name")
            .map(Value::to_string)
            .unwrap_or_else(|| item.kind.clone())
    }

    fn enter(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
    }
}

impl ItemConverter for StubConverter {
    fn name(&self) -> &str {
        &self.kit_name
    }

    fn to_native(&self, item: &Item) -> Result<NativeItem, ConversionError> {
        self.enter();
        let label = Self::label(item);
        if self.fail_on.contains(&label) {
            return Err(ConversionError::Failed(format!("stub refuses '{}'", label)));
        }
        Ok(NativeItem::new("Stub").with_field("value", format!("{}{}", label, self.suffix)))
    }

    fn to_portable(&self, native: &NativeItem) -> Result<Item, ConversionError> {
        self.enter();
        let label = native
            .field("value")
            .map(Value::to_string)
            .unwrap_or_else(|| native.type_name.clone());
        if self.fail_on.contains(&label) {
            return Err(ConversionError::Failed(format!("stub refuses '{}'", label)));
        }
        Ok(Item::new("Stub").with("name", format!("{}{}", label, self.suffix)))
    }
}

/// Kit handing out a shared [`StubConverter`].
pub struct StubKit {
    name: String,
    description: String,
    applications: Option<Vec<String>>,
    converter: Arc<StubConverter>,
    fail_load: bool,
    loads: AtomicUsize,
    last_context: Mutex<Option<HostContext>>,
}

impl StubKit {
    /// Kit whose converter appends `'` to every label.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: format!("{} stub kit", name),
            applications: None,
            converter: Arc::new(StubConverter::new(name, "'")),
            fail_load: false,
            loads: AtomicUsize::new(0),
            last_context: Mutex::new(None),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_converter(mut self, converter: StubConverter) -> Self {
        self.converter = Arc::new(converter);
        self
    }

    /// Restrict the kit to the given host applications.
    pub fn for_apps(mut self, applications: &[&str]) -> Self {
        self.applications = Some(applications.iter().map(|a| a.to_string()).collect());
        self
    }

    /// Make every `load_converter` call fail.
    pub fn failing_load(mut self) -> Self {
        self.fail_load = true;
        self
    }

    pub fn converter(&self) -> Arc<StubConverter> {
        self.converter.clone()
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn last_context(&self) -> Option<HostContext> {
        self.last_context
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Kit for StubKit {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn supports(&self, application: &str) -> bool {
        self.applications
            .as_ref()
            .map_or(true, |apps| apps.iter().any(|a| a == application))
    }

    fn load_converter(&self, context: &HostContext) -> Result<Arc<dyn ItemConverter>, KitError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.fail_load {
            return Err(KitError::LoadFailed {
                kit: self.name.clone(),
                reason: "stub configured to fail".to_string(),
            });
        }
        if !self.supports(&context.application) {
            return Err(KitError::UnsupportedApplication {
                kit: self.name.clone(),
                application: context.application.clone(),
            });
        }
        *self
            .last_context
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(context.clone());
        Ok(self.converter.clone())
    }
}

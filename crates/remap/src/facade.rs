// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Late-bound member access by name.
//!
//! [`LateBound`] is the capability shared by dynamic objects and adapted
//! instances: read, write and enumerate members without knowing the type.
//! Failures are reported as `None`/`false` and logged; use [`PropertyView`]
//! directly for typed errors.

use crate::value::{DynamicObject, ObjectRef, Value};
use crate::view::PropertyView;

/// Name-based member access.
pub trait LateBound {
    /// Member value, `None` when the name cannot be read.
    fn get(&self, name: &str) -> Option<Value>;

    /// Write a member. `false` when the write was rejected.
    fn set(&mut self, name: &str, value: Value) -> bool;

    fn has(&self, name: &str) -> bool;

    fn names(&self) -> Vec<String>;
}

/// [`LateBound`] over a live view of an object.
///
/// Reads of missing members return the view's undefined value when missing
/// access is allowed.
#[derive(Debug)]
pub struct DynamicAdapter {
    view: PropertyView,
}

impl DynamicAdapter {
    pub fn new(view: PropertyView) -> Self {
        Self { view }
    }

    pub fn object(&self) -> &ObjectRef {
        self.view.object()
    }

    pub fn view(&self) -> &PropertyView {
        &self.view
    }

    pub fn into_view(self) -> PropertyView {
        self.view
    }
}

impl LateBound for DynamicAdapter {
    fn get(&self, name: &str) -> Option<Value> {
        match self.view.get(name) {
            Ok(value) => Some(value),
            Err(e) => {
                log::debug!("[facade] get '{}': {}", name, e);
                None
            }
        }
    }

    fn set(&mut self, name: &str, value: Value) -> bool {
        match self.view.set(name, value) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("[facade] set '{}': {}", name, e);
                false
            }
        }
    }

    fn has(&self, name: &str) -> bool {
        self.view.contains_key(name)
    }

    fn names(&self) -> Vec<String> {
        self.view.keys().into_iter().map(str::to_string).collect()
    }
}

impl LateBound for DynamicObject {
    fn get(&self, name: &str) -> Option<Value> {
        DynamicObject::get(self, name).cloned()
    }

    fn set(&mut self, name: &str, value: Value) -> bool {
        self.insert(name, value);
        true
    }

    fn has(&self, name: &str) -> bool {
        self.contains_key(name)
    }

    fn names(&self) -> Vec<String> {
        self.keys().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::StructuralMapper;
    use crate::model::ModelCache;
    use crate::options::MappingOptions;
    use crate::types::{ClassBuilder, ClassType, Describe};
    use std::sync::{Arc, OnceLock};

    #[derive(Default)]
    struct Counter {
        count: u32,
    }

    impl Describe for Counter {
        fn describe() -> ClassType {
            static CLASS: OnceLock<ClassType> = OnceLock::new();
            CLASS
                .get_or_init(|| {
                    ClassBuilder::<Counter>::new("Counter")
                        .typed("Count", |c| c.count, |c, v| c.count = v)
                        .build()
                })
                .clone()
        }
    }

    fn bump(target: &mut dyn LateBound) -> bool {
        let next = match target.get("count") {
            Some(Value::U32(n)) => n + 1,
            _ => 1,
        };
        target.set("Count", Value::U32(next))
    }

    #[test]
    fn test_adapter_and_dynamic_object_share_contract() {
        let mapper =
            StructuralMapper::with_options(Arc::new(ModelCache::new()), MappingOptions::default());
        let counter = ObjectRef::new(Counter { count: 4 });
        let mut adapter = mapper.as_dynamic(&counter).expect("adapter");
        assert!(bump(&mut adapter));
        assert_eq!(counter.read(|c: &Counter| c.count), Some(5));
        assert_eq!(adapter.names(), vec!["Count"]);

        let mut dynamic = DynamicObject::default();
        assert!(bump(&mut dynamic));
        assert!(bump(&mut dynamic));
        assert_eq!(LateBound::get(&dynamic, "COUNT"), Some(Value::U32(2)));
        assert!(dynamic.has("count"));
    }

    #[test]
    fn test_adapter_reports_rejections() {
        let mapper =
            StructuralMapper::with_options(Arc::new(ModelCache::new()), MappingOptions::default());
        let counter = ObjectRef::new(Counter::default());
        let mut adapter = mapper.as_dynamic(&counter).expect("adapter");
        assert!(!adapter.set("Count", Value::from("lots")));
        assert_eq!(adapter.get("missing"), Some(Value::Undefined));
        assert!(!adapter.has("missing"));
    }
}

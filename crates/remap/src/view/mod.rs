// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Live dictionary view over an object.
//!
//! Each key is a slot:
//!
//! | Slot      | Reads                  | Writes                          |
//! |-----------|------------------------|---------------------------------|
//! | `Bound`   | the object's member    | coerced into the member         |
//! | `AdHoc`   | the stored value       | replace the stored value        |
//! | `Removed` | missing                | re-added as `AdHoc` at the end  |
//!
//! Bound slots are created once, from the model, when the view is built.
//! Removing or clearing never touches the object; re-adding a removed bound
//! key creates an independent ad-hoc slot.

use crate::coerce;
use crate::error::{MapError, Result};
use crate::model::{fold, ClassModel, MemberAccessor, ModelCache};
use crate::options::MappingOptions;
use crate::value::{DynamicObject, ObjectRef, Value};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

enum Slot {
    Bound(Arc<MemberAccessor>),
    AdHoc(Value),
    Removed,
}

impl Slot {
    fn is_live(&self) -> bool {
        !matches!(self, Slot::Removed)
    }
}

/// Mutable dictionary over the members of one object.
pub struct PropertyView {
    object: ObjectRef,
    model: Arc<ClassModel>,
    options: MappingOptions,
    /// folded key → (key as first spelled, slot)
    slots: IndexMap<String, (String, Slot)>,
}

impl PropertyView {
    pub fn new(object: ObjectRef, cache: Arc<ModelCache>, options: MappingOptions) -> Result<Self> {
        let model = cache.model(&object.class(), &options)?;
        let slots = model
            .iter()
            .map(|accessor| {
                (
                    fold(accessor.name(), options.case_sensitive).into_owned(),
                    (accessor.name().to_string(), Slot::Bound(Arc::clone(accessor))),
                )
            })
            .collect();
        Ok(Self {
            object,
            model,
            options,
            slots,
        })
    }

    pub fn object(&self) -> &ObjectRef {
        &self.object
    }

    pub fn model(&self) -> &Arc<ClassModel> {
        &self.model
    }

    pub fn options(&self) -> &MappingOptions {
        &self.options
    }

    pub fn is_read_only(&self) -> bool {
        self.options.is_read_only
    }

    /// Value of `key`; missing keys yield the configured undefined value.
    pub fn get(&self, key: &str) -> Result<Value> {
        match self.try_get(key)? {
            Some(value) => Ok(value),
            None if self.options.can_access_missing_properties => {
                Ok(self.options.undefined_value.clone())
            }
            None => Err(MapError::KeyNotFound(key.to_string())),
        }
    }

    /// Value of `key`, `None` when missing.
    pub fn try_get(&self, key: &str) -> Result<Option<Value>> {
        match self.slot(key) {
            Some(Slot::Bound(accessor)) => accessor.get(&self.object).map(Some),
            Some(Slot::AdHoc(value)) => Ok(Some(value.clone())),
            Some(Slot::Removed) | None => Ok(None),
        }
    }

    /// Write `key`, adding it when missing.
    pub fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.check_writable()?;
        let folded = self.fold(key);
        let accessor = match self.slots.get_mut(folded.as_str()) {
            Some((_, Slot::Bound(accessor))) => Arc::clone(accessor),
            Some((_, Slot::AdHoc(current))) => {
                *current = value;
                return Ok(());
            }
            Some((_, Slot::Removed)) | None => return self.add(key, value),
        };

        if !self.options.update_source {
            return Err(MapError::Configuration(format!(
                "view does not update its source, '{}' is bound",
                accessor.name()
            )));
        }
        if accessor.is_read_only() {
            return Err(MapError::Configuration(format!(
                "member '{}' is read-only",
                accessor.name()
            )));
        }
        let value = self.coerce_for(&accessor, value)?;
        accessor.set(&self.object, value)
    }

    /// Add a new ad-hoc key.
    pub fn add(&mut self, key: &str, value: Value) -> Result<()> {
        self.check_alterable()?;
        let folded = self.fold(key);
        match self.slots.get(folded.as_str()) {
            Some((existing, slot)) if slot.is_live() => Err(MapError::Configuration(format!(
                "key '{}' already present",
                existing
            ))),
            Some(_) => {
                // Re-added keys go to the end.
                self.slots.shift_remove(folded.as_str());
                self.slots
                    .insert(folded, (key.to_string(), Slot::AdHoc(value)));
                Ok(())
            }
            None => {
                self.slots
                    .insert(folded, (key.to_string(), Slot::AdHoc(value)));
                Ok(())
            }
        }
    }

    /// Remove `key` from the view. The object keeps its member.
    pub fn remove(&mut self, key: &str) -> Result<bool> {
        self.check_alterable()?;
        let folded = self.fold(key);
        match self.slots.get_mut(folded.as_str()) {
            Some((_, slot)) if slot.is_live() => {
                *slot = Slot::Removed;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Remove every key. The object is left untouched.
    pub fn clear(&mut self) -> Result<()> {
        self.check_alterable()?;
        for (_, slot) in self.slots.values_mut() {
            *slot = Slot::Removed;
        }
        Ok(())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.slot(key).is_some_and(Slot::is_live)
    }

    /// Key present and its value equal to `value`.
    pub fn contains(&self, key: &str, value: &Value) -> Result<bool> {
        Ok(match self.try_get(key)? {
            Some(current) => current == *value,
            None => false,
        })
    }

    /// Live keys in view order.
    pub fn keys(&self) -> Vec<&str> {
        self.live().map(|(key, _)| key).collect()
    }

    pub fn values(&self) -> Result<Vec<Value>> {
        self.iter().map(|entry| entry.map(|(_, v)| v)).collect()
    }

    /// Live entries in view order.
    pub fn iter(&self) -> impl Iterator<Item = Result<(&str, Value)>> + '_ {
        self.live().map(move |(key, slot)| match slot {
            Slot::Bound(accessor) => accessor.get(&self.object).map(|value| (key, value)),
            Slot::AdHoc(value) => Ok((key, value.clone())),
            Slot::Removed => Ok((key, Value::Undefined)),
        })
    }

    pub fn len(&self) -> usize {
        self.live().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `key` is still bound to the object.
    pub fn is_bound(&self, key: &str) -> bool {
        matches!(self.slot(key), Some(Slot::Bound(_)))
    }

    /// Detached copy of the current entries.
    pub fn snapshot(&self) -> Result<DynamicObject> {
        let mut out =
            DynamicObject::with_capacity(self.slots.len(), self.options.dynamic_case_sensitive());
        for entry in self.iter() {
            let (key, value) = entry?;
            out.insert(key, value);
        }
        Ok(out)
    }

    fn fold(&self, key: &str) -> String {
        fold(key, self.options.case_sensitive).into_owned()
    }

    fn slot(&self, key: &str) -> Option<&Slot> {
        self.slots
            .get(fold(key, self.options.case_sensitive).as_ref())
            .map(|(_, slot)| slot)
    }

    fn live(&self) -> impl Iterator<Item = (&str, &Slot)> + '_ {
        self.slots
            .values()
            .filter(|(_, slot)| slot.is_live())
            .map(|(key, slot)| (key.as_str(), slot))
    }

    fn check_writable(&self) -> Result<()> {
        if self.options.is_read_only {
            return Err(MapError::Configuration("view is read-only".into()));
        }
        Ok(())
    }

    fn check_alterable(&self) -> Result<()> {
        self.check_writable()?;
        if !self.options.can_alter_properties {
            return Err(MapError::Configuration(format!(
                "keys of {} cannot be added or removed",
                self.model.class().name()
            )));
        }
        Ok(())
    }

    /// Coerce `value` for a bound member.
    fn coerce_for(&self, accessor: &MemberAccessor, value: Value) -> Result<Value> {
        let target = accessor.value_type();
        if value.is_null() {
            return if target.accepts_null() {
                Ok(Value::Null)
            } else {
                Err(MapError::mismatch(target, value.type_name()))
            };
        }
        let assignable = value
            .value_type()
            .is_some_and(|source| target.is_assignable_from(&source));
        if assignable {
            Ok(value)
        } else if self.options.parse_values {
            coerce::parse(&value, target)
        } else {
            Err(MapError::mismatch(target, value.type_name()))
        }
    }
}

impl fmt::Debug for PropertyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyView")
            .field("class", &self.model.class().name())
            .field("keys", &self.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassBuilder, ClassType, Describe, ValueType};
    use crate::value::UNDEFINED;
    use std::sync::OnceLock;

    #[derive(Default, Clone)]
    struct Probe {
        name: String,
        level: f64,
        id: i64,
    }

    impl Describe for Probe {
        fn describe() -> ClassType {
            static CLASS: OnceLock<ClassType> = OnceLock::new();
            CLASS
                .get_or_init(|| {
                    ClassBuilder::<Probe>::new("Probe")
                        .typed("Name", |p| p.name.clone(), |p, v| p.name = v)
                        .typed("Level", |p| p.level, |p, v| p.level = v)
                        .read_only_property("Id", ValueType::I64, |p| Value::I64(p.id))
                        .constructible()
                        .build()
                })
                .clone()
        }
    }

    fn view(options: MappingOptions) -> (ObjectRef, PropertyView) {
        let object = ObjectRef::new(Probe {
            name: "p1".into(),
            level: 0.5,
            id: 9,
        });
        let view = PropertyView::new(object.clone(), Arc::new(ModelCache::new()), options)
            .expect("view");
        (object, view)
    }

    fn name_of(object: &ObjectRef) -> String {
        object.read(|p: &Probe| p.name.clone()).unwrap_or_default()
    }

    #[test]
    fn test_reads_and_writes_through() {
        let (object, mut view) = view(MappingOptions::default());
        assert_eq!(view.keys(), vec!["Name", "Level", "Id"]);
        assert_eq!(view.get("NAME"), Ok(Value::from("p1")));
        view.set("name", Value::from("p2")).expect("set");
        assert_eq!(name_of(&object), "p2");
        assert!(view.contains("Id", &Value::I64(9)).expect("contains"));
    }

    #[test]
    fn test_exact_assignability_without_parsing() {
        let (_, mut view) = view(MappingOptions::default());
        assert!(view.set("Level", Value::from("3.14")).unwrap_err().is_mismatch());
        assert!(view.set("Level", Value::I32(3)).unwrap_err().is_mismatch());

        let (object, mut view) = self::view(MappingOptions::default().with_parse_values(true));
        view.set("Level", Value::from("3.14")).expect("parsed");
        assert_eq!(object.read(|p: &Probe| p.level), Some(3.14));
    }

    #[test]
    fn test_read_only_member() {
        let (_, mut view) = view(MappingOptions::default());
        assert!(matches!(
            view.set("Id", Value::I64(1)),
            Err(MapError::Configuration(_))
        ));
    }

    #[test]
    fn test_missing_keys() {
        let (_, view) = view(MappingOptions::default());
        assert_eq!(view.get("nope"), Ok(UNDEFINED));
        assert_eq!(view.try_get("nope"), Ok(None));

        let (_, view) = self::view(MappingOptions::default().with_undefined_value(Value::Null));
        assert_eq!(view.get("nope"), Ok(Value::Null));

        let (_, view) = self::view(MappingOptions::default().with_missing_access(false));
        assert_eq!(view.get("nope"), Err(MapError::KeyNotFound("nope".into())));
    }

    #[test]
    fn test_add_and_remove() {
        let (object, mut view) = view(MappingOptions::default());
        view.add("Extra", Value::I32(1)).expect("add");
        assert!(matches!(view.add("extra", Value::I32(2)), Err(MapError::Configuration(_))));
        assert_eq!(view.len(), 4);

        assert_eq!(view.remove("Name"), Ok(true));
        assert_eq!(view.remove("Name"), Ok(false));
        assert!(!view.contains_key("name"));
        assert_eq!(name_of(&object), "p1");
        assert_eq!(view.keys(), vec!["Level", "Id", "Extra"]);
    }

    #[test]
    fn test_alteration_gated() {
        let (_, mut view) = view(MappingOptions::default().with_alterable(false));
        assert!(matches!(view.add("Extra", Value::I32(1)), Err(MapError::Configuration(_))));
        assert!(matches!(view.remove("Name"), Err(MapError::Configuration(_))));
        view.set("Name", Value::from("still")).expect("existing key");
    }

    #[test]
    fn test_read_only_view() {
        let (_, mut view) = view(MappingOptions::default().with_read_only(true));
        assert!(matches!(view.set("Name", Value::from("x")), Err(MapError::Configuration(_))));
        assert!(matches!(view.clear(), Err(MapError::Configuration(_))));
        assert_eq!(view.get("Name"), Ok(Value::from("p1")));
    }

    #[test]
    fn test_no_source_updates() {
        let (object, mut view) = view(MappingOptions::default().with_update_source(false));
        assert!(matches!(view.set("Name", Value::from("x")), Err(MapError::Configuration(_))));
        view.set("Extra", Value::I32(1)).expect("ad-hoc");
        assert_eq!(name_of(&object), "p1");
    }

    #[test]
    fn test_clear_then_add_severs_binding() {
        let (object, mut view) = view(MappingOptions::default());
        view.clear().expect("clear");
        assert!(view.is_empty());
        assert_eq!(name_of(&object), "p1");

        view.add("name", Value::from("detached")).expect("re-add");
        assert!(!view.is_bound("Name"));
        view.set("Name", Value::from("again")).expect("set");
        assert_eq!(view.get("NAME"), Ok(Value::from("again")));
        assert_eq!(name_of(&object), "p1");
        assert_eq!(view.keys(), vec!["name"]);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let (_, mut view) = view(MappingOptions::default());
        view.add("Extra", Value::Bool(true)).expect("add");
        let snapshot = view.snapshot().expect("snapshot");
        view.set("Name", Value::from("changed")).expect("set");
        assert_eq!(snapshot.get("name"), Some(&Value::from("p1")));
        assert_eq!(snapshot.len(), 4);
    }
}
